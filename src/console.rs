//! Console - the fixed-capacity log shown under the canvas
//!
//! Every advisory message in the editor ends up here. Entries are mirrored
//! to the `log` facade so they also land in the log file.

use std::collections::VecDeque;

/// Severity of a console entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub level: Level,
    pub text: String,
}

/// Ring buffer of console lines. Once full, the oldest line is evicted.
pub struct Console {
    entries: VecDeque<Entry>,
    capacity: usize,
}

impl Console {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn info(&mut self, msg: impl Into<String>) {
        self.push(Level::Info, msg.into());
    }

    pub fn warn(&mut self, msg: impl Into<String>) {
        self.push(Level::Warn, msg.into());
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        self.push(Level::Error, msg.into());
    }

    fn push(&mut self, level: Level, text: String) {
        match level {
            Level::Info => log::info!("{}", text),
            Level::Warn => log::warn!("{}", text),
            Level::Error => log::error!("{}", text),
        }

        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(Entry { level, text });
    }

    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &Entry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Text of the most recent entry
    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(|e| e.text.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_appends_in_order() {
        let mut console = Console::new(4);
        console.info("one");
        console.warn("two");
        let texts: Vec<_> = console.entries().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two"]);
        assert_eq!(console.last(), Some("two"));
    }

    #[test]
    fn full_console_evicts_oldest() {
        let mut console = Console::new(3);
        for i in 0..5 {
            console.info(format!("line {}", i));
        }
        assert_eq!(console.len(), 3);
        let texts: Vec<_> = console.entries().map(|e| e.text.clone()).collect();
        assert_eq!(texts, vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn entries_keep_their_level() {
        let mut console = Console::new(2);
        console.error("boom");
        assert_eq!(console.entries().next().map(|e| e.level), Some(Level::Error));
    }

    #[test]
    fn zero_capacity_still_keeps_latest_line() {
        let mut console = Console::new(0);
        console.info("a");
        console.info("b");
        assert_eq!(console.len(), 1);
        assert_eq!(console.last(), Some("b"));
    }
}
