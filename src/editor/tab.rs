use thiserror::Error;

use super::{Buffer, Cursor};
use crate::script::{ScriptKind, ScriptLibrary};

/// An open script: a private, editable copy of the library version
pub struct Tab {
    pub name: String,
    pub kind: ScriptKind,
    pub buffer: Buffer,
    pub cursor: Cursor,
    pub scroll_offset: usize,
}

impl Tab {
    pub fn new(name: &str, lines: &[String]) -> Self {
        Self {
            name: name.to_string(),
            kind: ScriptKind::from_name(name),
            buffer: Buffer::from_lines(lines),
            cursor: Cursor::new(),
            scroll_offset: 0,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.buffer.lines()
    }

    pub fn move_left(&mut self) {
        self.cursor.move_left();
    }

    pub fn move_right(&mut self) {
        let line_len = self.buffer.line_len(self.cursor.line);
        self.cursor.move_right(line_len);
    }

    pub fn move_up(&mut self) {
        self.cursor.move_up();
        self.clamp_cursor_col();
    }

    pub fn move_down(&mut self) {
        self.cursor.move_down(self.buffer.line_count());
        self.clamp_cursor_col();
    }

    fn clamp_cursor_col(&mut self) {
        let line_len = self.buffer.line_len(self.cursor.line);
        self.cursor.clamp_col(line_len);
    }

    pub fn insert_char(&mut self, ch: char) {
        self.buffer
            .insert_char(self.cursor.line, self.cursor.col, ch);
        self.cursor.col += 1;
    }

    pub fn insert_newline(&mut self) {
        self.buffer
            .insert_newline(self.cursor.line, self.cursor.col);
        self.cursor.line += 1;
        self.cursor.col = 0;
    }

    pub fn delete_char_backward(&mut self) {
        if self.cursor.col > 0 {
            self.buffer
                .delete_char_backward(self.cursor.line, self.cursor.col);
            self.cursor.col -= 1;
        } else if self.cursor.line > 0 {
            let prev_line_len = self.buffer.line_len(self.cursor.line - 1);
            self.buffer.delete_char_backward(self.cursor.line, 0);
            self.cursor.line -= 1;
            self.cursor.col = prev_line_len;
        }
    }

    /// Adjust scroll offset to keep cursor visible within viewport
    pub fn adjust_scroll(&mut self, viewport_height: usize) {
        if self.cursor.line < self.scroll_offset {
            self.scroll_offset = self.cursor.line;
        }
        if viewport_height > 0 && self.cursor.line >= self.scroll_offset + viewport_height {
            self.scroll_offset = self.cursor.line - viewport_height + 1;
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TabError {
    #[error("too many open editors ({0})")]
    Full(usize),
}

/// The open editor tabs, at most `capacity` of them
pub struct Tabs {
    tabs: Vec<Tab>,
    active: Option<usize>,
    capacity: usize,
}

impl Tabs {
    pub fn new(capacity: usize) -> Self {
        Self {
            tabs: Vec::new(),
            active: None,
            capacity,
        }
    }

    /// Focus the tab for `name`, opening it first if needed.
    ///
    /// A new tab starts from the library copy of the script, or empty.
    /// Returns `true` when a new tab was created.
    pub fn open(&mut self, name: &str, library: &ScriptLibrary) -> Result<bool, TabError> {
        if let Some(idx) = self.tabs.iter().position(|t| t.name == name) {
            self.active = Some(idx);
            return Ok(false);
        }
        if self.tabs.len() >= self.capacity {
            return Err(TabError::Full(self.capacity));
        }

        let tab = match library.find(name) {
            Some(script) => Tab::new(name, &script.lines),
            None => Tab::new(name, &[]),
        };
        self.tabs.push(tab);
        self.active = Some(self.tabs.len() - 1);
        Ok(true)
    }

    pub fn active(&self) -> Option<&Tab> {
        self.active.and_then(|i| self.tabs.get(i))
    }

    pub fn active_mut(&mut self) -> Option<&mut Tab> {
        self.active.and_then(|i| self.tabs.get_mut(i))
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn close_active(&mut self) -> Option<Tab> {
        let idx = self.active?;
        let tab = self.tabs.remove(idx);
        self.active = if self.tabs.is_empty() {
            None
        } else {
            Some(idx.min(self.tabs.len() - 1))
        };
        Some(tab)
    }

    pub fn next(&mut self) {
        if let Some(idx) = self.active {
            self.active = Some((idx + 1) % self.tabs.len());
        }
    }

    pub fn prev(&mut self) {
        if let Some(idx) = self.active {
            self.active = Some((idx + self.tabs.len() - 1) % self.tabs.len());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tabs.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Script;

    fn library() -> ScriptLibrary {
        let mut lib = ScriptLibrary::new(4);
        lib.insert(Script::from_text("walk.script", "x = 5\nmove box x 0"))
            .unwrap();
        lib
    }

    #[test]
    fn open_seeds_from_library() {
        let mut tabs = Tabs::new(4);
        assert_eq!(tabs.open("walk.script", &library()), Ok(true));
        let tab = tabs.active().unwrap();
        assert_eq!(tab.kind, ScriptKind::CommandScript);
        assert_eq!(tab.lines(), vec!["x = 5", "move box x 0"]);
    }

    #[test]
    fn open_new_name_starts_with_one_empty_line() {
        let mut tabs = Tabs::new(4);
        tabs.open("fresh.rhai", &library()).unwrap();
        let tab = tabs.active().unwrap();
        assert_eq!(tab.kind, ScriptKind::EmbeddedScript);
        assert_eq!(tab.lines(), vec![String::new()]);
    }

    #[test]
    fn reopening_focuses_existing_tab() {
        let lib = library();
        let mut tabs = Tabs::new(4);
        tabs.open("walk.script", &lib).unwrap();
        tabs.open("other.script", &lib).unwrap();
        assert_eq!(tabs.open("walk.script", &lib), Ok(false));
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs.active_index(), Some(0));
    }

    #[test]
    fn open_fails_when_full() {
        let lib = library();
        let mut tabs = Tabs::new(1);
        tabs.open("a", &lib).unwrap();
        assert_eq!(tabs.open("b", &lib), Err(TabError::Full(1)));
    }

    #[test]
    fn edits_stay_out_of_library() {
        let lib = library();
        let mut tabs = Tabs::new(4);
        tabs.open("walk.script", &lib).unwrap();
        let tab = tabs.active_mut().unwrap();
        tab.insert_char('#');
        assert_eq!(tab.lines()[0], "#x = 5");
        assert_eq!(lib.find("walk.script").unwrap().lines[0], "x = 5");
    }

    #[test]
    fn backspace_joins_lines() {
        let lib = library();
        let mut tabs = Tabs::new(4);
        tabs.open("walk.script", &lib).unwrap();
        let tab = tabs.active_mut().unwrap();
        tab.move_down();
        tab.delete_char_backward();
        assert_eq!(tab.cursor.line, 0);
        assert_eq!(tab.cursor.col, 5);
        assert_eq!(tab.lines(), vec!["x = 5move box x 0"]);
    }

    #[test]
    fn next_prev_and_close_cycle_focus() {
        let lib = library();
        let mut tabs = Tabs::new(4);
        for name in ["a", "b", "c"] {
            tabs.open(name, &lib).unwrap();
        }
        tabs.next();
        assert_eq!(tabs.active().unwrap().name, "a");
        tabs.prev();
        assert_eq!(tabs.active().unwrap().name, "c");

        assert_eq!(tabs.close_active().unwrap().name, "c");
        assert_eq!(tabs.active().unwrap().name, "b");
        tabs.close_active();
        tabs.close_active();
        assert!(tabs.active().is_none());
        assert!(tabs.close_active().is_none());
    }

    #[test]
    fn adjust_scroll_follows_cursor() {
        let mut tab = Tab::new("long.script", &(0..10).map(|i| i.to_string()).collect::<Vec<_>>());
        tab.cursor.line = 8;
        tab.adjust_scroll(5);
        assert_eq!(tab.scroll_offset, 4);
        tab.cursor.line = 2;
        tab.adjust_scroll(5);
        assert_eq!(tab.scroll_offset, 2);
    }
}
