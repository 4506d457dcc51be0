use ropey::Rope;

/// Editable text of an open script. Saving goes through the project store,
/// so the buffer itself only tracks whether it diverged from the library copy.
pub struct Buffer {
    text: Rope,
    dirty: bool,
}

impl Buffer {
    pub fn new() -> Self {
        Self {
            text: Rope::new(),
            dirty: false,
        }
    }

    pub fn from_lines(lines: &[String]) -> Self {
        Self {
            text: Rope::from_str(&lines.join("\n")),
            dirty: false,
        }
    }

    pub fn from_text(s: &str) -> Self {
        Self {
            text: Rope::from_str(s),
            dirty: false,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn line_count(&self) -> usize {
        self.text.len_lines()
    }

    /// Line content without the trailing newline
    pub fn line_string(&self, idx: usize) -> String {
        let mut line = self.text.line(idx).to_string();
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        line
    }

    /// All lines, without newlines
    pub fn lines(&self) -> Vec<String> {
        (0..self.line_count()).map(|i| self.line_string(i)).collect()
    }

    pub fn text(&self) -> String {
        self.text.to_string()
    }

    pub fn line_len(&self, idx: usize) -> usize {
        // Length excluding newline character
        let line = self.text.line(idx);
        let len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    fn line_col_to_char(&self, line: usize, col: usize) -> usize {
        self.text.line_to_char(line) + col
    }

    pub fn insert_char(&mut self, line: usize, col: usize, ch: char) {
        let idx = self.line_col_to_char(line, col);
        self.text.insert_char(idx, ch);
        self.dirty = true;
    }

    pub fn insert_newline(&mut self, line: usize, col: usize) {
        self.insert_char(line, col, '\n');
    }

    /// Backspace at (line, col). Joins with the previous line at column 0.
    pub fn delete_char_backward(&mut self, line: usize, col: usize) -> bool {
        let idx = self.line_col_to_char(line, col);
        if idx == 0 {
            return false;
        }
        self.text.remove(idx - 1..idx);
        self.dirty = true;
        true
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_lines_keeps_lines() {
        let buf = Buffer::from_lines(&["x = 5".to_string(), "move box x 0".to_string()]);
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.lines(), vec!["x = 5", "move box x 0"]);
        assert!(!buf.is_dirty());
    }

    #[test]
    fn empty_buffer_has_one_empty_line() {
        let buf = Buffer::from_lines(&[]);
        assert_eq!(buf.lines(), vec![String::new()]);
    }

    #[test]
    fn line_len_excludes_newline() {
        let buf = Buffer::from_text("hello\n\nworld");
        assert_eq!(buf.line_len(0), 5);
        assert_eq!(buf.line_len(1), 0);
        assert_eq!(buf.line_len(2), 5);
    }

    #[test]
    fn editing_marks_dirty() {
        let mut buf = Buffer::from_text("ab");
        buf.insert_char(0, 1, 'x');
        assert_eq!(buf.text(), "axb");
        assert!(buf.is_dirty());
        buf.mark_clean();
        assert!(!buf.is_dirty());
    }

    #[test]
    fn backspace_at_line_start_joins_lines() {
        let mut buf = Buffer::from_text("ab\ncd");
        assert!(buf.delete_char_backward(1, 0));
        assert_eq!(buf.text(), "abcd");
        assert!(!buf.delete_char_backward(0, 0));
    }

    #[test]
    fn newline_splits_line() {
        let mut buf = Buffer::from_text("move box 1 2");
        buf.insert_newline(0, 8);
        assert_eq!(buf.lines(), vec!["move box", " 1 2"]);
    }
}
