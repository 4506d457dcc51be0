#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Mouse on the canvas, shortcuts active
    #[default]
    Canvas,
    /// Typing into the active script tab
    Insert,
    /// Typing into the command bar
    Command,
}

impl Mode {
    pub fn display(&self) -> &'static str {
        match self {
            Mode::Canvas => "CANVAS",
            Mode::Insert => "INSERT",
            Mode::Command => "COMMAND",
        }
    }
}
