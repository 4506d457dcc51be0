use super::Color;
use crate::console::Level;
use crate::syntax::HighlightKind;

/// Style for a UI element (color + optional attributes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Color,
    pub bold: bool,
    pub italic: bool,
}

impl Style {
    pub const fn new(fg: Color) -> Self {
        Self {
            fg,
            bold: false,
            italic: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

/// Complete theme definition
#[derive(Debug, Clone)]
pub struct Theme {
    // Editor chrome
    pub background: Color,
    pub foreground: Color,

    // UI elements
    pub line_number: Color,
    pub line_number_active: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub tab_bar_bg: Color,
    pub tab_bar_fg: Color,
    pub tab_active_bg: Color,
    pub tab_active_fg: Color,
    pub pane_border: Color,
    pub running: Color,

    // Canvas
    pub canvas_bg: Color,
    pub canvas_grid: Color,
    pub selection: Color,

    // Command bar suggestions
    pub suggestion_fg: Color,
    pub suggestion_active_bg: Color,
    pub suggestion_active_fg: Color,

    // Syntax highlighting
    pub syntax_keyword: Style,
    pub syntax_function: Style,
    pub syntax_string: Style,
    pub syntax_number: Style,
    pub syntax_comment: Style,
    pub syntax_variable: Style,
    pub syntax_operator: Style,

    // Console levels
    pub error: Color,
    pub warning: Color,
    pub info: Color,
}

impl Theme {
    /// Gruvbox Dark - warm retro theme
    pub fn gruvbox_dark() -> Self {
        Self {
            background: Color::rgb(0x28, 0x28, 0x28),
            foreground: Color::rgb(0xeb, 0xdb, 0xb2),

            line_number: Color::rgb(0x66, 0x5c, 0x54),
            line_number_active: Color::rgb(0xfa, 0xbd, 0x2f),
            status_bar_bg: Color::rgb(0x3c, 0x38, 0x36),
            status_bar_fg: Color::rgb(0xeb, 0xdb, 0xb2),
            tab_bar_bg: Color::rgb(0x1d, 0x20, 0x21),
            tab_bar_fg: Color::rgb(0xa8, 0x99, 0x84),
            tab_active_bg: Color::rgb(0x3c, 0x38, 0x36),
            tab_active_fg: Color::rgb(0xeb, 0xdb, 0xb2),
            pane_border: Color::rgb(0x50, 0x49, 0x45),
            running: Color::rgb(0xb8, 0xbb, 0x26),

            canvas_bg: Color::rgb(0x1d, 0x20, 0x21),
            canvas_grid: Color::rgb(0x32, 0x30, 0x2f),
            selection: Color::rgb(0xfa, 0xbd, 0x2f),

            suggestion_fg: Color::rgb(0xa8, 0x99, 0x84),
            suggestion_active_bg: Color::rgb(0x50, 0x49, 0x45),
            suggestion_active_fg: Color::rgb(0xfa, 0xbd, 0x2f),

            syntax_keyword: Style::new(Color::rgb(0xfb, 0x49, 0x34)).bold(),
            syntax_function: Style::new(Color::rgb(0xfa, 0xbd, 0x2f)),
            syntax_string: Style::new(Color::rgb(0xb8, 0xbb, 0x26)),
            syntax_number: Style::new(Color::rgb(0xd3, 0x86, 0x9b)),
            syntax_comment: Style::new(Color::rgb(0x92, 0x83, 0x74)).italic(),
            syntax_variable: Style::new(Color::rgb(0x83, 0xa5, 0x98)),
            syntax_operator: Style::new(Color::rgb(0xfe, 0x80, 0x19)),

            error: Color::rgb(0xfb, 0x49, 0x34),
            warning: Color::rgb(0xfa, 0xbd, 0x2f),
            info: Color::rgb(0xeb, 0xdb, 0xb2),
        }
    }

    pub fn highlight_style(&self, kind: HighlightKind) -> Style {
        match kind {
            HighlightKind::Keyword => self.syntax_keyword,
            HighlightKind::Function => self.syntax_function,
            HighlightKind::String => self.syntax_string,
            HighlightKind::Number => self.syntax_number,
            HighlightKind::Comment => self.syntax_comment,
            HighlightKind::Variable => self.syntax_variable,
            HighlightKind::Operator => self.syntax_operator,
        }
    }

    pub fn level_color(&self, level: Level) -> Color {
        match level {
            Level::Info => self.info,
            Level::Warn => self.warning,
            Level::Error => self.error,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::gruvbox_dark()
    }
}
