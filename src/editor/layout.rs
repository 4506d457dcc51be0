/// A rectangle of terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Split this rect horizontally (top/bottom)
    pub fn split_horizontal(&self, ratio: f32) -> (Rect, Rect) {
        let top_height = (self.height as f32 * ratio) as u16;
        let top = Rect::new(self.x, self.y, self.width, top_height);
        let bottom = Rect::new(
            self.x,
            self.y + top_height,
            self.width,
            self.height - top_height,
        );
        (top, bottom)
    }

    /// Split this rect vertically (left/right)
    pub fn split_vertical(&self, ratio: f32) -> (Rect, Rect) {
        let left_width = (self.width as f32 * ratio) as u16;
        let left = Rect::new(self.x, self.y, left_width, self.height);
        let right = Rect::new(
            self.x + left_width,
            self.y,
            self.width - left_width,
            self.height,
        );
        (left, right)
    }

    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x && col < self.x + self.width && row >= self.y && row < self.y + self.height
    }

    pub fn bottom(&self) -> u16 {
        self.y + self.height
    }
}

/// Where each part of the screen goes.
///
/// ```text
/// tab bar
/// canvas        | editor
/// console
/// suggestions
/// command / status line
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub tab_bar: Rect,
    pub canvas: Rect,
    /// One column of separator sits between canvas and editor
    pub editor: Rect,
    pub console: Rect,
    pub suggestions: Rect,
    pub command_bar: Rect,
}

const CONSOLE_RATIO: f32 = 0.25;
const CANVAS_RATIO: f32 = 0.6;

impl ScreenLayout {
    pub fn compute(width: u16, height: u16) -> Self {
        let tab_bar = Rect::new(0, 0, width, height.min(1));
        let command_bar = Rect::new(0, height.saturating_sub(1), width, height.min(1));
        let suggestions = Rect::new(0, command_bar.y.saturating_sub(1), width, height.min(1));

        let body_top = tab_bar.bottom();
        let body = Rect::new(0, body_top, width, suggestions.y.saturating_sub(body_top));
        let (main, console) = body.split_horizontal(1.0 - CONSOLE_RATIO);
        let (canvas, right) = main.split_vertical(CANVAS_RATIO);
        let editor = Rect::new(
            right.x + right.width.min(1),
            right.y,
            right.width.saturating_sub(1),
            right.height,
        );

        Self {
            tab_bar,
            canvas,
            editor,
            console,
            suggestions,
            command_bar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_do_not_overlap() {
        let layout = ScreenLayout::compute(120, 40);
        assert_eq!(layout.tab_bar.y, 0);
        assert_eq!(layout.canvas.y, 1);
        assert_eq!(layout.console.y, layout.canvas.bottom());
        assert_eq!(layout.suggestions.y, layout.console.bottom());
        assert_eq!(layout.command_bar.y, 39);
        assert_eq!(layout.editor.x, layout.canvas.width + 1);
        assert_eq!(layout.editor.x + layout.editor.width, 120);
    }

    #[test]
    fn tiny_terminal_does_not_underflow() {
        let layout = ScreenLayout::compute(2, 2);
        assert_eq!(layout.canvas.height, 0);
        assert_eq!(layout.editor.height, 0);
    }

    #[test]
    fn contains_is_half_open() {
        let rect = Rect::new(2, 3, 4, 5);
        assert!(rect.contains(2, 3));
        assert!(rect.contains(5, 7));
        assert!(!rect.contains(6, 3));
        assert!(!rect.contains(2, 8));
    }
}
