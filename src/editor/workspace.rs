use super::Mode;
use super::layout::{Rect, ScreenLayout};
use crate::command::VERBS;
use crate::finder;
use crate::scene::Vec2;
use crate::session::Session;

const MAX_SUGGESTIONS: usize = 8;

/// World point under the centre of a canvas cell.
///
/// A cell covers `units` world units across and twice that down, since
/// terminal cells are about twice as tall as they are wide.
pub fn canvas_point(canvas: Rect, units: f32, col: u16, row: u16) -> Vec2 {
    Vec2::new(
        ((col - canvas.x) as f32 + 0.5) * units,
        ((row - canvas.y) as f32 + 0.5) * units * 2.0,
    )
}

/// Top-level UI state around the session
pub struct Workspace {
    pub session: Session,
    pub mode: Mode,
    pub command_buffer: String,
    pub suggestions: Vec<String>,
    pub highlighted: usize,
    pub running: bool,
    pub terminal_size: (u16, u16),
    drag_from: Option<Vec2>,
}

impl Workspace {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            mode: Mode::default(),
            command_buffer: String::new(),
            suggestions: Vec::new(),
            highlighted: 0,
            running: true,
            terminal_size: (80, 24),
            drag_from: None,
        }
    }

    pub fn layout(&self) -> ScreenLayout {
        ScreenLayout::compute(self.terminal_size.0, self.terminal_size.1)
    }

    pub fn units_per_cell(&self) -> f32 {
        self.session.settings().canvas_units_per_cell
    }

    fn canvas_point_at(&self, col: u16, row: u16) -> Option<Vec2> {
        let canvas = self.layout().canvas;
        canvas
            .contains(col, row)
            .then(|| canvas_point(canvas, self.units_per_cell(), col, row))
    }

    // Modes

    pub fn enter_canvas_mode(&mut self) {
        self.mode = Mode::Canvas;
        self.command_buffer.clear();
        self.suggestions.clear();
    }

    pub fn enter_insert_mode(&mut self) {
        if self.session.tabs.active().is_none() {
            self.session.world.console.warn("No open editor");
            return;
        }
        self.mode = Mode::Insert;
    }

    pub fn enter_command_mode(&mut self) {
        self.mode = Mode::Command;
        self.command_buffer.clear();
        self.refresh_suggestions();
    }

    // Command bar

    pub fn push_command_char(&mut self, c: char) {
        self.command_buffer.push(c);
        self.refresh_suggestions();
    }

    /// Backspace. On an empty bar this leaves command mode.
    pub fn pop_command_char(&mut self) {
        if self.command_buffer.pop().is_none() {
            self.enter_canvas_mode();
            return;
        }
        self.refresh_suggestions();
    }

    pub fn execute_command(&mut self) {
        let line = std::mem::take(&mut self.command_buffer);
        self.session.execute(&line);
        self.enter_canvas_mode();
    }

    /// Suggest verbs for the first word, script names for the argument of a
    /// verb that takes one.
    pub fn refresh_suggestions(&mut self) {
        self.highlighted = 0;
        let after_space = self.command_buffer.ends_with(char::is_whitespace);
        let tokens: Vec<&str> = self.command_buffer.split_whitespace().collect();

        let ranked: Vec<&str> = match (tokens.as_slice(), after_space) {
            ([word], false) => finder::rank(word, VERBS.iter().map(|v| v.name)),
            ([verb], true) if takes_script(verb) => {
                finder::rank("", self.session.library.names())
            }
            ([verb, partial], false) if takes_script(verb) => {
                finder::rank(partial, self.session.library.names())
            }
            _ => Vec::new(),
        };

        self.suggestions = ranked
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(str::to_string)
            .collect();
    }

    pub fn next_suggestion(&mut self) {
        if !self.suggestions.is_empty() {
            self.highlighted = (self.highlighted + 1) % self.suggestions.len();
        }
    }

    pub fn prev_suggestion(&mut self) {
        if !self.suggestions.is_empty() {
            let len = self.suggestions.len();
            self.highlighted = (self.highlighted + len - 1) % len;
        }
    }

    /// Replace the word being typed with the highlighted suggestion
    pub fn accept_suggestion(&mut self) {
        let Some(choice) = self.suggestions.get(self.highlighted).cloned() else {
            return;
        };
        let keep = self
            .command_buffer
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        self.command_buffer.truncate(keep);
        self.command_buffer.push_str(&choice);
        self.command_buffer.push(' ');
        self.refresh_suggestions();
    }

    // Tabs

    pub fn next_tab(&mut self) {
        self.session.tabs.next();
    }

    pub fn close_tab(&mut self) {
        let Some(tab) = self.session.tabs.close_active() else {
            return;
        };
        if tab.buffer.is_dirty() {
            self.session
                .world
                .console
                .warn(format!("Closed '{}', unsaved changes discarded", tab.name));
        }
        if self.session.tabs.is_empty() && self.mode == Mode::Insert {
            self.mode = Mode::Canvas;
        }
    }

    pub fn adjust_scroll(&mut self) {
        let height = self.layout().editor.height as usize;
        if let Some(tab) = self.session.tabs.active_mut() {
            tab.adjust_scroll(height);
        }
    }

    // Canvas

    pub fn mouse_down(&mut self, col: u16, row: u16, additive: bool) {
        let layout = self.layout();
        if layout.editor.contains(col, row) {
            self.enter_insert_mode();
            return;
        }
        let Some(point) = self.canvas_point_at(col, row) else {
            return;
        };
        if self.mode == Mode::Insert {
            self.mode = Mode::Canvas;
        }
        let picked = self.session.world.scene.select_at(point, additive);
        self.drag_from = picked.map(|_| point);
    }

    pub fn mouse_drag(&mut self, col: u16, row: u16) {
        let Some(from) = self.drag_from else {
            return;
        };
        let Some(point) = self.canvas_point_at(col, row) else {
            return;
        };
        self.session.world.scene.drag_selected(point - from);
        self.drag_from = Some(point);
    }

    pub fn mouse_up(&mut self) {
        self.drag_from = None;
    }

    /// Delete every selected object through the dispatcher
    pub fn delete_selected(&mut self) {
        let names: Vec<String> = self
            .session
            .world
            .scene
            .selected()
            .map(|o| o.name.clone())
            .collect();
        for name in names {
            self.session.execute(&format!("delete {}", name));
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}

fn takes_script(verb: &str) -> bool {
    VERBS.iter().any(|v| v.name == verb && v.takes_script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::scene::{Rgba, Shape};
    use crate::script::Script;

    fn workspace() -> Workspace {
        let mut session = Session::new(Settings::default(), None);
        session
            .world
            .scene
            .add("dot", Shape::Circle, Vec2::new(55.0, 110.0), 20.0, Rgba::RED)
            .unwrap();
        for name in ["orbit.rhai", "intro.script", "notes.txt"] {
            session.library.insert(Script::new(name, Vec::new())).unwrap();
        }
        let mut ws = Workspace::new(session);
        ws.terminal_size = (120, 40);
        ws
    }

    fn type_command(ws: &mut Workspace, text: &str) {
        for c in text.chars() {
            ws.push_command_char(c);
        }
    }

    #[test]
    fn canvas_point_maps_cell_centres() {
        let canvas = Rect::new(0, 1, 60, 20);
        assert_eq!(canvas_point(canvas, 10.0, 0, 1), Vec2::new(5.0, 10.0));
        assert_eq!(canvas_point(canvas, 10.0, 5, 6), Vec2::new(55.0, 110.0));
    }

    #[test]
    fn verbs_suggested_for_first_word() {
        let mut ws = workspace();
        ws.enter_command_mode();
        type_command(&mut ws, "RunP");
        assert_eq!(ws.suggestions.first().map(String::as_str), Some("RunPython"));
    }

    #[test]
    fn script_names_suggested_after_script_verb() {
        let mut ws = workspace();
        ws.enter_command_mode();
        type_command(&mut ws, "RunScript ");
        assert_eq!(ws.suggestions, vec!["orbit.rhai", "intro.script", "notes.txt"]);

        type_command(&mut ws, "int");
        assert_eq!(ws.suggestions, vec!["intro.script"]);

        ws.accept_suggestion();
        assert_eq!(ws.command_buffer, "RunScript intro.script ");
    }

    #[test]
    fn no_script_suggestions_for_other_verbs() {
        let mut ws = workspace();
        ws.enter_command_mode();
        type_command(&mut ws, "move ");
        assert!(ws.suggestions.is_empty());
    }

    #[test]
    fn suggestion_cycling_wraps() {
        let mut ws = workspace();
        ws.enter_command_mode();
        type_command(&mut ws, "OpenScript ");
        ws.prev_suggestion();
        assert_eq!(ws.highlighted, 2);
        ws.next_suggestion();
        assert_eq!(ws.highlighted, 0);
    }

    #[test]
    fn execute_runs_command_and_returns_to_canvas() {
        let mut ws = workspace();
        ws.enter_command_mode();
        type_command(&mut ws, "move dot 1 1");
        ws.execute_command();
        assert_eq!(ws.mode, Mode::Canvas);
        assert!(ws.command_buffer.is_empty());
        assert_eq!(
            ws.session.world.scene.find("dot").unwrap().position,
            Vec2::new(56.0, 111.0)
        );
    }

    #[test]
    fn backspace_on_empty_bar_leaves_command_mode() {
        let mut ws = workspace();
        ws.enter_command_mode();
        ws.pop_command_char();
        assert_eq!(ws.mode, Mode::Canvas);
    }

    #[test]
    fn insert_mode_needs_an_open_editor() {
        let mut ws = workspace();
        ws.enter_insert_mode();
        assert_eq!(ws.mode, Mode::Canvas);
        ws.session.execute("OpenScript intro.script");
        ws.enter_insert_mode();
        assert_eq!(ws.mode, Mode::Insert);
    }

    #[test]
    fn click_and_drag_moves_object() {
        let mut ws = workspace();
        // Cell (5, 6) is the centre of "dot"
        ws.mouse_down(5, 6, false);
        assert!(ws.session.world.scene.find("dot").unwrap().selected);

        ws.mouse_drag(7, 7);
        ws.mouse_up();
        assert_eq!(
            ws.session.world.scene.find("dot").unwrap().position,
            Vec2::new(75.0, 130.0)
        );

        // Dragging after release does nothing
        ws.mouse_drag(20, 20);
        assert_eq!(
            ws.session.world.scene.find("dot").unwrap().position,
            Vec2::new(75.0, 130.0)
        );
    }

    #[test]
    fn delete_selected_goes_through_dispatcher() {
        let mut ws = workspace();
        ws.mouse_down(5, 6, false);
        ws.delete_selected();
        assert!(ws.session.world.scene.is_empty());
        assert_eq!(ws.session.world.console.last(), Some("Deleted 'dot'"));
    }
}
