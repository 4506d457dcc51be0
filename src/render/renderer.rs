use std::io::{self, Write, stdout};

use crossterm::{
    cursor::{Hide, MoveTo, SetCursorStyle, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, DisableLineWrap, EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen,
    },
};

use crate::editor::{Mode, Rect, ScreenLayout, Workspace, canvas_point};
use crate::syntax::highlight_line;
use crate::theme::{Color, Style, Theme};

const GUTTER_WIDTH: u16 = 4;

/// Pad or truncate `text` to exactly `width` characters
fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat_n(' ', width - len));
    out
}

pub struct Renderer {
    theme: Theme,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    pub fn setup() -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            DisableLineWrap,
            Hide,
            terminal::Clear(terminal::ClearType::All)
        )?;
        Ok(())
    }

    pub fn teardown() -> io::Result<()> {
        execute!(
            stdout(),
            SetCursorStyle::DefaultUserShape,
            Show,
            EnableLineWrap,
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn render(&self, workspace: &Workspace) -> io::Result<()> {
        let mut stdout = stdout();
        let layout = workspace.layout();

        // Hide cursor during redraw to prevent flicker
        queue!(stdout, Hide)?;

        self.render_tab_bar(&mut stdout, workspace, &layout.tab_bar)?;
        self.render_canvas(&mut stdout, workspace, &layout.canvas)?;
        self.render_separator(&mut stdout, &layout)?;
        self.render_editor(&mut stdout, workspace, &layout.editor)?;
        self.render_console(&mut stdout, workspace, &layout.console)?;
        self.render_suggestions(&mut stdout, workspace, &layout.suggestions)?;
        self.render_status_line(&mut stdout, workspace, &layout.command_bar)?;
        self.position_cursor(&mut stdout, workspace, &layout)?;

        stdout.flush()?;
        Ok(())
    }

    fn set_colors(&self, stdout: &mut impl Write, fg: Color, bg: Color) -> io::Result<()> {
        queue!(
            stdout,
            SetForegroundColor(fg.to_crossterm()),
            SetBackgroundColor(bg.to_crossterm())
        )
    }

    fn print_styled(&self, stdout: &mut impl Write, text: &str, style: Style) -> io::Result<()> {
        queue!(stdout, SetForegroundColor(style.fg.to_crossterm()))?;
        if style.bold {
            queue!(stdout, SetAttribute(Attribute::Bold))?;
        }
        if style.italic {
            queue!(stdout, SetAttribute(Attribute::Italic))?;
        }
        queue!(stdout, Print(text))?;
        if style.bold || style.italic {
            queue!(
                stdout,
                SetAttribute(Attribute::Reset),
                SetBackgroundColor(self.theme.background.to_crossterm())
            )?;
        }
        Ok(())
    }

    fn render_tab_bar(
        &self,
        stdout: &mut impl Write,
        workspace: &Workspace,
        rect: &Rect,
    ) -> io::Result<()> {
        if rect.height == 0 {
            return Ok(());
        }
        let theme = &self.theme;
        let tabs = &workspace.session.tabs;
        queue!(stdout, MoveTo(rect.x, rect.y))?;

        let mut used = 0usize;
        let width = rect.width as usize;
        for (i, tab) in tabs.iter().enumerate() {
            let is_active = Some(i) == tabs.active_index();
            let dirty = if tab.buffer.is_dirty() { "+" } else { "" };
            let text = if is_active {
                format!(" [{}{}] ", tab.name, dirty)
            } else {
                format!("  {}{}  ", tab.name, dirty)
            };
            let text = fit(&text, text.chars().count().min(width - used));

            if is_active {
                self.set_colors(stdout, theme.tab_active_fg, theme.tab_active_bg)?;
            } else {
                self.set_colors(stdout, theme.tab_bar_fg, theme.tab_bar_bg)?;
            }
            queue!(stdout, Print(&text))?;
            used += text.chars().count();
            if used >= width {
                break;
            }
        }

        // Fill remaining space
        self.set_colors(stdout, theme.tab_bar_fg, theme.tab_bar_bg)?;
        queue!(stdout, Print(" ".repeat(width - used)))?;
        Ok(())
    }

    fn render_canvas(
        &self,
        stdout: &mut impl Write,
        workspace: &Workspace,
        rect: &Rect,
    ) -> io::Result<()> {
        let theme = &self.theme;
        let scene = &workspace.session.world.scene;
        let units = workspace.units_per_cell();

        for row in 0..rect.height {
            queue!(stdout, MoveTo(rect.x, rect.y + row))?;
            for col in 0..rect.width {
                let point = canvas_point(*rect, units, rect.x + col, rect.y + row);
                match scene.object_at(point) {
                    Some(object) => {
                        let fill = Color::from_scene(object.color, theme.canvas_bg);
                        if object.selected {
                            self.set_colors(stdout, fill, theme.selection)?;
                            queue!(stdout, Print('▒'))?;
                        } else {
                            self.set_colors(stdout, fill, theme.canvas_bg)?;
                            queue!(stdout, Print('█'))?;
                        }
                    }
                    None => {
                        self.set_colors(stdout, theme.canvas_grid, theme.canvas_bg)?;
                        let on_grid = col % 10 == 0 && row % 5 == 0;
                        queue!(stdout, Print(if on_grid { '·' } else { ' ' }))?;
                    }
                }
            }
        }

        // Object names over their centres
        for object in scene.iter() {
            let col = object.position.x / units;
            let row = object.position.y / (units * 2.0);
            if col < 0.0 || row < 0.0 || col >= rect.width as f32 || row >= rect.height as f32 {
                continue;
            }
            let (col, row) = (col as u16, row as u16);
            let room = (rect.width - col) as usize;
            let label: String = object.name.chars().take(room).collect();
            let bg = Color::from_scene(object.color, theme.canvas_bg);
            self.set_colors(stdout, theme.foreground, bg)?;
            queue!(stdout, MoveTo(rect.x + col, rect.y + row), Print(label))?;
        }
        Ok(())
    }

    fn render_separator(&self, stdout: &mut impl Write, layout: &ScreenLayout) -> io::Result<()> {
        if layout.editor.x == 0 {
            return Ok(());
        }
        self.set_colors(stdout, self.theme.pane_border, self.theme.background)?;
        let x = layout.editor.x - 1;
        for y in layout.canvas.y..layout.canvas.bottom() {
            queue!(stdout, MoveTo(x, y), Print("│"))?;
        }
        Ok(())
    }

    fn render_editor(
        &self,
        stdout: &mut impl Write,
        workspace: &Workspace,
        rect: &Rect,
    ) -> io::Result<()> {
        let theme = &self.theme;
        let text_width = rect.width.saturating_sub(GUTTER_WIDTH) as usize;

        let Some(tab) = workspace.session.tabs.active() else {
            self.set_colors(stdout, theme.line_number, theme.background)?;
            for row in 0..rect.height {
                let text = match row {
                    0 => " No open script",
                    1 => " :NewScript name  :NewPython name",
                    2 => " :OpenScript name",
                    _ => "",
                };
                queue!(stdout, MoveTo(rect.x, rect.y + row))?;
                queue!(stdout, Print(fit(text, rect.width as usize)))?;
            }
            return Ok(());
        };

        let line_count = tab.buffer.line_count();
        for row in 0..rect.height {
            let line_idx = row as usize + tab.scroll_offset;
            queue!(stdout, MoveTo(rect.x, rect.y + row))?;
            queue!(stdout, SetBackgroundColor(theme.background.to_crossterm()))?;

            if line_idx >= line_count {
                // Empty line indicator
                queue!(stdout, SetForegroundColor(theme.line_number.to_crossterm()))?;
                queue!(stdout, Print(fit("  ~ ", rect.width as usize)))?;
                continue;
            }

            let number_color = if line_idx == tab.cursor.line {
                theme.line_number_active
            } else {
                theme.line_number
            };
            queue!(stdout, SetForegroundColor(number_color.to_crossterm()))?;
            queue!(
                stdout,
                Print(fit(&format!("{:>3} ", line_idx + 1), GUTTER_WIDTH as usize))
            )?;

            let content: Vec<char> = tab
                .buffer
                .line_string(line_idx)
                .chars()
                .take(text_width)
                .collect();
            let line: String = content.iter().collect();

            let plain = Style::new(theme.foreground);
            let mut pos = 0;
            for span in highlight_line(&line, tab.kind) {
                if span.start > pos {
                    let gap: String = content[pos..span.start].iter().collect();
                    self.print_styled(stdout, &gap, plain)?;
                }
                let text: String = content[span.start..span.end].iter().collect();
                self.print_styled(stdout, &text, theme.highlight_style(span.kind))?;
                pos = span.end;
            }
            let rest: String = content[pos..].iter().collect();
            self.print_styled(stdout, &fit(&rest, text_width - pos), plain)?;
        }
        Ok(())
    }

    fn render_console(
        &self,
        stdout: &mut impl Write,
        workspace: &Workspace,
        rect: &Rect,
    ) -> io::Result<()> {
        if rect.height == 0 {
            return Ok(());
        }
        let theme = &self.theme;
        let session = &workspace.session;
        let width = rect.width as usize;

        let state = if session.running { "  ▶ running" } else { "" };
        let header = format!(" Console  project '{}'{}", session.project.name(), state);
        let header_fg = if session.running {
            theme.running
        } else {
            theme.status_bar_fg
        };
        self.set_colors(stdout, header_fg, theme.status_bar_bg)?;
        queue!(stdout, MoveTo(rect.x, rect.y), Print(fit(&header, width)))?;

        let rows = rect.height as usize - 1;
        let entries = session.world.console.entries();
        let skip = entries.len().saturating_sub(rows);
        let mut row = rect.y + 1;
        for entry in entries.skip(skip) {
            self.set_colors(stdout, theme.level_color(entry.level), theme.background)?;
            queue!(
                stdout,
                MoveTo(rect.x, row),
                Print(fit(&format!(" {}", entry.text), width))
            )?;
            row += 1;
        }

        self.set_colors(stdout, theme.foreground, theme.background)?;
        while row < rect.bottom() {
            queue!(stdout, MoveTo(rect.x, row), Print(" ".repeat(width)))?;
            row += 1;
        }
        Ok(())
    }

    fn render_suggestions(
        &self,
        stdout: &mut impl Write,
        workspace: &Workspace,
        rect: &Rect,
    ) -> io::Result<()> {
        if rect.height == 0 {
            return Ok(());
        }
        let theme = &self.theme;
        let width = rect.width as usize;
        queue!(stdout, MoveTo(rect.x, rect.y))?;

        let mut used = 0;
        if workspace.mode == Mode::Command {
            for (i, name) in workspace.suggestions.iter().enumerate() {
                let text = format!(" {} ", name);
                let len = text.chars().count();
                if used + len > width {
                    break;
                }
                if i == workspace.highlighted {
                    self.set_colors(
                        stdout,
                        theme.suggestion_active_fg,
                        theme.suggestion_active_bg,
                    )?;
                } else {
                    self.set_colors(stdout, theme.suggestion_fg, theme.background)?;
                }
                queue!(stdout, Print(text))?;
                used += len;
            }
        }

        self.set_colors(stdout, theme.foreground, theme.background)?;
        queue!(stdout, Print(" ".repeat(width - used)))?;
        Ok(())
    }

    fn render_status_line(
        &self,
        stdout: &mut impl Write,
        workspace: &Workspace,
        rect: &Rect,
    ) -> io::Result<()> {
        if rect.height == 0 {
            return Ok(());
        }
        let theme = &self.theme;
        let width = rect.width as usize;
        queue!(stdout, MoveTo(rect.x, rect.y))?;

        // Command mode - just show the command
        if workspace.mode == Mode::Command {
            self.set_colors(stdout, theme.foreground, theme.background)?;
            let line = format!(":{}", workspace.command_buffer);
            queue!(stdout, Print(fit(&line, width)))?;
            return Ok(());
        }

        let session = &workspace.session;
        let (name, position) = match session.tabs.active() {
            Some(tab) => (
                tab.name.as_str(),
                format!("{}:{}", tab.cursor.line + 1, tab.cursor.col + 1),
            ),
            None => ("[no script]", String::new()),
        };
        let selected = session.world.scene.selected().count();
        let left = format!(
            " {} | {} objects, {} selected | {} ",
            workspace.mode.display(),
            session.world.scene.len(),
            selected,
            name
        );
        let right = format!(" {} ", position);
        let padding = width.saturating_sub(left.chars().count() + right.chars().count());
        let status = format!("{}{}{}", left, " ".repeat(padding), right);

        self.set_colors(stdout, theme.status_bar_fg, theme.status_bar_bg)?;
        queue!(stdout, Print(fit(&status, width)))?;
        Ok(())
    }

    fn position_cursor(
        &self,
        stdout: &mut impl Write,
        workspace: &Workspace,
        layout: &ScreenLayout,
    ) -> io::Result<()> {
        match workspace.mode {
            Mode::Command => {
                let col = 1 + workspace.command_buffer.chars().count() as u16;
                queue!(
                    stdout,
                    MoveTo(col.min(layout.command_bar.width), layout.command_bar.y),
                    SetCursorStyle::BlinkingBar,
                    Show
                )?;
            }
            Mode::Insert => {
                let Some(tab) = workspace.session.tabs.active() else {
                    return Ok(());
                };
                let editor = layout.editor;
                let x = editor.x + GUTTER_WIDTH + tab.cursor.col as u16;
                let y = editor.y + (tab.cursor.line.saturating_sub(tab.scroll_offset)) as u16;
                if editor.contains(x, y) {
                    queue!(stdout, MoveTo(x, y), SetCursorStyle::BlinkingBar, Show)?;
                }
            }
            Mode::Canvas => {}
        }
        Ok(())
    }
}
