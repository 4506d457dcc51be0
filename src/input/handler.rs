use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::editor::{Mode, Workspace};

pub fn handle_event(workspace: &mut Workspace, event: Event) {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(workspace, key),
        Event::Mouse(mouse) => handle_mouse(workspace, mouse),
        Event::Resize(width, height) => workspace.terminal_size = (width, height),
        _ => {}
    }
}

fn handle_key(workspace: &mut Workspace, key: KeyEvent) {
    // Ctrl shortcuts work in every mode
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char(c) = key.code {
            match c {
                'q' | 'c' => workspace.quit(),
                'r' => workspace.session.run_active_editor(),
                's' => workspace.session.save_active_editor(),
                't' => workspace.next_tab(),
                'w' => workspace.close_tab(),
                'p' => workspace.session.toggle_running(),
                _ => {}
            }
            return;
        }
    }

    match workspace.mode {
        Mode::Canvas => handle_canvas_mode(workspace, key),
        Mode::Insert => handle_insert_mode(workspace, key),
        Mode::Command => handle_command_mode(workspace, key),
    }
}

fn handle_canvas_mode(workspace: &mut Workspace, key: KeyEvent) {
    match key.code {
        KeyCode::Char(':') => workspace.enter_command_mode(),
        KeyCode::Char('i') => workspace.enter_insert_mode(),
        KeyCode::Delete | KeyCode::Char('x') => workspace.delete_selected(),
        KeyCode::Esc => workspace.session.world.scene.clear_selection(),
        _ => {}
    }
}

fn handle_insert_mode(workspace: &mut Workspace, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        workspace.enter_canvas_mode();
        return;
    }

    let Some(tab) = workspace.session.tabs.active_mut() else {
        workspace.enter_canvas_mode();
        return;
    };

    match key.code {
        KeyCode::Char(c) => tab.insert_char(c),
        KeyCode::Tab => {
            for _ in 0..4 {
                tab.insert_char(' ');
            }
        }
        KeyCode::Backspace => tab.delete_char_backward(),
        KeyCode::Enter => tab.insert_newline(),

        KeyCode::Left => tab.move_left(),
        KeyCode::Right => tab.move_right(),
        KeyCode::Up => tab.move_up(),
        KeyCode::Down => tab.move_down(),

        _ => {}
    }
}

fn handle_command_mode(workspace: &mut Workspace, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => workspace.enter_canvas_mode(),
        KeyCode::Enter => workspace.execute_command(),
        KeyCode::Backspace => workspace.pop_command_char(),
        KeyCode::Tab => workspace.accept_suggestion(),
        KeyCode::Down => workspace.next_suggestion(),
        KeyCode::Up => workspace.prev_suggestion(),
        KeyCode::Char(c) => workspace.push_command_char(c),
        _ => {}
    }
}

fn handle_mouse(workspace: &mut Workspace, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let additive = mouse.modifiers.contains(KeyModifiers::SHIFT);
            workspace.mouse_down(mouse.column, mouse.row, additive);
        }
        MouseEventKind::Drag(MouseButton::Left) => workspace.mouse_drag(mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => workspace.mouse_up(),
        _ => {}
    }
}
