use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_form_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        // Ctrl+A: add another row
        KeyCode::Char('a') | KeyCode::Char('A') if ctrl => app.form.add_row(),
        KeyCode::Char(c) if !ctrl => app.form.input_char(c),
        KeyCode::Backspace => app.form.backspace(),
        KeyCode::Left => app.form.cursor_left(),
        KeyCode::Right => app.form.cursor_right(),
        KeyCode::Tab => app.form.next_field(),
        KeyCode::BackTab => app.form.prev_field(),
        KeyCode::Down => app.form.row_down(),
        KeyCode::Up => app.form.row_up(),
        KeyCode::Enter => enqueue_action(action_tx, Action::SubmitForm),
        KeyCode::Esc => app.toggle_focus(),
        _ => {}
    }
}
