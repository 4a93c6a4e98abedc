use crate::app::{App, FocusedBox};
use crossterm::event::{KeyCode, KeyEvent};

pub(super) fn handle_batches_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_batch(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_batch(),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete | KeyCode::Backspace => {
            app.enter_delete_confirm();
        }
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.form.add_row();
            app.focused_box = FocusedBox::Form;
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc => app.toggle_focus(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{fill_form, test_app};
    use crate::app::View;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        handle_batches_key(KeyEvent::new(code, KeyModifiers::NONE), app);
    }

    #[test]
    fn d_opens_delete_confirmation_for_selection() {
        let (mut app, _clock) = test_app();
        fill_form(&mut app, &[("pies", "48")]);
        app.submit_form();
        app.focused_box = FocusedBox::Batches;

        press(&mut app, KeyCode::Char('d'));

        assert_eq!(app.current_view, View::ConfirmDelete);
    }

    #[test]
    fn a_adds_form_row_and_moves_focus() {
        let (mut app, _clock) = test_app();
        app.focused_box = FocusedBox::Batches;

        press(&mut app, KeyCode::Char('a'));

        assert_eq!(app.form.rows.len(), 2);
        assert_eq!(app.focused_box, FocusedBox::Form);
    }

    #[test]
    fn q_quits() {
        let (mut app, _clock) = test_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }
}
