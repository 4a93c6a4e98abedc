use crate::app::{App, FocusedBox, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::action_queue::{Action, ActionTx};

mod batches;
mod confirm_delete;
mod form;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

pub(super) fn handle_view_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    // Ctrl+C quits from anywhere
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    match app.current_view {
        View::ConfirmDelete => confirm_delete::handle_confirm_delete_key(key, app, action_tx),
        View::Batches => match app.focused_box {
            FocusedBox::Form => form::handle_form_key(key, app, action_tx),
            FocusedBox::Batches => batches::handle_batches_key(key, app),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{fill_form, test_app, T0};
    use dough_timer::{Countdown, MS_PER_HOUR};

    use super::super::action_queue::channel;
    use super::super::actions::run_action;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn drain(app: &mut App, rx: &mut super::super::action_queue::ActionRx) {
        while let Ok(action) = rx.try_recv() {
            run_action(action, app);
        }
    }

    #[test]
    fn ctrl_c_quits_from_any_view() {
        let (mut app, _clock) = test_app();
        let (tx, _rx) = channel();
        app.current_view = View::ConfirmDelete;

        handle_view_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut app,
            &tx,
        );

        assert!(!app.running);
    }

    #[test]
    fn submit_then_delete_through_the_queue() {
        let (mut app, clock) = test_app();
        let (tx, mut rx) = channel();
        fill_form(&mut app, &[("Friday pies", "48"), ("Sunday pies", "72")]);

        handle_view_key(key(KeyCode::Enter), &mut app, &tx);
        drain(&mut app, &mut rx);
        assert_eq!(app.timer.len(), 2);

        clock.set(T0 + 48 * MS_PER_HOUR + 1_000);
        assert!(app.timer.tick_if_due());
        let entries = &app.timer.snapshot().entries;
        assert_eq!(entries[0].countdown, Countdown::Ready);
        assert_eq!(entries[1].countdown.to_string(), "23:59:59");

        handle_view_key(key(KeyCode::Esc), &mut app, &tx);
        handle_view_key(key(KeyCode::Char('d')), &mut app, &tx);
        assert_eq!(app.current_view, View::ConfirmDelete);
        handle_view_key(key(KeyCode::Char('y')), &mut app, &tx);
        drain(&mut app, &mut rx);

        assert_eq!(app.timer.len(), 1);
        assert_eq!(app.timer.batches()[0].name(), "Sunday pies");
        assert_eq!(app.current_view, View::Batches);
    }

    #[test]
    fn n_cancels_delete() {
        let (mut app, _clock) = test_app();
        let (tx, mut rx) = channel();
        fill_form(&mut app, &[("pies", "1")]);
        app.submit_form();
        app.enter_delete_confirm();

        handle_view_key(key(KeyCode::Char('n')), &mut app, &tx);
        drain(&mut app, &mut rx);

        assert_eq!(app.timer.len(), 1);
        assert_eq!(app.current_view, View::Batches);
    }
}
