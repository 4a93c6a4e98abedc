use crate::app::App;

use super::action_queue::Action;

pub(super) fn run_action(action: Action, app: &mut App) {
    match action {
        Action::SubmitForm => {
            app.submit_form();
        }
        Action::ConfirmDelete => app.confirm_delete(),
    }
}
