use crate::config::DoughConfig;
use dough_timer::format::format_ready_time;
use dough_timer::{BatchTimer, RowOutcome};
use time::UtcOffset;
use tracing::info;

mod form;
mod state;
pub use form::BatchForm;
pub use state::{DeleteContext, FocusedBox, FormField, TextInput, View};

pub struct App {
    pub running: bool,
    pub timer: BatchTimer,
    pub form: BatchForm,
    pub status_message: Option<String>,
    pub current_view: View,
    pub focused_box: FocusedBox,

    // Index into the batch list, when it has entries
    pub selected_batch: Option<usize>,

    // Delete confirmation
    pub delete_context: Option<DeleteContext>,

    pub local_offset: UtcOffset,
    pub max_hours_hint: f64,
}

impl App {
    pub fn new(timer: BatchTimer, cfg: &DoughConfig, local_offset: UtcOffset) -> Self {
        let selected_batch = (!timer.is_empty()).then_some(0);
        Self {
            running: true,
            timer,
            form: BatchForm::new(),
            status_message: None,
            current_view: View::Batches,
            focused_box: FocusedBox::Form,
            selected_batch,
            delete_context: None,
            local_offset,
            max_hours_hint: cfg.max_hours_hint,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn navigate_to(&mut self, view: View) {
        self.current_view = view;
    }

    pub fn toggle_focus(&mut self) {
        self.focused_box = match self.focused_box {
            FocusedBox::Form => FocusedBox::Batches,
            FocusedBox::Batches => FocusedBox::Form,
        };
    }

    pub fn ready_at_label(&self, end_time: i64) -> String {
        format_ready_time(end_time, self.local_offset)
    }

    /// Hands every form row to the timer and clears the ones that started.
    ///
    /// Rows that fail validation are left in place without an error message.
    pub fn submit_form(&mut self) -> Vec<RowOutcome> {
        self.clear_status();
        let outcomes = self.timer.submit_batches(&self.form.batch_rows());
        self.form.apply_outcomes(&outcomes);

        let started = outcomes.iter().filter(|o| o.is_accepted()).count();
        if started > 0 {
            info!(started, "Form submitted");
            self.set_status(match started {
                1 => "Started 1 batch".to_string(),
                n => format!("Started {n} batches"),
            });
            if self.selected_batch.is_none() {
                self.selected_batch = Some(0);
            }
        }
        outcomes
    }

    pub fn select_next_batch(&mut self) {
        let len = self.timer.len();
        if len == 0 {
            self.selected_batch = None;
            return;
        }
        self.selected_batch = Some(match self.selected_batch {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i.min(len - 1),
            None => 0,
        });
    }

    pub fn select_previous_batch(&mut self) {
        if self.timer.is_empty() {
            self.selected_batch = None;
            return;
        }
        self.selected_batch = Some(self.selected_batch.map_or(0, |i| i.saturating_sub(1)));
    }

    /// Opens the confirmation dialog for the selected batch, if any.
    pub fn enter_delete_confirm(&mut self) {
        self.clear_status();
        let Some(entry) = self
            .selected_batch
            .and_then(|i| self.timer.snapshot().entries.get(i))
        else {
            return;
        };
        self.delete_context = Some(DeleteContext {
            id: entry.id.clone(),
            display_name: entry.name.clone(),
            display_ready_at: self.ready_at_label(entry.end_time),
        });
        self.navigate_to(View::ConfirmDelete);
    }

    pub fn cancel_delete(&mut self) {
        self.clear_status();
        self.delete_context = None;
        self.navigate_to(View::Batches);
    }

    /// Deletes the batch named by the open confirmation dialog.
    pub fn confirm_delete(&mut self) {
        if let Some(ctx) = self.delete_context.take() {
            if self.timer.delete_batch(&ctx.id) {
                self.set_status(format!("Deleted {}", ctx.display_name));
            }
        }
        self.clamp_selection();
        self.navigate_to(View::Batches);
    }

    fn clamp_selection(&mut self) {
        let len = self.timer.len();
        self.selected_batch = match self.selected_batch {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => Some(0),
        };
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use dough_timer::{ManualClock, MemoryStore, SilentNotifier};
    use std::sync::Arc;

    pub const T0: i64 = 1_704_067_200_000;

    pub fn test_app() -> (App, ManualClock) {
        let clock = ManualClock::new(T0);
        let timer = BatchTimer::new(
            Arc::new(clock.clone()),
            Box::new(SilentNotifier),
            Box::new(MemoryStore::new()),
        );
        (
            App::new(timer, &DoughConfig::default(), UtcOffset::UTC),
            clock,
        )
    }

    pub fn fill_form(app: &mut App, rows: &[(&str, &str)]) {
        app.form = BatchForm::new();
        for (i, (name, hours)) in rows.iter().enumerate() {
            if i > 0 {
                app.form.add_row();
            }
            name.chars().for_each(|c| app.form.input_char(c));
            app.form.next_field();
            hours.chars().for_each(|c| app.form.input_char(c));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{fill_form, test_app, T0};
    use super::*;
    use dough_timer::MS_PER_HOUR;

    #[test]
    fn submit_form_starts_valid_rows_and_keeps_invalid_ones() {
        let (mut app, _clock) = test_app();
        fill_form(&mut app, &[("pies", "48"), ("", "72")]);

        app.submit_form();

        assert_eq!(app.timer.len(), 1);
        assert_eq!(app.form.rows.len(), 1);
        assert_eq!(app.form.rows[0].hours.value, "72");
        assert_eq!(app.status_message.as_deref(), Some("Started 1 batch"));
        assert_eq!(app.selected_batch, Some(0));
    }

    #[test]
    fn submit_form_with_nothing_valid_is_silent() {
        let (mut app, _clock) = test_app();
        fill_form(&mut app, &[("pies", "")]);

        app.submit_form();

        assert!(app.timer.is_empty());
        assert_eq!(app.status_message, None);
        assert_eq!(app.form.rows[0].name.value, "pies");
    }

    #[test]
    fn skipped_submit_clears_previous_message() {
        let (mut app, clock) = test_app();
        fill_form(&mut app, &[("pies", "1")]);
        app.submit_form();
        fill_form(&mut app, &[("", "5")]);

        app.submit_form();

        assert_eq!(app.status_message, None);
        clock.set(T0 + 2 * MS_PER_HOUR);
        app.timer.tick_if_due();
        assert_eq!(app.timer.snapshot().status.to_string(), "All batches are ready");
    }

    #[test]
    fn selection_stays_within_list() {
        let (mut app, _clock) = test_app();
        fill_form(&mut app, &[("a", "1"), ("b", "2")]);
        app.submit_form();

        app.select_next_batch();
        app.select_next_batch();
        assert_eq!(app.selected_batch, Some(1));
        app.select_previous_batch();
        app.select_previous_batch();
        assert_eq!(app.selected_batch, Some(0));
    }

    #[test]
    fn delete_flow_removes_selected_batch() {
        let (mut app, _clock) = test_app();
        fill_form(&mut app, &[("a", "1"), ("b", "2")]);
        app.submit_form();
        app.selected_batch = Some(1);

        app.enter_delete_confirm();
        assert_eq!(app.current_view, View::ConfirmDelete);
        assert_eq!(app.delete_context.as_ref().unwrap().display_name, "b");

        app.confirm_delete();
        assert_eq!(app.current_view, View::Batches);
        assert_eq!(app.timer.len(), 1);
        assert_eq!(app.timer.batches()[0].name(), "a");
        assert_eq!(app.selected_batch, Some(0));
        assert_eq!(app.status_message.as_deref(), Some("Deleted b"));
    }

    #[test]
    fn delete_confirm_needs_a_selection() {
        let (mut app, _clock) = test_app();
        app.enter_delete_confirm();
        assert_eq!(app.current_view, View::Batches);
        assert!(app.delete_context.is_none());
    }

    #[test]
    fn cancel_delete_keeps_batch() {
        let (mut app, _clock) = test_app();
        fill_form(&mut app, &[("a", "1")]);
        app.submit_form();

        app.enter_delete_confirm();
        app.cancel_delete();

        assert_eq!(app.timer.len(), 1);
        assert_eq!(app.current_view, View::Batches);
    }

    #[test]
    fn deleting_last_batch_clears_selection() {
        let (mut app, _clock) = test_app();
        fill_form(&mut app, &[("a", "1")]);
        app.submit_form();

        app.enter_delete_confirm();
        app.confirm_delete();

        assert_eq!(app.selected_batch, None);
    }
}
