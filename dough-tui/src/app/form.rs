use dough_timer::{BatchRow, RowOutcome};

use super::state::{FormField, TextInput};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormRow {
    pub name: TextInput,
    pub hours: TextInput,
}

impl FormRow {
    fn to_batch_row(&self) -> BatchRow {
        BatchRow::new(self.name.value.clone(), self.hours.value.clone())
    }
}

/// Rows of (name, hours) waiting to be started. Never empty.
///
/// Rows that become batches leave the form; rows that did not stay for
/// correction.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchForm {
    pub rows: Vec<FormRow>,
    pub focused_row: usize,
    pub focused_field: FormField,
}

impl Default for BatchForm {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchForm {
    pub fn new() -> Self {
        Self {
            rows: vec![FormRow::default()],
            focused_row: 0,
            focused_field: FormField::Name,
        }
    }

    /// Appends a blank row and puts the cursor in its name field.
    pub fn add_row(&mut self) {
        self.rows.push(FormRow::default());
        self.focused_row = self.rows.len() - 1;
        self.focused_field = FormField::Name;
    }

    pub fn batch_rows(&self) -> Vec<BatchRow> {
        self.rows.iter().map(FormRow::to_batch_row).collect()
    }

    /// Drops the rows that became batches. `outcomes` must line up with the
    /// rows as returned by [`BatchForm::batch_rows`].
    pub fn apply_outcomes(&mut self, outcomes: &[RowOutcome]) {
        let mut index = 0;
        self.rows.retain(|_| {
            let keep = !outcomes.get(index).is_some_and(RowOutcome::is_accepted);
            index += 1;
            keep
        });

        if self.rows.is_empty() {
            self.rows.push(FormRow::default());
            self.focused_field = FormField::Name;
        }
        self.focused_row = self.focused_row.min(self.rows.len() - 1);
    }

    fn focused_input_mut(&mut self) -> &mut TextInput {
        let row = &mut self.rows[self.focused_row];
        match self.focused_field {
            FormField::Name => &mut row.name,
            FormField::Hours => &mut row.hours,
        }
    }

    /// Types into the focused field. The hours field only takes digits and `.`.
    pub fn input_char(&mut self, c: char) {
        if self.focused_field == FormField::Hours && !(c.is_ascii_digit() || c == '.') {
            return;
        }
        self.focused_input_mut().insert(c);
    }

    pub fn backspace(&mut self) {
        self.focused_input_mut().backspace();
    }

    pub fn cursor_left(&mut self) {
        self.focused_input_mut().move_left();
    }

    pub fn cursor_right(&mut self) {
        self.focused_input_mut().move_right();
    }

    /// Name → Hours → next row's Name, wrapping at the end.
    pub fn next_field(&mut self) {
        match self.focused_field {
            FormField::Name => self.focused_field = FormField::Hours,
            FormField::Hours => {
                self.focused_field = FormField::Name;
                self.focused_row = (self.focused_row + 1) % self.rows.len();
            }
        }
    }

    pub fn prev_field(&mut self) {
        match self.focused_field {
            FormField::Hours => self.focused_field = FormField::Name,
            FormField::Name => {
                self.focused_field = FormField::Hours;
                self.focused_row = self
                    .focused_row
                    .checked_sub(1)
                    .unwrap_or(self.rows.len() - 1);
            }
        }
    }

    pub fn row_down(&mut self) {
        if self.focused_row + 1 < self.rows.len() {
            self.focused_row += 1;
        }
    }

    pub fn row_up(&mut self) {
        self.focused_row = self.focused_row.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dough_timer::{BatchId, SkipReason};

    fn type_str(form: &mut BatchForm, s: &str) {
        s.chars().for_each(|c| form.input_char(c));
    }

    fn filled(rows: &[(&str, &str)]) -> BatchForm {
        let mut form = BatchForm::new();
        for (i, (name, hours)) in rows.iter().enumerate() {
            if i > 0 {
                form.add_row();
            }
            type_str(&mut form, name);
            form.next_field();
            type_str(&mut form, hours);
        }
        form
    }

    #[test]
    fn starts_with_one_blank_row() {
        let form = BatchForm::new();
        assert_eq!(form.rows.len(), 1);
        assert_eq!(form.batch_rows(), vec![BatchRow::default()]);
    }

    #[test]
    fn hours_field_filters_non_numeric_input() {
        let mut form = BatchForm::new();
        form.next_field();
        type_str(&mut form, "4a8.5h");
        assert_eq!(form.rows[0].hours.value, "48.5");
    }

    #[test]
    fn typed_rows_become_batch_rows() {
        let form = filled(&[("Friday pies", "48"), ("rolls", "2")]);
        assert_eq!(
            form.batch_rows(),
            vec![BatchRow::new("Friday pies", "48"), BatchRow::new("rolls", "2")]
        );
    }

    #[test]
    fn accepted_rows_leave_the_form() {
        let mut form = filled(&[("a", "1"), ("", "2"), ("c", "3")]);
        form.apply_outcomes(&[
            RowOutcome::Accepted(BatchId::from("x")),
            RowOutcome::Skipped(SkipReason::EmptyName),
            RowOutcome::Accepted(BatchId::from("y")),
        ]);

        assert_eq!(form.batch_rows(), vec![BatchRow::new("", "2")]);
        assert_eq!(form.focused_row, 0);
    }

    #[test]
    fn form_keeps_a_blank_row_after_everything_starts() {
        let mut form = filled(&[("a", "1")]);
        form.apply_outcomes(&[RowOutcome::Accepted(BatchId::from("x"))]);

        assert_eq!(form.rows, vec![FormRow::default()]);
        assert_eq!(form.focused_field, FormField::Name);
    }

    #[test]
    fn field_navigation_wraps_across_rows() {
        let mut form = filled(&[("a", "1"), ("b", "2")]);
        form.focused_row = 1;
        form.focused_field = FormField::Hours;

        form.next_field();
        assert_eq!((form.focused_row, form.focused_field), (0, FormField::Name));

        form.prev_field();
        assert_eq!((form.focused_row, form.focused_field), (1, FormField::Hours));
    }

    #[test]
    fn add_row_focuses_new_name_field() {
        let mut form = BatchForm::new();
        form.next_field();
        form.add_row();
        assert_eq!(form.focused_row, 1);
        assert_eq!(form.focused_field, FormField::Name);
        assert_eq!(form.rows[1], FormRow::default());
    }
}
