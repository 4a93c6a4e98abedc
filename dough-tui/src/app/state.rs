use dough_timer::BatchId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Batches,
    ConfirmDelete,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusedBox {
    Form,
    Batches,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Name,
    Hours,
}

/// The batch awaiting delete confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteContext {
    pub id: BatchId,
    pub display_name: String,
    pub display_ready_at: String,
}

/// A single-line text input with a cursor (byte offset, always on a char
/// boundary).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some((start, _)) = self.value[..self.cursor].char_indices().next_back() {
            self.value.drain(start..self.cursor);
            self.cursor = start;
        }
    }

    pub fn move_left(&mut self) {
        if let Some((start, _)) = self.value[..self.cursor].char_indices().next_back() {
            self.cursor = start;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    /// (before, after) the cursor.
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.value.split_at(self.cursor)
    }
}
