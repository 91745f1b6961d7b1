//! Generation form: topic and as-of date fields with validation

use blogsmith_core::prelude::*;
use chrono::{Local, NaiveDate};

/// Date format accepted by the backend
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const EMPTY_TOPIC_MESSAGE: &str = "Please enter a topic";
pub const INVALID_DATE_MESSAGE: &str = "Please enter a valid date (YYYY-MM-DD)";

/// Single-line text input with a character cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    /// Cursor position in characters, `0..=len`
    cursor: usize,
}

impl TextField {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(i, _)| i)
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_index(self.cursor - 1);
        self.value.remove(at);
        self.cursor -= 1;
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.value.chars().count() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

/// Edit applied to the focused form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEdit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Clear,
}

impl TextField {
    pub fn apply(&mut self, edit: FieldEdit) {
        match edit {
            FieldEdit::Insert(c) => self.insert(c),
            FieldEdit::Backspace => self.backspace(),
            FieldEdit::Delete => self.delete(),
            FieldEdit::Left => self.move_left(),
            FieldEdit::Right => self.move_right(),
            FieldEdit::Home => self.move_home(),
            FieldEdit::End => self.move_end(),
            FieldEdit::Clear => self.clear(),
        }
    }
}

/// Validated form contents, ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateParams {
    /// Trimmed topic, never empty
    pub topic: String,
    /// `YYYY-MM-DD`
    pub as_of: String,
}

/// Sidebar form state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub topic: TextField,
    pub as_of: TextField,
    /// Date used when the as-of field is left empty
    default_date: NaiveDate,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

impl FormState {
    /// Empty topic with the as-of field pre-filled with `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            topic: TextField::default(),
            as_of: TextField::new(today.format(DATE_FORMAT).to_string()),
            default_date: today,
        }
    }

    /// Check the form and produce request parameters.
    ///
    /// A blank topic or a malformed date is a [`Error::Validation`]; an empty
    /// date field falls back to the default date.
    pub fn validate(&self) -> Result<GenerateParams> {
        let topic = self.topic.value().trim();
        if topic.is_empty() {
            return Err(Error::validation(EMPTY_TOPIC_MESSAGE));
        }

        let raw_date = self.as_of.value().trim();
        let date = if raw_date.is_empty() {
            self.default_date
        } else {
            NaiveDate::parse_from_str(raw_date, DATE_FORMAT)
                .map_err(|_| Error::validation(INVALID_DATE_MESSAGE))?
        };

        Ok(GenerateParams {
            topic: topic.to_string(),
            as_of: date.format(DATE_FORMAT).to_string(),
        })
    }
}
