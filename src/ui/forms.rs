use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::UserRecord;
use crate::validation::{validate_record, RawRecord, RecordField, ValidationError};

/// Whether the details form is blank-ish or was populated from a table row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum FormState {
    Idle,
    Editing { id: i64 },
}

/// Text behind each field of the details form, plus focus and the inline
/// validation message.
#[derive(Default, Clone, Debug)]
pub(crate) struct UserForm {
    pub(crate) id: String,
    pub(crate) numeric_value: String,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) category: String,
    pub(crate) mission: String,
    pub(crate) active: RecordField,
    pub(crate) error: Option<String>,
    loaded_id: Option<i64>,
}

impl UserForm {
    /// Populate the form from a selected row.
    pub(crate) fn from_record(record: &UserRecord) -> Self {
        Self {
            id: record.id.to_string(),
            numeric_value: record.numeric_value.to_string(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            category: record.category.clone(),
            mission: record.mission.clone(),
            active: RecordField::Id,
            error: None,
            loaded_id: Some(record.id),
        }
    }

    pub(crate) fn state(&self) -> FormState {
        match self.loaded_id {
            Some(id) => FormState::Editing { id },
            None => FormState::Idle,
        }
    }

    /// Empty every field and drop back to idle.
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn value(&self, field: RecordField) -> &str {
        match field {
            RecordField::Id => &self.id,
            RecordField::NumericValue => &self.numeric_value,
            RecordField::FirstName => &self.first_name,
            RecordField::LastName => &self.last_name,
            RecordField::Category => &self.category,
            RecordField::Mission => &self.mission,
        }
    }

    fn value_mut(&mut self, field: RecordField) -> &mut String {
        match field {
            RecordField::Id => &mut self.id,
            RecordField::NumericValue => &mut self.numeric_value,
            RecordField::FirstName => &mut self.first_name,
            RecordField::LastName => &mut self.last_name,
            RecordField::Category => &mut self.category,
            RecordField::Mission => &mut self.mission,
        }
    }

    pub(crate) fn focus(&mut self, field: RecordField) {
        self.active = field;
    }

    /// Move focus forward, wrapping from the last field to the first.
    pub(crate) fn next_field(&mut self) {
        let index = self.active_index();
        self.active = RecordField::ALL[(index + 1) % RecordField::ALL.len()];
    }

    pub(crate) fn previous_field(&mut self) {
        let len = RecordField::ALL.len();
        let index = self.active_index();
        self.active = RecordField::ALL[(index + len - 1) % len];
    }

    fn active_index(&self) -> usize {
        RecordField::ALL
            .iter()
            .position(|field| *field == self.active)
            .unwrap_or(0)
    }

    /// Append a character to the active field. Control characters are
    /// ignored.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        let field = self.active;
        self.value_mut(field).push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        let field = self.active;
        self.value_mut(field).pop();
    }

    /// Validate the inputs and return a record ready for persistence.
    pub(crate) fn parse_inputs(&self) -> Result<UserRecord, ValidationError> {
        validate_record(&RawRecord {
            id: &self.id,
            numeric_value: &self.numeric_value,
            first_name: &self.first_name,
            last_name: &self.last_name,
            category: &self.category,
            mission: &self.mission,
        })
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: RecordField, focused: bool) -> Line<'static> {
        let value = self.value(field);
        let is_active = focused && self.active == field;

        let display = if value.is_empty() {
            "<required>".to_string()
        } else {
            value.to_string()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    /// Character count of the requested field, for cursor placement.
    pub(crate) fn value_len(&self, field: RecordField) -> usize {
        self.value(field).chars().count()
    }
}

/// Pending delete awaiting a yes/no answer.
#[derive(Clone, Debug)]
pub(crate) struct ConfirmDelete {
    pub(crate) id: i64,
    /// The matching row when it is among the displayed results, so the dialog
    /// can name it.
    pub(crate) record: Option<UserRecord>,
}

/// Save-file prompt for the CSV export.
#[derive(Clone, Debug)]
pub(crate) struct ExportPrompt {
    pub(crate) path: String,
    pub(crate) error: Option<String>,
}

impl ExportPrompt {
    pub(crate) fn new(path: String) -> Self {
        Self { path, error: None }
    }

    pub(crate) fn push_char(&mut self, ch: char) {
        if !ch.is_control() {
            self.path.push(ch);
            self.error = None;
        }
    }

    pub(crate) fn backspace(&mut self) {
        self.path.pop();
    }
}

/// Modal dialog used for store and export failures.
#[derive(Clone, Debug)]
pub(crate) struct Alert {
    pub(crate) title: String,
    pub(crate) message: String,
}
