//! Input checks applied to the details form before anything reaches the store.
//! The predicates are pure; [`validate_record`] strings them together in the
//! order the form reports problems, stopping at the first one.

use thiserror::Error;

use crate::models::UserRecord;

/// Longest first or last name accepted, counted in characters.
pub const MAX_NAME_LENGTH: usize = 50;

/// Fields of the details form, in tab order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RecordField {
    #[default]
    Id,
    NumericValue,
    FirstName,
    LastName,
    Category,
    Mission,
}

impl RecordField {
    pub const ALL: [RecordField; 6] = [
        RecordField::Id,
        RecordField::NumericValue,
        RecordField::FirstName,
        RecordField::LastName,
        RecordField::Category,
        RecordField::Mission,
    ];

    /// Label used both in the form and in validation messages.
    pub fn label(self) -> &'static str {
        match self {
            RecordField::Id => "User ID",
            RecordField::NumericValue => "Numeric value",
            RecordField::FirstName => "First name",
            RecordField::LastName => "Last name",
            RecordField::Category => "Category",
            RecordField::Mission => "Mission",
        }
    }
}

/// The single message reported for a rejected form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid numeric user ID.")]
    InvalidId,
    #[error("User ID must be a positive number.")]
    NonPositiveId,
    #[error("Please enter a valid numeric value.")]
    InvalidNumericValue,
    #[error("{} cannot be empty.", .0.label())]
    Empty(RecordField),
    #[error("{} cannot exceed {max} characters.", .field.label())]
    TooLong { field: RecordField, max: usize },
}

impl ValidationError {
    /// Field the form should focus so the user can fix the problem.
    pub fn field(&self) -> RecordField {
        match self {
            ValidationError::InvalidId | ValidationError::NonPositiveId => RecordField::Id,
            ValidationError::InvalidNumericValue => RecordField::NumericValue,
            ValidationError::Empty(field) => *field,
            ValidationError::TooLong { field, .. } => *field,
        }
    }
}

/// Unparsed form contents.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawRecord<'a> {
    pub id: &'a str,
    pub numeric_value: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub category: &'a str,
    pub mission: &'a str,
}

pub fn parse_integer(input: &str) -> Option<i64> {
    input.trim().parse().ok()
}

/// Parse a float, refusing NaN and the infinities.
pub fn parse_float(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

pub fn is_not_empty(input: &str) -> bool {
    !input.trim().is_empty()
}

/// Character count at most `max`. An empty string always passes; emptiness is
/// [`is_not_empty`]'s concern.
pub fn has_max_length(input: &str, max: usize) -> bool {
    input.chars().count() <= max
}

/// Character count at least `min`. An empty string always fails.
pub fn has_min_length(input: &str, min: usize) -> bool {
    !input.is_empty() && input.chars().count() >= min
}

pub fn is_positive_integer(value: i64) -> bool {
    value > 0
}

/// Letters and whitespace only, with at least one non-blank character.
/// Letters outside ASCII count, so names such as `Zoë` pass.
pub fn is_alphabetic_with_spaces(input: &str) -> bool {
    is_not_empty(input)
        && input
            .chars()
            .all(|ch| ch.is_alphabetic() || ch.is_whitespace())
}

/// Inclusive on both ends.
pub fn is_in_range(value: f64, min: f64, max: f64) -> bool {
    value >= min && value <= max
}

/// Check the form in display order and build the record to persist. Text
/// fields come back trimmed.
pub fn validate_record(raw: &RawRecord<'_>) -> Result<UserRecord, ValidationError> {
    let id = parse_integer(raw.id).ok_or(ValidationError::InvalidId)?;
    if !is_positive_integer(id) {
        return Err(ValidationError::NonPositiveId);
    }

    let numeric_value =
        parse_float(raw.numeric_value).ok_or(ValidationError::InvalidNumericValue)?;

    let first_name = required_text(raw.first_name, RecordField::FirstName, Some(MAX_NAME_LENGTH))?;
    let last_name = required_text(raw.last_name, RecordField::LastName, Some(MAX_NAME_LENGTH))?;
    let category = required_text(raw.category, RecordField::Category, None)?;
    let mission = required_text(raw.mission, RecordField::Mission, None)?;

    Ok(UserRecord {
        id,
        numeric_value,
        first_name,
        last_name,
        category,
        mission,
    })
}

fn required_text(
    input: &str,
    field: RecordField,
    max: Option<usize>,
) -> Result<String, ValidationError> {
    if !is_not_empty(input) {
        return Err(ValidationError::Empty(field));
    }
    let trimmed = input.trim();
    if let Some(max) = max {
        if !has_max_length(trimmed, max) {
            return Err(ValidationError::TooLong { field, max });
        }
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> RawRecord<'static> {
        RawRecord {
            id: "1",
            numeric_value: "3.5",
            first_name: "Ann",
            last_name: "Lee",
            category: "Ops",
            mission: "Alpha",
        }
    }

    #[test]
    fn parses_numbers_with_surrounding_whitespace() {
        assert_eq!(parse_integer(" 42 "), Some(42));
        assert_eq!(parse_integer("4.2"), None);
        assert_eq!(parse_integer(""), None);
        assert_eq!(parse_float(" -1.25"), Some(-1.25));
        assert_eq!(parse_float("abc"), None);
    }

    #[test]
    fn non_finite_floats_are_rejected() {
        assert_eq!(parse_float("NaN"), None);
        assert_eq!(parse_float("inf"), None);
        assert_eq!(parse_float("-infinity"), None);
    }

    #[test]
    fn alphabetic_with_spaces_rejects_digits_and_blanks() {
        assert!(is_alphabetic_with_spaces("Mary Ann"));
        assert!(is_alphabetic_with_spaces("Zoë Ölund"));
        assert!(!is_alphabetic_with_spaces("R2D2"));
        assert!(!is_alphabetic_with_spaces("O'Brien"));
        assert!(!is_alphabetic_with_spaces("   "));
        assert!(!is_alphabetic_with_spaces(""));
    }

    #[test]
    fn emptiness_ignores_whitespace() {
        assert!(is_not_empty(" x "));
        assert!(!is_not_empty(""));
        assert!(!is_not_empty(" \t\n"));
    }

    #[test]
    fn length_checks_count_characters() {
        assert!(has_max_length("", 0));
        assert!(has_max_length("ééé", 3));
        assert!(!has_max_length("abcd", 3));
        assert!(!has_min_length("", 0));
        assert!(has_min_length("ab", 2));
        assert!(!has_min_length("a", 2));
    }

    #[test]
    fn positivity_and_ranges() {
        assert!(is_positive_integer(1));
        assert!(!is_positive_integer(0));
        assert!(!is_positive_integer(-7));
        assert!(is_in_range(1.0, 1.0, 2.0));
        assert!(is_in_range(2.0, 1.0, 2.0));
        assert!(!is_in_range(2.5, 1.0, 2.0));
    }

    #[test]
    fn valid_form_produces_trimmed_record() {
        let raw = RawRecord {
            first_name: "  Ann ",
            mission: "Alpha  ",
            ..valid()
        };
        let record = validate_record(&raw).unwrap();
        assert_eq!(
            record,
            UserRecord {
                id: 1,
                numeric_value: 3.5,
                first_name: "Ann".into(),
                last_name: "Lee".into(),
                category: "Ops".into(),
                mission: "Alpha".into(),
            }
        );
    }

    #[test]
    fn reports_only_the_first_failure() {
        let raw = RawRecord {
            id: "x",
            numeric_value: "y",
            first_name: "",
            ..valid()
        };
        assert_eq!(validate_record(&raw), Err(ValidationError::InvalidId));

        let raw = RawRecord {
            id: "0",
            numeric_value: "y",
            ..valid()
        };
        assert_eq!(validate_record(&raw), Err(ValidationError::NonPositiveId));

        let raw = RawRecord {
            numeric_value: "y",
            last_name: "",
            ..valid()
        };
        assert_eq!(
            validate_record(&raw),
            Err(ValidationError::InvalidNumericValue)
        );
    }

    #[test]
    fn text_fields_are_checked_in_order() {
        let raw = RawRecord {
            last_name: " ",
            category: "",
            ..valid()
        };
        let err = validate_record(&raw).unwrap_err();
        assert_eq!(err, ValidationError::Empty(RecordField::LastName));
        assert_eq!(err.to_string(), "Last name cannot be empty.");
        assert_eq!(err.field(), RecordField::LastName);

        let raw = RawRecord {
            mission: "",
            ..valid()
        };
        assert_eq!(
            validate_record(&raw),
            Err(ValidationError::Empty(RecordField::Mission))
        );
    }

    #[test]
    fn names_longer_than_fifty_characters_fail() {
        let long = "a".repeat(MAX_NAME_LENGTH + 1);
        let raw = RawRecord {
            first_name: &long,
            ..valid()
        };
        let err = validate_record(&raw).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooLong {
                field: RecordField::FirstName,
                max: MAX_NAME_LENGTH
            }
        );
        assert_eq!(err.to_string(), "First name cannot exceed 50 characters.");

        let exact = "b".repeat(MAX_NAME_LENGTH);
        let raw = RawRecord {
            last_name: &exact,
            ..valid()
        };
        assert!(validate_record(&raw).is_ok());
    }

    #[test]
    fn category_and_mission_have_no_length_cap() {
        let long = "c".repeat(500);
        let raw = RawRecord {
            category: &long,
            mission: &long,
            ..valid()
        };
        assert!(validate_record(&raw).is_ok());
    }
}
