//! Domain models that mirror the SQLite schema and get passed throughout the
//! TUI. These types stay light-weight data holders so other layers can focus on
//! presentation and persistence logic.

use std::fmt;

/// Column names of the `users` table, in select order. The CSV export reuses
/// them as its header row.
pub const COLUMNS: [&str; 6] = [
    "id",
    "numeric_value",
    "first_name",
    "last_name",
    "category",
    "mission",
];

/// A single row of the `users` table.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    /// Caller-assigned primary key. The store never generates ids.
    pub id: i64,
    /// Floating-point value aggregated by the statistics view.
    pub numeric_value: f64,
    /// Given name, at most 50 characters.
    pub first_name: String,
    /// Family name, at most 50 characters.
    pub last_name: String,
    /// Free-text grouping used by the per-category statistics.
    pub category: String,
    /// Free-text assignment shown in the table and searched like the names.
    pub mission: String,
}

impl UserRecord {
    /// `First Last`, as shown in confirmation dialogs.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Field values as strings in [`COLUMNS`] order.
    pub fn to_row(&self) -> [String; 6] {
        [
            self.id.to_string(),
            self.numeric_value.to_string(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.category.clone(),
            self.mission.clone(),
        ]
    }
}

impl fmt::Display for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Category: {}, Mission: {}, Value: {}",
            self.id,
            self.full_name(),
            self.category,
            self.mission,
            self.numeric_value
        )
    }
}

/// Aggregates over `numeric_value`. An empty table produces the all-zero
/// default rather than an error.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Statistics {
    /// Number of rows.
    pub count: i64,
    pub average: f64,
    pub max: f64,
    pub min: f64,
}

/// Per-category record count and average value for the statistics screen.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummary {
    /// Category text exactly as stored; grouping is case-sensitive.
    pub category: String,
    /// Rows carrying this category.
    pub count: i64,
    /// Mean `numeric_value` across those rows.
    pub average: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann() -> UserRecord {
        UserRecord {
            id: 1,
            numeric_value: 3.5,
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            category: "Ops".into(),
            mission: "Alpha".into(),
        }
    }

    #[test]
    fn display_includes_full_name_and_value() {
        assert_eq!(
            ann().to_string(),
            "ID: 1, Name: Ann Lee, Category: Ops, Mission: Alpha, Value: 3.5"
        );
    }

    #[test]
    fn row_follows_column_order() {
        let row = ann().to_row();
        assert_eq!(row[0], "1");
        assert_eq!(row[1], "3.5");
        assert_eq!(row[5], "Alpha");
        assert_eq!(row.len(), COLUMNS.len());
    }
}
