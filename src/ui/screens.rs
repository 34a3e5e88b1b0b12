use crate::models::{CategorySummary, Statistics, UserRecord};

/// Rows currently shown in the record table: either every user or the
/// results of the active search.
#[derive(Default)]
pub(crate) struct RecordTable {
    pub(crate) records: Vec<UserRecord>,
    pub(crate) filter: Option<String>,
    pub(crate) selected: usize,
}

impl RecordTable {
    /// Swap in a fresh result set, keeping the selection in range.
    pub(crate) fn set_records(&mut self, records: Vec<UserRecord>, filter: Option<String>) {
        self.records = records;
        self.filter = filter;
        self.ensure_in_bounds();
    }

    pub(crate) fn current_record(&self) -> Option<&UserRecord> {
        self.records.get(self.selected)
    }

    pub(crate) fn find(&self, id: i64) -> Option<&UserRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.records.is_empty() {
            return;
        }
        let len = self.records.len() as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        if !self.records.is_empty() {
            self.selected = 0;
        }
    }

    pub(crate) fn select_last(&mut self) {
        if !self.records.is_empty() {
            self.selected = self.records.len() - 1;
        }
    }

    fn ensure_in_bounds(&mut self) {
        if self.records.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.records.len() {
            self.selected = self.records.len() - 1;
        }
    }
}

/// Aggregates shown on the statistics screen, recomputed after every
/// successful change.
#[derive(Default)]
pub(crate) struct StatisticsPanel {
    pub(crate) totals: Statistics,
    pub(crate) categories: Vec<CategorySummary>,
}

impl StatisticsPanel {
    pub(crate) fn summary_lines(&self) -> [String; 4] {
        [
            format!("Total users: {}", self.totals.count),
            format!("Average value: {:.2}", self.totals.average),
            format!("Max value: {:.2}", self.totals.max),
            format!("Min value: {:.2}", self.totals.min),
        ]
    }
}
