//! CSV export of whatever rows the record table is currently showing.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::info;

use crate::models::{UserRecord, COLUMNS};

/// `users_YYYYMMDD_HHMMSS.csv` for the given moment.
pub fn default_file_name(now: DateTime<Local>) -> String {
    format!("users_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

/// Write a header row of column names followed by one line per record. Fields
/// are quoted only when they contain a delimiter, a quote or a line break, with
/// inner quotes doubled.
pub fn write_csv<W: Write>(writer: W, records: &[UserRecord]) -> Result<()> {
    let mut csv = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(COLUMNS)
        .context("failed to write CSV header")?;
    for record in records {
        csv.write_record(record.to_row())
            .with_context(|| format!("failed to write CSV row for user {}", record.id))?;
    }
    csv.flush().context("failed to flush CSV output")?;
    Ok(())
}

/// Create (or truncate) `path` and export `records` into it, returning how many
/// rows were written.
pub fn export_to_file(path: &Path, records: &[UserRecord]) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    write_csv(file, records)?;
    info!(path = %path.display(), rows = records.len(), "exported users");
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(id: i64, last_name: &str, mission: &str) -> UserRecord {
        UserRecord {
            id,
            numeric_value: 1.5,
            first_name: "John".into(),
            last_name: last_name.into(),
            category: "Ops".into(),
            mission: mission.into(),
        }
    }

    fn render(records: &[UserRecord]) -> String {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, records).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn header_lists_column_names() {
        assert_eq!(
            render(&[]),
            "id,numeric_value,first_name,last_name,category,mission\n"
        );
    }

    #[test]
    fn comma_fields_are_quoted() {
        let output = render(&[record(1, "Smith, Jr.", "Alpha"), record(2, "Doe", "Beta")]);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "1,1.5,John,\"Smith, Jr.\",Ops,Alpha");
        assert_eq!(lines[2], "2,1.5,John,Doe,Ops,Beta");
    }

    #[test]
    fn quotes_are_doubled_and_newlines_quoted() {
        let output = render(&[record(3, "O\"Neil", "line one\nline two")]);
        assert!(output.contains("\"O\"\"Neil\""));
        assert!(output.contains("\"line one\nline two\""));
    }

    #[test]
    fn plain_fields_stay_unquoted() {
        let output = render(&[record(4, "Lee", "Alpha Beta")]);
        assert!(output.ends_with("4,1.5,John,Lee,Ops,Alpha Beta\n"));
    }

    #[test]
    fn default_name_embeds_timestamp() {
        let when = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap();
        assert_eq!(default_file_name(when), "users_20240307_090502.csv");
    }

    #[test]
    fn export_to_file_writes_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.csv");
        let written = export_to_file(&path, &[record(1, "Lee", "Alpha")]).unwrap();
        assert_eq!(written, 1);
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }
}
