use std::io;
use std::path::PathBuf;

use rusqlite::{Error as SqlError, ErrorCode};
use thiserror::Error;

/// Failures surfaced by the record store. Not-found conditions are not errors;
/// they come back as `None` or `false` from the individual operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create data directory {}: {source}", path.display())]
    DataDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to open database {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: SqlError,
    },
    #[error("{action}: {source}")]
    Query {
        action: &'static str,
        #[source]
        source: SqlError,
    },
    #[error("User ID {0} already exists.")]
    DuplicateId(i64),
}

/// Attach a short description of the failing step, in the spirit of
/// `anyhow::Context`, while keeping the error typed.
pub(crate) trait StoreContext<T> {
    fn store_context(self, action: &'static str) -> Result<T, StoreError>;
}

impl<T> StoreContext<T> for Result<T, SqlError> {
    fn store_context(self, action: &'static str) -> Result<T, StoreError> {
        self.map_err(|source| StoreError::Query { action, source })
    }
}

/// Coerce a primary-key collision into [`StoreError::DuplicateId`]; anything
/// else stays a query failure.
pub(crate) fn map_unique_constraint(err: SqlError, id: i64, action: &'static str) -> StoreError {
    if matches!(
        err.sqlite_error_code(),
        Some(ErrorCode::ConstraintViolation)
    ) {
        StoreError::DuplicateId(id)
    } else {
        StoreError::Query { action, source: err }
    }
}
