use std::fs;

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use tracing::{debug, info};

use super::error::{StoreContext, StoreError};
use crate::config::ConnectionConfig;

/// Handle on the `users` table. The store keeps only the connection
/// descriptor; every operation opens its own connection and drops it when
/// done, so there is no shared connection state between calls.
#[derive(Debug, Clone)]
pub struct UserStore {
    config: ConnectionConfig,
}

impl UserStore {
    /// Ensure the data directory and table exist, then hand back a store bound
    /// to `config`.
    pub fn open(config: ConnectionConfig) -> Result<Self, StoreError> {
        fs::create_dir_all(&config.data_dir).map_err(|source| StoreError::DataDir {
            path: config.data_dir.clone(),
            source,
        })?;

        let store = Self { config };
        let conn = store.connect()?;
        ensure_schema(&conn)?;
        info!(path = %store.config.database_path().display(), "record store ready");
        Ok(store)
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Open a fresh connection to the configured database file.
    pub(crate) fn connect(&self) -> Result<Connection, StoreError> {
        let path = self.config.database_path();
        debug!(path = %path.display(), "opening connection");
        let conn =
            Connection::open(&path).map_err(|source| StoreError::Open { path, source })?;
        register_functions(&conn)?;
        Ok(conn)
    }
}

/// `fold_case(text)`: Unicode lowercase, so searches ignore case beyond ASCII.
/// SQLite's own `lower` and `LIKE` only fold A-Z.
fn register_functions(conn: &Connection) -> Result<(), StoreError> {
    conn.create_scalar_function(
        "fold_case",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|text| text.to_lowercase())),
    )
    .store_context("failed to register fold_case")
}

/// Create the `users` table if this is a fresh database. `id` is supplied by
/// the caller, so it is a plain integer primary key with no autoincrement.
fn ensure_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY,
            numeric_value REAL NOT NULL,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            category TEXT NOT NULL,
            mission TEXT NOT NULL
        )",
        [],
    )
    .store_context("failed to create users table")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_case_lowercases_beyond_ascii() {
        let dir = tempfile::tempdir().unwrap();
        let store = UserStore::open(ConnectionConfig::new(dir.path(), "users")).unwrap();
        let conn = store.connect().unwrap();
        let folded: String = conn
            .query_row("SELECT fold_case('ÉMILE Özil')", [], |row| row.get(0))
            .unwrap();
        assert_eq!(folded, "émile özil");
    }
}
