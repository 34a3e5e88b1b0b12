use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, info, warn};

use super::connection::UserStore;
use super::error::{map_unique_constraint, StoreContext, StoreError};
use crate::models::{CategorySummary, Statistics, UserRecord};

/// Hydrate a record from a row selected in `COLUMNS` order.
fn map_user(row: &Row<'_>) -> rusqlite::Result<UserRecord> {
    Ok(UserRecord {
        id: row.get(0)?,
        numeric_value: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        category: row.get(4)?,
        mission: row.get(5)?,
    })
}

impl UserStore {
    /// Every record, ordered by id.
    pub fn list_all(&self) -> Result<Vec<UserRecord>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, numeric_value, first_name, last_name, category, mission
                 FROM users
                 ORDER BY id",
            )
            .store_context("failed to prepare user query")?;

        let users = stmt
            .query_map([], map_user)
            .store_context("failed to load users")?
            .collect::<Result<Vec<_>, _>>()
            .store_context("failed to collect users")?;

        debug!(count = users.len(), "listed users");
        Ok(users)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<UserRecord>, StoreError> {
        let conn = self.connect()?;
        conn.query_row(
            "SELECT id, numeric_value, first_name, last_name, category, mission
             FROM users
             WHERE id = ?1",
            params![id],
            map_user,
        )
        .optional()
        .store_context("failed to load user")
    }

    /// Insert a record with its caller-assigned id. Callers are expected to
    /// check [`UserStore::exists`] first; a collision that slips through comes
    /// back as [`StoreError::DuplicateId`].
    pub fn add(&self, user: &UserRecord) -> Result<bool, StoreError> {
        let conn = self.connect()?;
        let inserted = conn
            .execute(
                "INSERT INTO users (id, numeric_value, first_name, last_name, category, mission)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    user.id,
                    user.numeric_value,
                    user.first_name,
                    user.last_name,
                    user.category,
                    user.mission
                ],
            )
            .map_err(|err| map_unique_constraint(err, user.id, "failed to insert user"))?;

        info!(id = user.id, "added user");
        Ok(inserted > 0)
    }

    /// Replace every non-key column of the row matching `user.id`. Returns
    /// `false` when no such row exists.
    pub fn update(&self, user: &UserRecord) -> Result<bool, StoreError> {
        let conn = self.connect()?;
        let updated = conn
            .execute(
                "UPDATE users
                 SET numeric_value = ?1, first_name = ?2, last_name = ?3,
                     category = ?4, mission = ?5
                 WHERE id = ?6",
                params![
                    user.numeric_value,
                    user.first_name,
                    user.last_name,
                    user.category,
                    user.mission,
                    user.id
                ],
            )
            .store_context("failed to update user")?;

        if updated == 0 {
            warn!(id = user.id, "update matched no user");
        } else {
            info!(id = user.id, "updated user");
        }
        Ok(updated > 0)
    }

    /// Remove the row with `id`, reporting whether anything was deleted.
    pub fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let conn = self.connect()?;
        let deleted = conn
            .execute("DELETE FROM users WHERE id = ?1", params![id])
            .store_context("failed to delete user")?;

        if deleted == 0 {
            warn!(id, "delete matched no user");
        } else {
            info!(id, "deleted user");
        }
        Ok(deleted > 0)
    }

    /// Records whose first name, last name, category or mission contains
    /// `term`, ignoring case (Unicode lowercase folding), ordered by id. The
    /// term is matched literally and an empty term matches everything.
    pub fn search(&self, term: &str) -> Result<Vec<UserRecord>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, numeric_value, first_name, last_name, category, mission
                 FROM users
                 WHERE instr(fold_case(first_name), fold_case(?1)) > 0
                    OR instr(fold_case(last_name), fold_case(?1)) > 0
                    OR instr(fold_case(category), fold_case(?1)) > 0
                    OR instr(fold_case(mission), fold_case(?1)) > 0
                 ORDER BY id",
            )
            .store_context("failed to prepare search query")?;

        let users = stmt
            .query_map(params![term], map_user)
            .store_context("failed to search users")?
            .collect::<Result<Vec<_>, _>>()
            .store_context("failed to collect search results")?;

        debug!(term, count = users.len(), "searched users");
        Ok(users)
    }

    pub fn exists(&self, id: i64) -> Result<bool, StoreError> {
        let conn = self.connect()?;
        conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)",
            params![id],
            |row| row.get(0),
        )
        .store_context("failed to check user existence")
    }

    /// Count, average, max and min of `numeric_value`. SQLite returns NULL for
    /// the aggregates of an empty table; those become zero.
    pub fn statistics(&self) -> Result<Statistics, StoreError> {
        let conn = self.connect()?;
        conn.query_row(
            "SELECT COUNT(*), AVG(numeric_value), MAX(numeric_value), MIN(numeric_value)
             FROM users",
            [],
            |row| {
                Ok(Statistics {
                    count: row.get(0)?,
                    average: row.get::<_, Option<f64>>(1)?.unwrap_or(0.0),
                    max: row.get::<_, Option<f64>>(2)?.unwrap_or(0.0),
                    min: row.get::<_, Option<f64>>(3)?.unwrap_or(0.0),
                })
            },
        )
        .store_context("failed to compute statistics")
    }

    /// Record count and average value per category, ordered by category name
    /// ignoring case.
    pub fn category_summaries(&self) -> Result<Vec<CategorySummary>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn
            .prepare(
                "SELECT category, COUNT(*), AVG(numeric_value)
                 FROM users
                 GROUP BY category
                 ORDER BY category COLLATE NOCASE, category",
            )
            .store_context("failed to prepare category query")?;

        let summaries = stmt
            .query_map([], |row| {
                Ok(CategorySummary {
                    category: row.get(0)?,
                    count: row.get(1)?,
                    average: row.get::<_, Option<f64>>(2)?.unwrap_or(0.0),
                })
            })
            .store_context("failed to load category summaries")?
            .collect::<Result<Vec<_>, _>>()
            .store_context("failed to collect category summaries")?;

        Ok(summaries)
    }
}
