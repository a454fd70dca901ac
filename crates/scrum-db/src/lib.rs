//! # scrum-db
//!
//! libSQL persistence for scrumkit: users, projects, sprints,
//! retrospectives, and the task hierarchy stored under four table-mapping
//! strategies (single table, joined table, mapped superclass, component set).
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29) in local mode.
//! Repositories are `impl ScrumService` blocks for the plain entities and
//! one [`repos::tasks::TaskRepository`] implementation per strategy.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
mod unit_of_work;
pub mod updates;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

pub use unit_of_work::finish;

/// Central database handle.
///
/// Wraps a libSQL database and its single connection. An in-memory
/// database lives as long as that connection, so it is never reopened.
pub struct ScrumDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl ScrumDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Connection` if the database cannot be opened,
    /// or `DatabaseError::Migration` if the schema cannot be applied.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Connection(format!("{path}: {e}")))?;
        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Connection(format!("{path}: {e}")))?;

        // Foreign keys are per-connection in SQLite
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let scrum_db = Self { db, conn };
        scrum_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(scrum_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Start a unit of work. Pair every call with [`finish`].
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a transaction cannot be started.
    pub async fn begin(&self) -> Result<libsql::Transaction, DatabaseError> {
        Ok(self.conn.transaction().await?)
    }

    /// Id of the row inserted last on this connection.
    #[must_use]
    pub fn last_insert_id(&self) -> i64 {
        self.conn.last_insert_rowid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrum_core::enums::MappingStrategy;

    async fn test_db() -> ScrumDb {
        ScrumDb::open_local(":memory:").await.unwrap()
    }

    async fn table_exists(db: &ScrumDb, table: &str) -> bool {
        let mut rows = db
            .conn()
            .query(
                "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                [table],
            )
            .await
            .unwrap();
        rows.next().await.unwrap().is_some()
    }

    #[tokio::test]
    async fn open_local_creates_core_schema() {
        let db = test_db().await;
        let tables = [
            "users",
            "projects",
            "project_members",
            "sprints",
            "retrospectives",
            "retrospective_improvements",
            "retrospective_positives",
        ];
        for table in &tables {
            assert!(table_exists(&db, table).await, "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn open_local_creates_every_strategy_table() {
        let db = test_db().await;
        for strategy in MappingStrategy::ALL {
            for table in strategy.tables() {
                assert!(
                    table_exists(&db, table).await,
                    "{strategy} table '{table}' should exist"
                );
            }
        }
    }

    #[tokio::test]
    async fn mapped_superclass_has_no_base_table() {
        let db = test_db().await;
        assert!(!table_exists(&db, "tasks_mapped_superclass").await);
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn foreign_keys_enabled() {
        let db = test_db().await;
        let mut rows = db.conn().query("PRAGMA foreign_keys", ()).await.unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 1);
    }

    #[tokio::test]
    async fn sprint_date_check_is_enforced() {
        let db = test_db().await;
        db.conn()
            .execute("INSERT INTO projects (name) VALUES ('p')", ())
            .await
            .unwrap();
        let result = db
            .conn()
            .execute(
                "INSERT INTO sprints (project_id, start_date, end_date) VALUES (1, '2026-03-10', '2026-03-01')",
                (),
            )
            .await;
        let err: DatabaseError = result.unwrap_err().into();
        assert!(matches!(err, DatabaseError::Validation(_)), "{err:?}");
    }

    #[tokio::test]
    async fn single_table_bug_requires_severity() {
        let db = test_db().await;
        let result = db
            .conn()
            .execute(
                "INSERT INTO tasks_single_table (task_type, title, status, priority) VALUES ('BUG', 't', 'TO_DO', 'LOW')",
                (),
            )
            .await;
        assert!(result.is_err(), "BUG row without severity should be rejected");
    }

    #[tokio::test]
    async fn last_insert_id_tracks_inserts() {
        let db = test_db().await;
        db.conn()
            .execute("INSERT INTO projects (name) VALUES ('a')", ())
            .await
            .unwrap();
        db.conn()
            .execute("INSERT INTO projects (name) VALUES ('b')", ())
            .await
            .unwrap();
        assert_eq!(db.last_insert_id(), 2);
    }
}
