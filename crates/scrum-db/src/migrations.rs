//! Database migration runner.
//!
//! Embeds the SQL migration files at compile time and executes them on
//! database open. All statements use `IF NOT EXISTS` for idempotent re-running.

use crate::ScrumDb;
use crate::error::DatabaseError;

/// Users, projects, membership, sprints, retrospectives.
const MIGRATION_001: &str = include_str!("../migrations/001_core.sql");
/// Task hierarchy under the four mapping strategies.
const MIGRATION_002: &str = include_str!("../migrations/002_task_strategies.sql");

impl ScrumDb {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_core: {e}")))?;
        self.conn
            .execute_batch(MIGRATION_002)
            .await
            .map_err(|e| DatabaseError::Migration(format!("002_task_strategies: {e}")))?;
        Ok(())
    }
}
