//! Service layer over the database handle.
//!
//! `ScrumService` wraps `ScrumDb`. The plain entities (users, projects,
//! membership, sprints, retrospectives) are implemented as `impl ScrumService`
//! blocks in `repos/`; the task hierarchy is reached through one repository
//! per mapping strategy.

use scrum_core::entities::{BugDetails, FeatureDetails};

use crate::ScrumDb;
use crate::error::DatabaseError;
use crate::repos::tasks::component_set::ComponentSetTasks;
use crate::repos::tasks::joined_table::JoinedTableTasks;
use crate::repos::tasks::mapped_superclass::MappedSuperclassTasks;
use crate::repos::tasks::single_table::SingleTableTasks;

pub struct ScrumService {
    db: ScrumDb,
}

impl ScrumService {
    /// Open a local database and wrap it.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = ScrumDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    #[must_use]
    pub const fn from_db(db: ScrumDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &ScrumDb {
        &self.db
    }

    #[must_use]
    pub const fn single_table_tasks(&self) -> SingleTableTasks<'_> {
        SingleTableTasks::new(&self.db)
    }

    #[must_use]
    pub const fn joined_table_tasks(&self) -> JoinedTableTasks<'_> {
        JoinedTableTasks::new(&self.db)
    }

    #[must_use]
    pub const fn mapped_bug_tasks(&self) -> MappedSuperclassTasks<'_, BugDetails> {
        MappedSuperclassTasks::new(&self.db)
    }

    #[must_use]
    pub const fn mapped_feature_tasks(&self) -> MappedSuperclassTasks<'_, FeatureDetails> {
        MappedSuperclassTasks::new(&self.db)
    }

    #[must_use]
    pub const fn component_set_tasks(&self) -> ComponentSetTasks<'_> {
        ComponentSetTasks::new(&self.db)
    }
}
