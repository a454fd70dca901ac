//! Mapped-superclass strategy: no table for the abstract task. Each
//! concrete subclass table repeats the common columns next to its own, and
//! owns its own id sequence and comment set.
//!
//! One generic repository serves both subclasses; [`MappedTable`] supplies
//! the table names and the subclass column codec.

use std::collections::BTreeSet;
use std::marker::PhantomData;

use scrum_core::entities::{
    BugDetails, FeatureDetails, MappedSuperclassTask, NewMappedSuperclassTask, Subclass, TaskCore,
};
use scrum_core::enums::MappingStrategy;
use scrum_core::validate;

use super::{
    CORE_COLS, TaskFilter, TaskRepository, core_params, placeholders, row_exists, row_to_core,
    stored_bug, stored_core, stored_feature, update_core, where_clause,
};
use crate::ScrumDb;
use crate::error::DatabaseError;
use crate::finish;
use crate::helpers::{get_opt_string, get_u8, opt_text, parse_enum};
use crate::repos::delete_row;
use crate::updates::task::TaskUpdate;

/// Storage layout of one concrete subclass under the mapped superclass.
pub trait MappedTable: Subclass {
    const TABLE: &'static str;
    const COMMENTS_TABLE: &'static str;
    const ENTITY: &'static str;
    /// Subclass columns, in the order of [`Self::detail_params`].
    const DETAIL_COLS: &'static str;

    fn detail_params(&self) -> [libsql::Value; 2];

    /// Decode the subclass columns starting at column `first`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a column is missing or malformed.
    fn from_row(row: &libsql::Row, first: i32) -> Result<Self, DatabaseError>;

    /// The details as a later read returns them.
    #[must_use]
    fn stored(&self) -> Self;
}

impl MappedTable for BugDetails {
    const TABLE: &'static str = "bug_tasks_mapped_superclass";
    const COMMENTS_TABLE: &'static str = "bug_task_comments_mapped_superclass";
    const ENTITY: &'static str = "MappedBugTask";
    const DETAIL_COLS: &'static str = "severity, steps_to_reproduce";

    fn detail_params(&self) -> [libsql::Value; 2] {
        [
            self.severity.as_str().into(),
            opt_text(self.steps_to_reproduce.as_deref()),
        ]
    }

    fn from_row(row: &libsql::Row, first: i32) -> Result<Self, DatabaseError> {
        Ok(Self {
            severity: parse_enum(&row.get::<String>(first)?)?,
            steps_to_reproduce: get_opt_string(row, first + 1)?,
        })
    }

    fn stored(&self) -> Self {
        stored_bug(self)
    }
}

impl MappedTable for FeatureDetails {
    const TABLE: &'static str = "feature_tasks_mapped_superclass";
    const COMMENTS_TABLE: &'static str = "feature_task_comments_mapped_superclass";
    const ENTITY: &'static str = "MappedFeatureTask";
    const DETAIL_COLS: &'static str = "business_value, acceptance_criteria";

    fn detail_params(&self) -> [libsql::Value; 2] {
        [
            libsql::Value::Integer(i64::from(self.business_value)),
            opt_text(self.acceptance_criteria.as_deref()),
        ]
    }

    fn from_row(row: &libsql::Row, first: i32) -> Result<Self, DatabaseError> {
        Ok(Self {
            business_value: get_u8(row, first)?,
            acceptance_criteria: get_opt_string(row, first + 1)?,
        })
    }

    fn stored(&self) -> Self {
        stored_feature(self)
    }
}

pub struct MappedSuperclassTasks<'a, D> {
    db: &'a ScrumDb,
    _subclass: PhantomData<D>,
}

impl<'a, D: MappedTable> MappedSuperclassTasks<'a, D> {
    #[must_use]
    pub const fn new(db: &'a ScrumDb) -> Self {
        Self {
            db,
            _subclass: PhantomData,
        }
    }

    fn select_cols() -> String {
        format!("t.id, {CORE_COLS}, {}", D::DETAIL_COLS)
    }

    async fn comments(&self, id: i64) -> Result<BTreeSet<String>, DatabaseError> {
        let mut rows = self
            .db
            .conn()
            .query(
                &format!("SELECT comment FROM {} WHERE task_id = ?1", D::COMMENTS_TABLE),
                [id],
            )
            .await?;
        let mut comments = BTreeSet::new();
        while let Some(row) = rows.next().await? {
            comments.insert(row.get::<String>(0)?);
        }
        Ok(comments)
    }

    fn decode(row: &libsql::Row) -> Result<(i64, TaskCore, D), DatabaseError> {
        Ok((row.get(0)?, row_to_core(row, 1)?, D::from_row(row, 7)?))
    }

    async fn assemble(
        &self,
        (id, core, details): (i64, TaskCore, D),
    ) -> Result<MappedSuperclassTask<D>, DatabaseError> {
        Ok(MappedSuperclassTask {
            id,
            core,
            details,
            comments: self.comments(id).await?,
        })
    }

    /// Add a comment to the set. Returns `false` if it was already there.
    pub async fn add_comment(&self, id: i64, comment: &str) -> Result<bool, DatabaseError> {
        validate::non_blank("comment", comment)?;
        let tx = self.db.begin().await?;
        let result: Result<bool, DatabaseError> = async {
            if !row_exists(&tx, D::TABLE, "id", id).await? {
                return Err(DatabaseError::not_found(D::ENTITY, id));
            }
            let inserted = tx
                .execute(
                    &format!(
                        "INSERT OR IGNORE INTO {} (task_id, comment) VALUES (?1, ?2)",
                        D::COMMENTS_TABLE
                    ),
                    libsql::params![id, comment],
                )
                .await?;
            Ok(inserted > 0)
        }
        .await;
        finish(tx, "mapped_superclass_add_comment", result).await
    }

    /// Returns `false` if the comment was not in the set.
    pub async fn remove_comment(&self, id: i64, comment: &str) -> Result<bool, DatabaseError> {
        let tx = self.db.begin().await?;
        let result = tx
            .execute(
                &format!(
                    "DELETE FROM {} WHERE task_id = ?1 AND comment = ?2",
                    D::COMMENTS_TABLE
                ),
                libsql::params![id, comment],
            )
            .await
            .map(|n| n > 0)
            .map_err(DatabaseError::from);
        finish(tx, "mapped_superclass_remove_comment", result).await
    }
}

impl<D: MappedTable> TaskRepository for MappedSuperclassTasks<'_, D> {
    type Task = MappedSuperclassTask<D>;
    type NewTask = NewMappedSuperclassTask<D>;

    const STRATEGY: MappingStrategy = MappingStrategy::MappedSuperclass;

    async fn create(
        &self,
        new: &NewMappedSuperclassTask<D>,
    ) -> Result<MappedSuperclassTask<D>, DatabaseError> {
        new.validate()?;
        for comment in &new.comments {
            validate::non_blank("comment", comment)?;
        }

        let mut params = core_params(&new.core);
        params.extend(new.details.detail_params());
        let sql = format!(
            "INSERT INTO {} ({CORE_COLS}, {}) VALUES ({})",
            D::TABLE,
            D::DETAIL_COLS,
            placeholders(1, params.len())
        );

        let tx = self.db.begin().await?;
        let result: Result<i64, DatabaseError> = async {
            tx.execute(&sql, libsql::params_from_iter(params)).await?;
            let id = tx.last_insert_rowid();
            for comment in &new.comments {
                tx.execute(
                    &format!(
                        "INSERT INTO {} (task_id, comment) VALUES (?1, ?2)",
                        D::COMMENTS_TABLE
                    ),
                    libsql::params![id, comment.as_str()],
                )
                .await?;
            }
            Ok(id)
        }
        .await;
        let id = finish(tx, "mapped_superclass_create", result).await?;

        Ok(MappedSuperclassTask {
            id,
            core: stored_core(&new.core),
            details: new.details.stored(),
            comments: new.comments.clone(),
        })
    }

    async fn get(&self, id: i64) -> Result<MappedSuperclassTask<D>, DatabaseError> {
        let mut rows = self
            .db
            .conn()
            .query(
                &format!(
                    "SELECT {} FROM {} t WHERE t.id = ?1",
                    Self::select_cols(),
                    D::TABLE
                ),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(D::ENTITY, id))?;
        self.assemble(Self::decode(&row)?).await
    }

    async fn update(
        &self,
        id: i64,
        update: &TaskUpdate,
    ) -> Result<MappedSuperclassTask<D>, DatabaseError> {
        update_core(
            self.db,
            "mapped_superclass_update",
            D::ENTITY,
            D::TABLE,
            id,
            update,
        )
        .await?;
        self.get(id).await
    }

    async fn delete(&self, id: i64) -> Result<(), DatabaseError> {
        delete_row(self.db, "mapped_superclass_delete", D::TABLE, D::ENTITY, id).await
    }

    async fn list(&self, filter: &TaskFilter) -> Result<Vec<MappedSuperclassTask<D>>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params = Vec::new();
        filter.push_conditions("t", &mut conditions, &mut params);
        let sql = format!(
            "SELECT {} FROM {} t {} ORDER BY t.id LIMIT {}",
            Self::select_cols(),
            D::TABLE,
            where_clause(&conditions),
            filter.limit
        );
        let mut rows = self
            .db
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        // Rows read from the live statement, so decode before the next step.
        let mut found = Vec::new();
        while let Some(row) = rows.next().await? {
            found.push(Self::decode(&row)?);
        }
        let mut tasks = Vec::with_capacity(found.len());
        for decoded in found {
            tasks.push(self.assemble(decoded).await?);
        }
        Ok(tasks)
    }
}
