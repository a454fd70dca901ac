//! Single-table strategy: one row per task in `tasks_single_table`.
//!
//! `task_type` is the discriminator. Bug and feature columns are nullable
//! and only filled for their own type. Attachments are a set of names.

use std::collections::BTreeSet;

use scrum_core::entities::{
    BugDetails, FeatureDetails, NewSingleTableTask, SingleTableTask, TaskCore, TaskKind,
};
use scrum_core::enums::{MappingStrategy, TaskType};
use scrum_core::validate;

use super::{
    CORE_COLS, TaskFilter, TaskRepository, core_cols, core_params, placeholders, row_exists,
    row_to_core, stored_core, stored_kind, update_core, where_clause,
};
use crate::ScrumDb;
use crate::error::DatabaseError;
use crate::finish;
use crate::helpers::{get_opt_string, get_u8, opt_text, parse_enum};
use crate::repos::delete_row;
use crate::updates::task::TaskUpdate;

const TABLE: &str = "tasks_single_table";
const ATTACHMENTS: &str = "task_attachments_single_table";
const ENTITY: &str = "SingleTableTask";

fn select_cols() -> String {
    format!(
        "t.id, t.task_type, {}, t.severity, t.steps_to_reproduce, t.business_value, t.acceptance_criteria",
        core_cols("t")
    )
}

/// Values for `severity, steps_to_reproduce, business_value, acceptance_criteria`.
fn kind_params(kind: &TaskKind) -> [libsql::Value; 4] {
    use libsql::Value::{Integer, Null};
    match kind {
        TaskKind::Task => [Null, Null, Null, Null],
        TaskKind::Bug(bug) => [
            bug.severity.as_str().into(),
            opt_text(bug.steps_to_reproduce.as_deref()),
            Null,
            Null,
        ],
        TaskKind::Feature(feature) => [
            Null,
            Null,
            Integer(i64::from(feature.business_value)),
            opt_text(feature.acceptance_criteria.as_deref()),
        ],
    }
}

fn row_to_kind(row: &libsql::Row) -> Result<TaskKind, DatabaseError> {
    let task_type: TaskType = parse_enum(&row.get::<String>(1)?)?;
    Ok(match task_type {
        TaskType::Task => TaskKind::Task,
        TaskType::Bug => TaskKind::Bug(BugDetails {
            severity: parse_enum(&row.get::<String>(8)?)?,
            steps_to_reproduce: get_opt_string(row, 9)?,
        }),
        TaskType::Feature => TaskKind::Feature(FeatureDetails {
            business_value: get_u8(row, 10)?,
            acceptance_criteria: get_opt_string(row, 11)?,
        }),
    })
}

fn decode(row: &libsql::Row) -> Result<(i64, TaskCore, TaskKind), DatabaseError> {
    Ok((row.get(0)?, row_to_core(row, 2)?, row_to_kind(row)?))
}

pub struct SingleTableTasks<'a> {
    db: &'a ScrumDb,
}

impl<'a> SingleTableTasks<'a> {
    #[must_use]
    pub const fn new(db: &'a ScrumDb) -> Self {
        Self { db }
    }

    async fn attachments(&self, id: i64) -> Result<BTreeSet<String>, DatabaseError> {
        let mut rows = self
            .db
            .conn()
            .query(
                &format!("SELECT attachment FROM {ATTACHMENTS} WHERE task_id = ?1"),
                [id],
            )
            .await?;
        let mut names = BTreeSet::new();
        while let Some(row) = rows.next().await? {
            names.insert(row.get::<String>(0)?);
        }
        Ok(names)
    }

    async fn load(&self, row: &libsql::Row) -> Result<SingleTableTask, DatabaseError> {
        let (id, core, kind) = decode(row)?;
        Ok(SingleTableTask {
            id,
            core,
            kind,
            attachments: self.attachments(id).await?,
        })
    }

    async fn query(
        &self,
        conditions: &[String],
        params: Vec<libsql::Value>,
        limit: u32,
    ) -> Result<Vec<SingleTableTask>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM {TABLE} t {} ORDER BY t.id LIMIT {limit}",
            select_cols(),
            where_clause(conditions)
        );
        let mut rows = self
            .db
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        // Rows read from the live statement, so decode before the next step.
        let mut found = Vec::new();
        while let Some(row) = rows.next().await? {
            found.push(decode(&row)?);
        }
        let mut tasks = Vec::with_capacity(found.len());
        for (id, core, kind) in found {
            tasks.push(SingleTableTask {
                id,
                core,
                kind,
                attachments: self.attachments(id).await?,
            });
        }
        Ok(tasks)
    }

    /// Tasks of one concrete type (discriminator match), plus `filter`.
    pub async fn list_by_type(
        &self,
        task_type: TaskType,
        filter: &TaskFilter,
    ) -> Result<Vec<SingleTableTask>, DatabaseError> {
        let mut conditions = vec!["t.task_type = ?1".to_string()];
        let mut params = vec![libsql::Value::from(task_type.as_str())];
        filter.push_conditions("t", &mut conditions, &mut params);
        self.query(&conditions, params, filter.limit).await
    }

    /// Add a name to the attachment set. Returns `false` if already present.
    pub async fn add_attachment(&self, id: i64, name: &str) -> Result<bool, DatabaseError> {
        validate::non_blank("attachment", name)?;
        let tx = self.db.begin().await?;
        let result: Result<bool, DatabaseError> = async {
            if !row_exists(&tx, TABLE, "id", id).await? {
                return Err(DatabaseError::not_found(ENTITY, id));
            }
            let inserted = tx
                .execute(
                    &format!("INSERT OR IGNORE INTO {ATTACHMENTS} (task_id, attachment) VALUES (?1, ?2)"),
                    libsql::params![id, name],
                )
                .await?;
            Ok(inserted > 0)
        }
        .await;
        finish(tx, "single_table_add_attachment", result).await
    }

    /// Returns `false` if the name was not in the set.
    pub async fn remove_attachment(&self, id: i64, name: &str) -> Result<bool, DatabaseError> {
        let tx = self.db.begin().await?;
        let result = tx
            .execute(
                &format!("DELETE FROM {ATTACHMENTS} WHERE task_id = ?1 AND attachment = ?2"),
                libsql::params![id, name],
            )
            .await
            .map(|n| n > 0)
            .map_err(DatabaseError::from);
        finish(tx, "single_table_remove_attachment", result).await
    }
}

impl TaskRepository for SingleTableTasks<'_> {
    type Task = SingleTableTask;
    type NewTask = NewSingleTableTask;

    const STRATEGY: MappingStrategy = MappingStrategy::SingleTable;

    async fn create(&self, new: &NewSingleTableTask) -> Result<SingleTableTask, DatabaseError> {
        new.validate()?;
        for name in &new.attachments {
            validate::non_blank("attachment", name)?;
        }

        let mut params = vec![libsql::Value::from(new.kind.task_type().as_str())];
        params.extend(core_params(&new.core));
        params.extend(kind_params(&new.kind));
        let sql = format!(
            "INSERT INTO {TABLE} (task_type, {CORE_COLS}, severity, steps_to_reproduce, business_value, acceptance_criteria)
             VALUES ({})",
            placeholders(1, params.len())
        );

        let tx = self.db.begin().await?;
        let result: Result<i64, DatabaseError> = async {
            tx.execute(&sql, libsql::params_from_iter(params)).await?;
            let id = tx.last_insert_rowid();
            for name in &new.attachments {
                tx.execute(
                    &format!("INSERT INTO {ATTACHMENTS} (task_id, attachment) VALUES (?1, ?2)"),
                    libsql::params![id, name.as_str()],
                )
                .await?;
            }
            Ok(id)
        }
        .await;
        let id = finish(tx, "single_table_create", result).await?;

        Ok(SingleTableTask {
            id,
            core: stored_core(&new.core),
            kind: stored_kind(&new.kind),
            attachments: new.attachments.clone(),
        })
    }

    async fn get(&self, id: i64) -> Result<SingleTableTask, DatabaseError> {
        let mut rows = self
            .db
            .conn()
            .query(
                &format!("SELECT {} FROM {TABLE} t WHERE t.id = ?1", select_cols()),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(ENTITY, id))?;
        self.load(&row).await
    }

    async fn update(&self, id: i64, update: &TaskUpdate) -> Result<SingleTableTask, DatabaseError> {
        update_core(self.db, "single_table_update", ENTITY, TABLE, id, update).await?;
        self.get(id).await
    }

    async fn delete(&self, id: i64) -> Result<(), DatabaseError> {
        delete_row(self.db, "single_table_delete", TABLE, ENTITY, id).await
    }

    async fn list(&self, filter: &TaskFilter) -> Result<Vec<SingleTableTask>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params = Vec::new();
        filter.push_conditions("t", &mut conditions, &mut params);
        self.query(&conditions, params, filter.limit).await
    }
}
