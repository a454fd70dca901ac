//! The task hierarchy under four table-mapping strategies.
//!
//! ```text
//! strategy            repository                 tables
//! single table        SingleTableTasks           tasks_single_table (+ task_type)
//! joined table        JoinedTableTasks           tasks_joined_table + bug_/feature_tasks_joined_table
//! mapped superclass   MappedSuperclassTasks<D>   bug_/feature_tasks_mapped_superclass
//! component set       ComponentSetTasks          tasks_component_set
//! ```
//!
//! Every repository implements [`TaskRepository`]; the common columns are
//! read, written, filtered, and updated by the helpers in this module.

pub mod component_set;
pub mod joined_table;
pub mod mapped_superclass;
pub mod single_table;

use scrum_core::entities::{BugDetails, FeatureDetails, TaskCore, TaskEntity, TaskKind};
use scrum_core::enums::{MappingStrategy, Priority, TaskStatus};
use scrum_core::validate;

use crate::ScrumDb;
use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, non_empty, opt_int, opt_text, parse_enum};
use crate::repos::apply_update;
use crate::updates::task::TaskUpdate;

/// CRUD shared by every mapping strategy.
///
/// Each mutating call is a single unit of work.
#[allow(async_fn_in_trait)]
pub trait TaskRepository {
    type Task: TaskEntity;
    type NewTask;

    const STRATEGY: MappingStrategy;

    async fn create(&self, new: &Self::NewTask) -> Result<Self::Task, DatabaseError>;

    async fn get(&self, id: i64) -> Result<Self::Task, DatabaseError>;

    /// Update the common columns. The variant never changes.
    async fn update(&self, id: i64, update: &TaskUpdate) -> Result<Self::Task, DatabaseError>;

    /// Delete the task with its subclass and collection rows.
    async fn delete(&self, id: i64) -> Result<(), DatabaseError>;

    async fn list(&self, filter: &TaskFilter) -> Result<Vec<Self::Task>, DatabaseError>;
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Conjunction of optional criteria over the common task columns.
#[derive(Debug, Clone)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub sprint_id: Option<i64>,
    pub assignee_id: Option<i64>,
    pub limit: u32,
}

impl Default for TaskFilter {
    fn default() -> Self {
        Self {
            status: None,
            priority: None,
            sprint_id: None,
            assignee_id: None,
            limit: 50,
        }
    }
}

impl TaskFilter {
    #[must_use]
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub const fn sprint(mut self, sprint_id: i64) -> Self {
        self.sprint_id = Some(sprint_id);
        self
    }

    #[must_use]
    pub const fn assignee(mut self, assignee_id: i64) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Append `alias.column = ?N` conditions, numbering after `params`.
    pub(crate) fn push_conditions(
        &self,
        alias: &str,
        conditions: &mut Vec<String>,
        params: &mut Vec<libsql::Value>,
    ) {
        let mut push = |column: &str, value: libsql::Value| {
            params.push(value);
            conditions.push(format!("{alias}.{column} = ?{}", params.len()));
        };
        if let Some(status) = self.status {
            push("status", status.as_str().into());
        }
        if let Some(priority) = self.priority {
            push("priority", priority.as_str().into());
        }
        if let Some(sprint_id) = self.sprint_id {
            push("sprint_id", libsql::Value::Integer(sprint_id));
        }
        if let Some(assignee_id) = self.assignee_id {
            push("assignee_id", libsql::Value::Integer(assignee_id));
        }
    }
}

pub(crate) fn where_clause(conditions: &[String]) -> String {
    if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    }
}

// ---------------------------------------------------------------------------
// Common columns
// ---------------------------------------------------------------------------

/// Common columns in insert order. Six columns, six params from [`core_params`].
pub(crate) const CORE_COLS: &str = "title, description, status, priority, sprint_id, assignee_id";

/// [`CORE_COLS`] qualified with a table alias.
pub(crate) fn core_cols(alias: &str) -> String {
    CORE_COLS
        .split(", ")
        .map(|col| format!("{alias}.{col}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn core_params(core: &TaskCore) -> Vec<libsql::Value> {
    vec![
        libsql::Value::Text(core.title.clone()),
        opt_text(core.description.as_deref()),
        core.status.as_str().into(),
        core.priority.as_str().into(),
        opt_int(core.sprint_id),
        opt_int(core.assignee_id),
    ]
}

/// `core` as a later read returns it.
pub(crate) fn stored_core(core: &TaskCore) -> TaskCore {
    TaskCore {
        description: non_empty(core.description.as_deref()),
        ..core.clone()
    }
}

pub(crate) fn stored_bug(bug: &BugDetails) -> BugDetails {
    BugDetails {
        severity: bug.severity,
        steps_to_reproduce: non_empty(bug.steps_to_reproduce.as_deref()),
    }
}

pub(crate) fn stored_feature(feature: &FeatureDetails) -> FeatureDetails {
    FeatureDetails {
        business_value: feature.business_value,
        acceptance_criteria: non_empty(feature.acceptance_criteria.as_deref()),
    }
}

pub(crate) fn stored_kind(kind: &TaskKind) -> TaskKind {
    match kind {
        TaskKind::Task => TaskKind::Task,
        TaskKind::Bug(bug) => TaskKind::Bug(stored_bug(bug)),
        TaskKind::Feature(feature) => TaskKind::Feature(stored_feature(feature)),
    }
}

/// `?{from}, ?{from+1}, ...` for `count` placeholders.
pub(crate) fn placeholders(from: usize, count: usize) -> String {
    (from..from + count)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Decode the six common columns starting at column `first`.
pub(crate) fn row_to_core(row: &libsql::Row, first: i32) -> Result<TaskCore, DatabaseError> {
    Ok(TaskCore {
        title: row.get(first)?,
        description: get_opt_string(row, first + 1)?,
        status: parse_enum(&row.get::<String>(first + 2)?)?,
        priority: parse_enum(&row.get::<String>(first + 3)?)?,
        sprint_id: row.get::<Option<i64>>(first + 4)?,
        assignee_id: row.get::<Option<i64>>(first + 5)?,
    })
}

pub(crate) async fn row_exists(
    conn: &libsql::Connection,
    table: &str,
    key: &str,
    id: i64,
) -> Result<bool, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT 1 FROM {table} WHERE {key} = ?1"), [id])
        .await?;
    Ok(rows.next().await?.is_some())
}

/// Apply a [`TaskUpdate`] to the common columns of `table`.
pub(crate) async fn update_core(
    db: &ScrumDb,
    op: &'static str,
    entity: &str,
    table: &str,
    id: i64,
    update: &TaskUpdate,
) -> Result<(), DatabaseError> {
    if let Some(ref title) = update.title {
        validate::non_blank("title", title)?;
    }
    let assignments = update.assignments();
    if assignments.is_empty() {
        return if row_exists(db.conn(), table, "id", id).await? {
            Ok(())
        } else {
            Err(DatabaseError::not_found(entity, id))
        };
    }
    apply_update(db, op, entity, id, assignments.into_update(table, "id", id)).await
}
