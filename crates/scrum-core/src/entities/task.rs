use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Priority, Severity, TaskStatus, TaskType};
use crate::errors::CoreError;
use crate::validate;

/// Columns every task carries, whatever mapping strategy stores it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskCore {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Priority,
    pub sprint_id: Option<i64>,
    pub assignee_id: Option<i64>,
}

impl TaskCore {
    /// An unscheduled, unassigned `TO_DO` task at `MEDIUM` priority.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: TaskStatus::default(),
            priority: Priority::default(),
            sprint_id: None,
            assignee_id: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub const fn in_sprint(mut self, sprint_id: i64) -> Self {
        self.sprint_id = Some(sprint_id);
        self
    }

    #[must_use]
    pub const fn assigned_to(mut self, user_id: i64) -> Self {
        self.assignee_id = Some(user_id);
        self
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank title.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate::non_blank("title", &self.title)
    }
}

/// Bug-specific columns.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BugDetails {
    pub severity: Severity,
    pub steps_to_reproduce: Option<String>,
}

/// Feature-specific columns.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FeatureDetails {
    /// Relative value to the business, 1 (lowest) to 10.
    pub business_value: u8,
    pub acceptance_criteria: Option<String>,
}

impl FeatureDetails {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `business_value` is out of range.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate::business_value(self.business_value)
    }
}

/// Position of a task in the `Task` / `BugTask` / `FeatureTask` hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "task_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskKind {
    Task,
    Bug(BugDetails),
    Feature(FeatureDetails),
}

impl TaskKind {
    #[must_use]
    pub const fn task_type(&self) -> TaskType {
        match self {
            Self::Task => TaskType::Task,
            Self::Bug(_) => TaskType::Bug,
            Self::Feature(_) => TaskType::Feature,
        }
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` if subclass fields are out of range.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            Self::Task | Self::Bug(_) => Ok(()),
            Self::Feature(details) => details.validate(),
        }
    }
}

/// Read access shared by every stored task, whichever strategy produced it.
pub trait TaskEntity {
    fn id(&self) -> i64;
    fn core(&self) -> &TaskCore;
    fn task_type(&self) -> TaskType;
}
