//! Status, priority, severity, and task-type enums for scrumkit.
//!
//! All enums use `SCREAMING_SNAKE_CASE` serialization, which is also the
//! spelling stored in SQL columns and written to CSV/XML files.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// TaskStatus
// ---------------------------------------------------------------------------

/// Workflow status of a task.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    ToDo,
    InProgress,
    InReview,
    Blocked,
    Done,
}

impl TaskStatus {
    pub const ALL: [Self; 5] = [
        Self::ToDo,
        Self::InProgress,
        Self::InReview,
        Self::Blocked,
        Self::Done,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "TO_DO",
            Self::InProgress => "IN_PROGRESS",
            Self::InReview => "IN_REVIEW",
            Self::Blocked => "BLOCKED",
            Self::Done => "DONE",
        }
    }

    /// Whether work on the task is finished.
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Scheduling priority of a task.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Impact of a bug.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Minor,
    Major,
    Critical,
    Blocker,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minor => "MINOR",
            Self::Major => "MAJOR",
            Self::Critical => "CRITICAL",
            Self::Blocker => "BLOCKER",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TaskType
// ---------------------------------------------------------------------------

/// Concrete class of a task in the task hierarchy.
///
/// Doubles as the discriminator value in the single-table mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    Task,
    Bug,
    Feature,
}

impl TaskType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task => "TASK",
            Self::Bug => "BUG",
            Self::Feature => "FEATURE",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MappingStrategy
// ---------------------------------------------------------------------------

/// How the task hierarchy is laid out over relational tables.
///
/// ```text
/// single_table       one table, task_type discriminator, nullable subclass columns
/// joined_table       base table + one table per subclass sharing the primary key
/// mapped_superclass  no base table, each concrete subclass owns every column
/// component_set      flat task table + element collection of embedded records
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MappingStrategy {
    SingleTable,
    JoinedTable,
    MappedSuperclass,
    ComponentSet,
}

impl MappingStrategy {
    pub const ALL: [Self; 4] = [
        Self::SingleTable,
        Self::JoinedTable,
        Self::MappedSuperclass,
        Self::ComponentSet,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SingleTable => "single_table",
            Self::JoinedTable => "joined_table",
            Self::MappedSuperclass => "mapped_superclass",
            Self::ComponentSet => "component_set",
        }
    }

    /// Every table the strategy owns, entity tables first.
    #[must_use]
    pub const fn tables(self) -> &'static [&'static str] {
        match self {
            Self::SingleTable => &["tasks_single_table", "task_attachments_single_table"],
            Self::JoinedTable => &[
                "tasks_joined_table",
                "bug_tasks_joined_table",
                "feature_tasks_joined_table",
                "task_comments_joined_table",
            ],
            Self::MappedSuperclass => &[
                "bug_tasks_mapped_superclass",
                "feature_tasks_mapped_superclass",
                "bug_task_comments_mapped_superclass",
                "feature_task_comments_mapped_superclass",
            ],
            Self::ComponentSet => &["tasks_component_set", "task_attachments_component_set"],
        }
    }
}

impl fmt::Display for MappingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(status_to_do, TaskStatus, TaskStatus::ToDo, "TO_DO");
    test_serde_roundtrip!(
        status_in_progress,
        TaskStatus,
        TaskStatus::InProgress,
        "IN_PROGRESS"
    );
    test_serde_roundtrip!(priority_critical, Priority, Priority::Critical, "CRITICAL");
    test_serde_roundtrip!(severity_blocker, Severity, Severity::Blocker, "BLOCKER");
    test_serde_roundtrip!(task_type_feature, TaskType, TaskType::Feature, "FEATURE");
    test_serde_roundtrip!(
        strategy_joined,
        MappingStrategy,
        MappingStrategy::JoinedTable,
        "joined_table"
    );

    #[test]
    fn as_str_matches_serde_for_every_status() {
        for status in TaskStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(TaskStatus::InReview.to_string(), "IN_REVIEW");
        assert_eq!(Priority::High.to_string(), "HIGH");
        assert_eq!(Severity::Major.to_string(), "MAJOR");
        assert_eq!(TaskType::Bug.to_string(), "BUG");
    }

    #[test]
    fn defaults() {
        assert_eq!(TaskStatus::default(), TaskStatus::ToDo);
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn priority_orders_by_urgency() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::High < Priority::Critical);
    }

    #[test]
    fn only_done_is_closed() {
        let closed: Vec<_> = TaskStatus::ALL.into_iter().filter(|s| s.is_closed()).collect();
        assert_eq!(closed, vec![TaskStatus::Done]);
    }

    #[test]
    fn every_strategy_owns_tables() {
        for strategy in MappingStrategy::ALL {
            assert!(!strategy.tables().is_empty(), "{strategy} has no tables");
        }
    }

    #[test]
    fn rejects_unknown_status() {
        let result: Result<TaskStatus, _> = serde_json::from_str("\"WONT_FIX\"");
        assert!(result.is_err());
    }
}
