//! Task update builder.
//!
//! Touches only the common columns, so it works for every mapping strategy.
//! The variant (discriminator or subclass table) is fixed at creation.

use serde::Serialize;
use scrum_core::enums::{Priority, TaskStatus};

use super::Assignments;
use crate::helpers::{opt_int, opt_text};

#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint_id: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<Option<i64>>,
}

impl TaskUpdate {
    pub(crate) fn assignments(&self) -> Assignments {
        let mut a = Assignments::default();
        if let Some(ref title) = self.title {
            a.push("title", title.clone());
        }
        if let Some(ref description) = self.description {
            a.push("description", opt_text(description.as_deref()));
        }
        if let Some(status) = self.status {
            a.push("status", status.as_str());
        }
        if let Some(priority) = self.priority {
            a.push("priority", priority.as_str());
        }
        if let Some(sprint_id) = self.sprint_id {
            a.push("sprint_id", opt_int(sprint_id));
        }
        if let Some(assignee_id) = self.assignee_id {
            a.push("assignee_id", opt_int(assignee_id));
        }
        a
    }
}

pub struct TaskUpdateBuilder(TaskUpdate);

impl TaskUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(TaskUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub const fn status(mut self, status: TaskStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.0.priority = Some(priority);
        self
    }

    #[must_use]
    pub const fn sprint_id(mut self, sprint_id: Option<i64>) -> Self {
        self.0.sprint_id = Some(sprint_id);
        self
    }

    #[must_use]
    pub const fn assignee_id(mut self, assignee_id: Option<i64>) -> Self {
        self.0.assignee_id = Some(assignee_id);
        self
    }

    #[must_use]
    pub fn build(self) -> TaskUpdate {
        self.0
    }
}

impl Default for TaskUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_only_changed_fields() {
        let update = TaskUpdateBuilder::new()
            .status(TaskStatus::Done)
            .sprint_id(None)
            .build();
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"status": "DONE", "sprint_id": null}));
    }

    #[test]
    fn empty_update_has_no_assignments() {
        assert!(TaskUpdate::default().assignments().is_empty());
    }
}
