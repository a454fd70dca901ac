//! Row types for each CSV file.
//!
//! Projects, users and sprints serialize as-is. Tasks and retrospectives are
//! flattened first: tasks keep only the common columns and the task type,
//! retrospectives join their lists into a single cell.

use serde::{Deserialize, Serialize};

use scrum_core::entities::{Project, Retrospective, SingleTableTask, Sprint, TaskCore, User};
use scrum_core::enums::{Priority, TaskStatus, TaskType};

use super::CsvRecord;

/// Joins list items inside one retrospective cell.
pub const LIST_SEPARATOR: char = '|';

/// Escapes a separator or itself inside an item.
const ESCAPE: char = '\\';

impl CsvRecord for Project {
    const FILE_NAME: &'static str = "projects.csv";
    const HEADER: &'static [&'static str] = &["id", "name", "description"];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl CsvRecord for User {
    const FILE_NAME: &'static str = "users.csv";
    const HEADER: &'static [&'static str] = &[
        "id",
        "name",
        "email",
        "bio",
        "active",
        "last_login",
        "joined_at",
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl CsvRecord for Sprint {
    const FILE_NAME: &'static str = "sprints.csv";
    const HEADER: &'static [&'static str] = &["id", "project_id", "start_date", "end_date"];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

/// One row of `tasks.csv`. Bug and feature columns are not exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvTask {
    pub id: i64,
    pub task_type: TaskType,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Priority,
    pub sprint_id: Option<i64>,
    pub assignee_id: Option<i64>,
}

impl CsvTask {
    #[must_use]
    pub fn core(&self) -> TaskCore {
        TaskCore {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            priority: self.priority,
            sprint_id: self.sprint_id,
            assignee_id: self.assignee_id,
        }
    }
}

impl From<&SingleTableTask> for CsvTask {
    fn from(task: &SingleTableTask) -> Self {
        Self {
            id: task.id,
            task_type: task.kind.task_type(),
            title: task.core.title.clone(),
            description: task.core.description.clone(),
            status: task.core.status,
            priority: task.core.priority,
            sprint_id: task.core.sprint_id,
            assignee_id: task.core.assignee_id,
        }
    }
}

impl CsvRecord for CsvTask {
    const FILE_NAME: &'static str = "tasks.csv";
    const HEADER: &'static [&'static str] = &[
        "id",
        "task_type",
        "title",
        "description",
        "status",
        "priority",
        "sprint_id",
        "assignee_id",
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

/// One row of `retrospectives.csv`, lists joined with [`LIST_SEPARATOR`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvRetrospective {
    pub id: i64,
    pub sprint_id: i64,
    pub summary: String,
    pub improvements: String,
    pub positives: String,
}

fn join_items(items: &[String]) -> String {
    let mut cell = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            cell.push(LIST_SEPARATOR);
        }
        for c in item.chars() {
            if c == LIST_SEPARATOR || c == ESCAPE {
                cell.push(ESCAPE);
            }
            cell.push(c);
        }
    }
    cell
}

/// An empty cell is an empty list. A trailing lone escape is kept as text.
fn split_items(cell: &str) -> Vec<String> {
    if cell.is_empty() {
        return Vec::new();
    }
    let mut items = Vec::new();
    let mut current = String::new();
    let mut chars = cell.chars();
    while let Some(c) = chars.next() {
        match c {
            ESCAPE => current.push(chars.next().unwrap_or(ESCAPE)),
            LIST_SEPARATOR => items.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    items.push(current);
    items
}

impl From<&Retrospective> for CsvRetrospective {
    fn from(retro: &Retrospective) -> Self {
        Self {
            id: retro.id,
            sprint_id: retro.sprint_id,
            summary: retro.summary.clone(),
            improvements: join_items(&retro.improvements),
            positives: join_items(&retro.positives),
        }
    }
}

impl From<CsvRetrospective> for Retrospective {
    fn from(row: CsvRetrospective) -> Self {
        Self {
            id: row.id,
            sprint_id: row.sprint_id,
            improvements: split_items(&row.improvements),
            positives: split_items(&row.positives),
            summary: row.summary,
        }
    }
}

impl CsvRecord for CsvRetrospective {
    const FILE_NAME: &'static str = "retrospectives.csv";
    const HEADER: &'static [&'static str] =
        &["id", "sprint_id", "summary", "improvements", "positives"];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}
