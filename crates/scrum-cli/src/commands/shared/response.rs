use serde::Serialize;

/// Reply for commands that remove something and have nothing else to show.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub entity: &'static str,
    pub id: i64,
    pub deleted: bool,
}

impl Deleted {
    #[must_use]
    pub const fn new(entity: &'static str, id: i64) -> Self {
        Self {
            entity,
            id,
            deleted: true,
        }
    }
}

/// Reply for a membership change; `changed` is false when it was a no-op.
#[derive(Debug, Serialize)]
pub struct Membership {
    pub project_id: i64,
    pub user_id: i64,
    pub member: bool,
    pub changed: bool,
}

/// Reply for file-writing commands.
#[derive(Debug, Serialize)]
pub struct FilesWritten {
    pub format: &'static str,
    pub dir: String,
    pub files: Vec<FileSummary>,
}

#[derive(Debug, Serialize)]
pub struct FileSummary {
    pub file: String,
    pub records: usize,
}
