use clap::{Args, Subcommand};

/// Which mapping strategy stores the tasks.
#[derive(Clone, Debug, Subcommand)]
pub enum TaskStrategyCommands {
    /// One table with a task_type discriminator.
    SingleTable {
        #[command(subcommand)]
        action: TaskAction,
    },
    /// Base table joined to one table per subclass.
    JoinedTable {
        #[command(subcommand)]
        action: TaskAction,
    },
    /// Bug tasks in their own self-contained table.
    MappedBug {
        #[command(subcommand)]
        action: TaskAction,
    },
    /// Feature tasks in their own self-contained table.
    MappedFeature {
        #[command(subcommand)]
        action: TaskAction,
    },
    /// Plain tasks owning a set of attachment records.
    ComponentSet {
        #[command(subcommand)]
        action: TaskAction,
    },
}

impl TaskStrategyCommands {
    #[must_use]
    pub const fn action(&self) -> &TaskAction {
        match self {
            Self::SingleTable { action }
            | Self::JoinedTable { action }
            | Self::MappedBug { action }
            | Self::MappedFeature { action }
            | Self::ComponentSet { action } => action,
        }
    }
}

/// Operations every strategy supports.
#[derive(Clone, Debug, Subcommand)]
pub enum TaskAction {
    /// Create a task.
    Create(TaskCreateArgs),
    /// Get a task by ID.
    Get { id: i64 },
    /// List tasks.
    List(TaskListArgs),
    /// Move a task to a new status.
    Status { id: i64, status: String },
    /// Delete a task.
    Delete { id: i64 },
}

#[derive(Clone, Debug, Args)]
pub struct TaskCreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: Option<String>,
    /// to-do, in-progress, in-review, blocked, done
    #[arg(long)]
    pub status: Option<String>,
    /// low, medium, high, critical
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub sprint: Option<i64>,
    #[arg(long)]
    pub assignee: Option<i64>,
    /// task, bug or feature (single-table and joined-table only)
    #[arg(long = "type")]
    pub task_type: Option<String>,
    /// Bug severity: minor, major, critical, blocker
    #[arg(long)]
    pub severity: Option<String>,
    #[arg(long)]
    pub steps: Option<String>,
    /// Feature business value, 1 to 10
    #[arg(long)]
    pub business_value: Option<u8>,
    #[arg(long)]
    pub acceptance_criteria: Option<String>,
    /// Single-table: a file name. Component-set: NAME:CONTENT_TYPE:SIZE.
    #[arg(long = "attachment")]
    pub attachments: Vec<String>,
}

#[derive(Clone, Debug, Args)]
pub struct TaskListArgs {
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub sprint: Option<i64>,
    #[arg(long)]
    pub assignee: Option<i64>,
    #[arg(long)]
    pub limit: Option<u32>,
}
