use clap::Subcommand;

/// Sprint commands. Dates are `YYYY-MM-DD`.
#[derive(Clone, Debug, Subcommand)]
pub enum SprintCommands {
    /// Create a sprint.
    Create {
        #[arg(long)]
        project: i64,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },
    /// Get a sprint by ID.
    Get { id: i64 },
    /// List a project's sprints, or the sprints running on a date.
    List {
        #[arg(long, required_unless_present = "on", conflicts_with = "on")]
        project: Option<i64>,
        #[arg(long)]
        on: Option<String>,
    },
    /// Delete a sprint. Its tasks become unscheduled.
    Delete { id: i64 },
}
