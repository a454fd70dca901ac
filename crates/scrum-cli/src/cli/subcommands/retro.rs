use clap::Subcommand;

/// Retrospective commands.
#[derive(Clone, Debug, Subcommand)]
pub enum RetroCommands {
    /// Create the retrospective for a sprint.
    Create {
        #[arg(long)]
        sprint: i64,
        #[arg(long)]
        summary: String,
        /// Repeat for each improvement, in order.
        #[arg(long = "improvement")]
        improvements: Vec<String>,
        /// Repeat for each positive, in order.
        #[arg(long = "positive")]
        positives: Vec<String>,
    },
    /// Get a retrospective by ID, or by sprint with --sprint.
    Get {
        #[arg(required_unless_present = "sprint")]
        id: Option<i64>,
        #[arg(long, conflicts_with = "id")]
        sprint: Option<i64>,
    },
    /// Delete a retrospective.
    Delete { id: i64 },
}
