use clap::Subcommand;

/// Project and membership commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommands {
    /// Create a project.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Get a project by ID.
    Get { id: i64 },
    /// List projects, or the projects a user belongs to with --member.
    List {
        #[arg(long)]
        member: Option<i64>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Delete a project with its sprints and retrospectives.
    Delete { id: i64 },
    /// Add a user to a project.
    AddMember { project_id: i64, user_id: i64 },
    /// Remove a user from a project.
    RemoveMember { project_id: i64, user_id: i64 },
    /// List a project's members.
    Members { project_id: i64 },
}
