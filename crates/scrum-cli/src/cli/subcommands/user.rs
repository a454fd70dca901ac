use clap::Subcommand;

/// User commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// Create a user.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        bio: Option<String>,
        /// Create the account deactivated.
        #[arg(long)]
        inactive: bool,
    },
    /// Get a user by ID, or by email with --email.
    Get {
        #[arg(required_unless_present = "email")]
        id: Option<i64>,
        #[arg(long, conflicts_with = "id")]
        email: Option<String>,
    },
    /// List users.
    List {
        /// Only active users.
        #[arg(long)]
        active: bool,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Update a user.
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, conflicts_with = "clear_bio")]
        bio: Option<String>,
        #[arg(long)]
        clear_bio: bool,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a user. Their tasks become unassigned.
    Delete { id: i64 },
    /// Record a login for a user now.
    Login { id: i64 },
}
