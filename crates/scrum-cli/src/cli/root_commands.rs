use clap::Subcommand;

use crate::cli::subcommands::{
    CsvCommands, ExportCommands, ProjectCommands, RetroCommands, SprintCommands,
    TaskStrategyCommands, UserCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Users.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Projects and their members.
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Sprints.
    Sprint {
        #[command(subcommand)]
        action: SprintCommands,
    },
    /// Sprint retrospectives.
    Retro {
        #[command(subcommand)]
        action: RetroCommands,
    },
    /// Tasks, under one of the mapping strategies.
    Task {
        #[command(subcommand)]
        strategy: TaskStrategyCommands,
    },
    /// Write the store's contents to CSV or XML files.
    Export {
        #[command(subcommand)]
        action: ExportCommands,
    },
    /// CSV directory maintenance.
    Csv {
        #[command(subcommand)]
        action: CsvCommands,
    },
}
