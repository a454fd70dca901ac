use std::path::PathBuf;

use clap::Subcommand;

/// CSV directory commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CsvCommands {
    /// Create the directory and any missing file with its header row.
    Init {
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}
