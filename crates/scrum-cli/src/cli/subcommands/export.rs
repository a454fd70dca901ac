use std::path::PathBuf;

use clap::Subcommand;

/// Export targets. Without --dir the configured storage directory is used.
#[derive(Clone, Debug, Subcommand)]
pub enum ExportCommands {
    /// Write projects, users, sprints, tasks and retrospectives as CSV.
    Csv {
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Write projects, users, sprints, tasks and retrospectives as XML.
    Xml {
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}
