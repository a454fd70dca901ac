use scrum_config::ScrumConfig;
use scrum_io::csv_store::CsvStore;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CsvCommands;
use crate::commands::shared::response::{FileSummary, FilesWritten};
use crate::output::output;

/// Handle `scrum csv`. Works on files only.
pub fn handle(action: &CsvCommands, config: &ScrumConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        CsvCommands::Init { dir } => {
            let dir = dir.clone().unwrap_or_else(|| config.storage.csv_dir.clone());
            let store = CsvStore::new(&dir);
            let created = store.initialize()?;
            let reply = FilesWritten {
                format: "csv",
                dir: dir.display().to_string(),
                files: created
                    .iter()
                    .map(|path| FileSummary {
                        file: path.display().to_string(),
                        records: 0,
                    })
                    .collect(),
            };
            output(&reply, flags.format)
        }
    }
}
