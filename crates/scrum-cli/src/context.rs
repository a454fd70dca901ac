use anyhow::Context;
use scrum_config::ScrumConfig;
use scrum_db::service::ScrumService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: ScrumService,
    pub config: ScrumConfig,
}

impl AppContext {
    /// Open (creating if needed) the configured database.
    pub async fn init(config: ScrumConfig) -> anyhow::Result<Self> {
        if let Some(dir) = config.database.parent_dir() {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create database directory {}", dir.display()))?;
        }

        let service = ScrumService::new_local(&config.database.path)
            .await
            .with_context(|| format!("failed to open database at {}", config.database.path))?;

        Ok(Self { service, config })
    }
}
