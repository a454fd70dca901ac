use scrum_config::ScrumConfig;

/// Load layered configuration, reading a `.env` file first if there is one.
pub fn load_config() -> anyhow::Result<ScrumConfig> {
    let config = ScrumConfig::load_with_dotenv()?;
    tracing::debug!(
        database = %config.database.path,
        csv_dir = %config.storage.csv_dir.display(),
        xml_dir = %config.storage.xml_dir.display(),
        "loaded configuration"
    );
    Ok(config)
}
