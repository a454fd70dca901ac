use std::path::PathBuf;

use figment::Jail;
use scrum_config::ScrumConfig;

#[test]
fn full_env_provider_chain() {
    Jail::expect_with(|jail| {
        jail.set_env("SCRUM_DATABASE__PATH", ":memory:");
        jail.set_env("SCRUM_STORAGE__CSV_DIR", "jail/csv");
        jail.set_env("SCRUM_STORAGE__XML_DIR", "jail/xml");
        jail.set_env("SCRUM_GENERAL__DEFAULT_LIMIT", "42");

        let config = ScrumConfig::load().map_err(|e| e.to_string())?;

        assert!(config.database.is_in_memory());
        assert_eq!(config.storage.csv_dir, PathBuf::from("jail/csv"));
        assert_eq!(config.storage.xml_dir, PathBuf::from("jail/xml"));
        assert_eq!(config.general.default_limit, 42);
        Ok(())
    });
}

#[test]
fn empty_database_path_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("SCRUM_DATABASE__PATH", "  ");

        let err = ScrumConfig::load().expect_err("empty path must fail");
        assert!(err.to_string().contains("database.path"));
        Ok(())
    });
}

#[test]
fn dotenv_file_feeds_env_layer() {
    Jail::expect_with(|jail| {
        jail.create_file(".env", "SCRUM_STORAGE__XML_DIR=from-dotenv\n")?;

        let config = ScrumConfig::load_with_dotenv().map_err(|e| e.to_string())?;
        assert_eq!(config.storage.xml_dir, PathBuf::from("from-dotenv"));
        Ok(())
    });
}
