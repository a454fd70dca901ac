//! File store locations for CSV and XML serialization.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_csv_dir() -> PathBuf {
    PathBuf::from("data/csv")
}

fn default_xml_dir() -> PathBuf {
    PathBuf::from("data/xml")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding one CSV file per entity type.
    #[serde(default = "default_csv_dir")]
    pub csv_dir: PathBuf,

    /// Directory holding one XML document per entity type.
    #[serde(default = "default_xml_dir")]
    pub xml_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            csv_dir: default_csv_dir(),
            xml_dir: default_xml_dir(),
        }
    }
}
