//! Relational store configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Path value that selects a private in-memory database.
pub const IN_MEMORY: &str = ":memory:";

fn default_path() -> String {
    "scrum.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database file, relative to the working directory, or `:memory:`.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl DatabaseConfig {
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY
    }

    /// Parent directory that must exist before the file can be opened.
    ///
    /// `None` for in-memory databases and bare file names.
    #[must_use]
    pub fn parent_dir(&self) -> Option<PathBuf> {
        if self.is_in_memory() {
            return None;
        }
        PathBuf::from(&self.path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_file_in_working_dir() {
        let config = DatabaseConfig::default();
        assert_eq!(config.path, "scrum.db");
        assert!(!config.is_in_memory());
        assert!(config.parent_dir().is_none());
    }

    #[test]
    fn memory_has_no_parent() {
        let config = DatabaseConfig {
            path: IN_MEMORY.into(),
        };
        assert!(config.is_in_memory());
        assert!(config.parent_dir().is_none());
    }

    #[test]
    fn nested_path_has_parent() {
        let config = DatabaseConfig {
            path: "var/data/scrum.db".into(),
        };
        assert_eq!(config.parent_dir(), Some(PathBuf::from("var/data")));
    }
}
