use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::validate;

/// A project groups sprints and the users working on them.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
}

impl NewProject {
    #[must_use]
    pub fn new(name: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            name: name.into(),
            description: description.map(String::from),
        }
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank name.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate::non_blank("name", &self.name)
    }
}

crate::identity_eq!(Project);
