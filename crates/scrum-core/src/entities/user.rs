use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::validate;

/// A team member. Belongs to many projects and is assigned many tasks.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub joined_at: DateTime<Utc>,
}

/// Fields supplied when registering a user. `joined_at` is set by the store.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub active: bool,
}

impl NewUser {
    /// An active user with no bio.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            bio: None,
            active: true,
        }
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank name or malformed email.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate::non_blank("name", &self.name)?;
        validate::email(&self.email)
    }
}

crate::identity_eq!(User);
