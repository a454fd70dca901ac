use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::validate;

/// The review held at the end of a sprint. At most one per sprint.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Retrospective {
    pub id: i64,
    pub sprint_id: i64,
    pub summary: String,
    /// Things to change next sprint, in the order they were raised.
    pub improvements: Vec<String>,
    /// Things that went well, in the order they were raised.
    pub positives: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewRetrospective {
    pub sprint_id: i64,
    pub summary: String,
    pub improvements: Vec<String>,
    pub positives: Vec<String>,
}

impl NewRetrospective {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank summary or list entry.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate::non_blank("summary", &self.summary)?;
        for item in &self.improvements {
            validate::non_blank("improvement", item)?;
        }
        for item in &self.positives {
            validate::non_blank("positive", item)?;
        }
        Ok(())
    }
}

crate::identity_eq!(Retrospective);
