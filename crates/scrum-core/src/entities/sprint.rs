use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::validate;

/// A time-boxed iteration of a project.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Sprint {
    pub id: i64,
    pub project_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Sprint {
    /// Whether `date` falls inside the sprint, both ends inclusive.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Length of the sprint in calendar days, counting both ends.
    #[must_use]
    pub fn length_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewSprint {
    pub project_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl NewSprint {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the sprint ends before it starts.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate::sprint_dates(self.start_date, self.end_date)
    }
}

crate::identity_eq!(Sprint);
