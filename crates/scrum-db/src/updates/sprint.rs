//! Sprint update builder.
//!
//! Both dates are checked together after merging with the stored row, so
//! moving only one end can still be rejected.

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct SprintUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

pub struct SprintUpdateBuilder(SprintUpdate);

impl SprintUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(SprintUpdate::default())
    }

    #[must_use]
    pub const fn start_date(mut self, date: NaiveDate) -> Self {
        self.0.start_date = Some(date);
        self
    }

    #[must_use]
    pub const fn end_date(mut self, date: NaiveDate) -> Self {
        self.0.end_date = Some(date);
        self
    }

    #[must_use]
    pub fn build(self) -> SprintUpdate {
        self.0
    }
}

impl Default for SprintUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
