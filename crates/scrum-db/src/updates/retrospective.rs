//! Retrospective update builder. List fields replace the whole list.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct RetrospectiveUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improvements: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positives: Option<Vec<String>>,
}

pub struct RetrospectiveUpdateBuilder(RetrospectiveUpdate);

impl RetrospectiveUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(RetrospectiveUpdate::default())
    }

    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.0.summary = Some(summary.into());
        self
    }

    #[must_use]
    pub fn improvements(mut self, items: Vec<String>) -> Self {
        self.0.improvements = Some(items);
        self
    }

    #[must_use]
    pub fn positives(mut self, items: Vec<String>) -> Self {
        self.0.positives = Some(items);
        self
    }

    #[must_use]
    pub fn build(self) -> RetrospectiveUpdate {
        self.0
    }
}

impl Default for RetrospectiveUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
