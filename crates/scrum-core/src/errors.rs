//! Cross-cutting error types for scrumkit.
//!
//! Store-specific errors (`DatabaseError`, `IoError`) live in their own
//! crates. `CoreError` covers failures that need no store at all.

use thiserror::Error;

/// Errors that can be raised by any scrumkit crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: i64 },

    /// Data failed validation (format, ranges, required fields).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
