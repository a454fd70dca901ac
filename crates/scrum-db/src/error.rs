//! Database error types for scrum-db.

use scrum_core::errors::CoreError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// No row with this id, or an update/delete touched nothing.
    #[error("{entity} {id} not found")]
    NotFound { entity: String, id: i64 },

    /// A validation rule or a `CHECK` / `NOT NULL` constraint failed.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A `UNIQUE` or `FOREIGN KEY` constraint failed.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The database could not be opened or reached.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// A row could not be decoded into an entity.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Underlying libSQL error that matched no other class.
    #[error("libSQL error: {0}")]
    LibSql(libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    pub(crate) fn not_found(entity: &str, id: i64) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id,
        }
    }
}

/// libSQL reports constraint failures as plain `SQLite` messages, so the
/// class is read off the message text.
impl From<libsql::Error> for DatabaseError {
    fn from(error: libsql::Error) -> Self {
        let msg = error.to_string();
        if msg.contains("UNIQUE constraint failed")
            || msg.contains("FOREIGN KEY constraint failed")
        {
            Self::Conflict(msg)
        } else if msg.contains("CHECK constraint failed")
            || msg.contains("NOT NULL constraint failed")
        {
            Self::Validation(msg)
        } else if msg.contains("unable to open database") {
            Self::Connection(msg)
        } else {
            Self::LibSql(error)
        }
    }
}

impl From<CoreError> for DatabaseError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::NotFound { entity_type, id } => Self::NotFound {
                entity: entity_type,
                id,
            },
            CoreError::Validation(msg) => Self::Validation(msg),
            CoreError::Other(e) => Self::Other(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_failure_is_conflict() {
        let err: DatabaseError = libsql::Error::SqliteFailure(
            2067,
            "UNIQUE constraint failed: users.email".into(),
        )
        .into();
        assert!(matches!(err, DatabaseError::Conflict(_)), "{err:?}");
    }

    #[test]
    fn check_failure_is_validation() {
        let err: DatabaseError =
            libsql::Error::SqliteFailure(275, "CHECK constraint failed: end_date".into()).into();
        assert!(matches!(err, DatabaseError::Validation(_)), "{err:?}");
    }

    #[test]
    fn core_validation_maps_to_validation() {
        let err: DatabaseError = CoreError::Validation("title is blank".into()).into();
        assert!(matches!(err, DatabaseError::Validation(msg) if msg == "title is blank"));
    }

    #[test]
    fn not_found_display() {
        assert_eq!(DatabaseError::not_found("User", 7).to_string(), "User 7 not found");
    }
}
