//! Transaction boundary for mutating repository calls.
//!
//! ```text
//! let tx = db.begin().await?;
//! let result = write_rows(&tx, ...).await;
//! finish(tx, "create_user", result).await
//! ```
//!
//! The transaction never outlives the call: it is committed when the body
//! returned `Ok`, and rolled back otherwise.

use crate::error::DatabaseError;

/// Commit `tx` if `result` is `Ok`, roll it back if it is `Err`.
///
/// # Errors
///
/// Returns the body's error after rollback, or the commit error.
pub async fn finish<T>(
    tx: libsql::Transaction,
    op: &'static str,
    result: Result<T, DatabaseError>,
) -> Result<T, DatabaseError> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            tracing::debug!(op, "unit of work committed");
            Ok(value)
        }
        Err(error) => {
            if let Err(rollback_error) = tx.rollback().await {
                tracing::warn!(op, %rollback_error, "rollback failed");
            }
            tracing::warn!(op, %error, "unit of work rolled back");
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScrumDb;

    async fn count_projects(db: &ScrumDb) -> i64 {
        let mut rows = db
            .conn()
            .query("SELECT COUNT(*) FROM projects", ())
            .await
            .unwrap();
        rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap()
    }

    #[tokio::test]
    async fn commits_on_ok() {
        let db = ScrumDb::open_local(":memory:").await.unwrap();
        let tx = db.begin().await.unwrap();
        let result = tx
            .execute("INSERT INTO projects (name) VALUES ('kept')", ())
            .await
            .map_err(DatabaseError::from);
        finish(tx, "test", result).await.unwrap();
        assert_eq!(count_projects(&db).await, 1);
    }

    #[tokio::test]
    async fn rolls_back_on_err() {
        let db = ScrumDb::open_local(":memory:").await.unwrap();
        let tx = db.begin().await.unwrap();
        tx.execute("INSERT INTO projects (name) VALUES ('discarded')", ())
            .await
            .unwrap();
        let result: Result<(), _> = Err(DatabaseError::Validation("late failure".into()));
        let err = finish(tx, "test", result).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
        assert_eq!(count_projects(&db).await, 0);
    }

    #[tokio::test]
    async fn connection_usable_after_rollback() {
        let db = ScrumDb::open_local(":memory:").await.unwrap();
        let tx = db.begin().await.unwrap();
        let _ = finish::<()>(tx, "test", Err(DatabaseError::Validation("rejected".into()))).await;
        let tx = db.begin().await.unwrap();
        finish(tx, "test", Ok(())).await.unwrap();
    }
}
