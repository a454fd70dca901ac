//! Joined-table strategy: a base row in `tasks_joined_table` plus, for bugs
//! and features, one row in the subclass table sharing its primary key.
//!
//! There is no discriminator column. The variant is whichever subclass
//! table has a row for the id (outer joins on read).

use std::collections::BTreeMap;

use scrum_core::entities::{
    BugDetails, FeatureDetails, JoinedTableTask, NewJoinedTableTask, TaskCore, TaskKind,
};
use scrum_core::enums::{MappingStrategy, Severity};
use scrum_core::validate;

use super::{
    CORE_COLS, TaskFilter, TaskRepository, core_cols, core_params, placeholders, row_exists,
    row_to_core, stored_core, stored_kind, update_core, where_clause,
};
use crate::ScrumDb;
use crate::error::DatabaseError;
use crate::finish;
use crate::helpers::{get_opt_string, get_u8, opt_text, parse_enum};
use crate::repos::delete_row;
use crate::updates::task::TaskUpdate;

const TABLE: &str = "tasks_joined_table";
const BUGS: &str = "bug_tasks_joined_table";
const FEATURES: &str = "feature_tasks_joined_table";
const COMMENTS: &str = "task_comments_joined_table";
const ENTITY: &str = "JoinedTableTask";

fn select_from() -> String {
    format!(
        "SELECT t.id, {}, b.task_id, b.severity, b.steps_to_reproduce, \
         f.task_id, f.business_value, f.acceptance_criteria \
         FROM {TABLE} t \
         LEFT JOIN {BUGS} b ON b.task_id = t.id \
         LEFT JOIN {FEATURES} f ON f.task_id = t.id",
        core_cols("t")
    )
}

fn row_to_kind(row: &libsql::Row) -> Result<TaskKind, DatabaseError> {
    if row.get::<Option<i64>>(7)?.is_some() {
        return Ok(TaskKind::Bug(BugDetails {
            severity: parse_enum(&row.get::<String>(8)?)?,
            steps_to_reproduce: get_opt_string(row, 9)?,
        }));
    }
    if row.get::<Option<i64>>(10)?.is_some() {
        return Ok(TaskKind::Feature(FeatureDetails {
            business_value: get_u8(row, 11)?,
            acceptance_criteria: get_opt_string(row, 12)?,
        }));
    }
    Ok(TaskKind::Task)
}

fn decode(row: &libsql::Row) -> Result<(i64, TaskCore, TaskKind), DatabaseError> {
    Ok((row.get(0)?, row_to_core(row, 1)?, row_to_kind(row)?))
}

/// Write the subclass row for `kind`, if it has one.
async fn insert_subclass(
    conn: &libsql::Connection,
    id: i64,
    kind: &TaskKind,
) -> Result<(), DatabaseError> {
    match kind {
        TaskKind::Task => {}
        TaskKind::Bug(bug) => {
            conn.execute(
                &format!("INSERT INTO {BUGS} (task_id, severity, steps_to_reproduce) VALUES (?1, ?2, ?3)"),
                libsql::params![
                    id,
                    bug.severity.as_str(),
                    opt_text(bug.steps_to_reproduce.as_deref())
                ],
            )
            .await?;
        }
        TaskKind::Feature(feature) => {
            conn.execute(
                &format!(
                    "INSERT INTO {FEATURES} (task_id, business_value, acceptance_criteria) VALUES (?1, ?2, ?3)"
                ),
                libsql::params![
                    id,
                    i64::from(feature.business_value),
                    opt_text(feature.acceptance_criteria.as_deref())
                ],
            )
            .await?;
        }
    }
    Ok(())
}

pub struct JoinedTableTasks<'a> {
    db: &'a ScrumDb,
}

impl<'a> JoinedTableTasks<'a> {
    #[must_use]
    pub const fn new(db: &'a ScrumDb) -> Self {
        Self { db }
    }

    async fn comments(&self, id: i64) -> Result<BTreeMap<String, String>, DatabaseError> {
        let mut rows = self
            .db
            .conn()
            .query(
                &format!("SELECT author, comment FROM {COMMENTS} WHERE task_id = ?1"),
                [id],
            )
            .await?;
        let mut comments = BTreeMap::new();
        while let Some(row) = rows.next().await? {
            comments.insert(row.get::<String>(0)?, row.get::<String>(1)?);
        }
        Ok(comments)
    }

    async fn load(&self, row: &libsql::Row) -> Result<JoinedTableTask, DatabaseError> {
        let (id, core, kind) = decode(row)?;
        Ok(JoinedTableTask {
            id,
            core,
            kind,
            comments: self.comments(id).await?,
        })
    }

    async fn query(
        &self,
        conditions: &[String],
        params: Vec<libsql::Value>,
        limit: u32,
    ) -> Result<Vec<JoinedTableTask>, DatabaseError> {
        let sql = format!(
            "{} {} ORDER BY t.id LIMIT {limit}",
            select_from(),
            where_clause(conditions)
        );
        let mut rows = self
            .db
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        // Rows read from the live statement, so decode before the next step.
        let mut found = Vec::new();
        while let Some(row) = rows.next().await? {
            found.push(decode(&row)?);
        }
        let mut tasks = Vec::with_capacity(found.len());
        for (id, core, kind) in found {
            tasks.push(JoinedTableTask {
                id,
                core,
                kind,
                comments: self.comments(id).await?,
            });
        }
        Ok(tasks)
    }

    /// Bugs of exactly this severity, plus `filter`.
    pub async fn list_bugs_by_severity(
        &self,
        severity: Severity,
        filter: &TaskFilter,
    ) -> Result<Vec<JoinedTableTask>, DatabaseError> {
        let mut conditions = vec!["b.severity = ?1".to_string()];
        let mut params = vec![libsql::Value::from(severity.as_str())];
        filter.push_conditions("t", &mut conditions, &mut params);
        self.query(&conditions, params, filter.limit).await
    }

    /// Set `author`'s comment, returning the one it replaced.
    pub async fn put_comment(
        &self,
        id: i64,
        author: &str,
        comment: &str,
    ) -> Result<Option<String>, DatabaseError> {
        validate::non_blank("author", author)?;
        validate::non_blank("comment", comment)?;

        let tx = self.db.begin().await?;
        let result: Result<Option<String>, DatabaseError> = async {
            if !row_exists(&tx, TABLE, "id", id).await? {
                return Err(DatabaseError::not_found(ENTITY, id));
            }
            let mut rows = tx
                .query(
                    &format!("SELECT comment FROM {COMMENTS} WHERE task_id = ?1 AND author = ?2"),
                    libsql::params![id, author],
                )
                .await?;
            let previous = match rows.next().await? {
                Some(row) => Some(row.get::<String>(0)?),
                None => None,
            };
            drop(rows);
            tx.execute(
                &format!(
                    "INSERT INTO {COMMENTS} (task_id, author, comment) VALUES (?1, ?2, ?3)
                     ON CONFLICT(task_id, author) DO UPDATE SET comment = excluded.comment"
                ),
                libsql::params![id, author, comment],
            )
            .await?;
            Ok(previous)
        }
        .await;
        finish(tx, "joined_table_put_comment", result).await
    }

    /// Returns `false` if `author` had no comment.
    pub async fn remove_comment(&self, id: i64, author: &str) -> Result<bool, DatabaseError> {
        let tx = self.db.begin().await?;
        let result = tx
            .execute(
                &format!("DELETE FROM {COMMENTS} WHERE task_id = ?1 AND author = ?2"),
                libsql::params![id, author],
            )
            .await
            .map(|n| n > 0)
            .map_err(DatabaseError::from);
        finish(tx, "joined_table_remove_comment", result).await
    }
}

impl TaskRepository for JoinedTableTasks<'_> {
    type Task = JoinedTableTask;
    type NewTask = NewJoinedTableTask;

    const STRATEGY: MappingStrategy = MappingStrategy::JoinedTable;

    async fn create(&self, new: &NewJoinedTableTask) -> Result<JoinedTableTask, DatabaseError> {
        new.validate()?;
        for (author, comment) in &new.comments {
            validate::non_blank("author", author)?;
            validate::non_blank("comment", comment)?;
        }

        let params = core_params(&new.core);
        let sql = format!(
            "INSERT INTO {TABLE} ({CORE_COLS}) VALUES ({})",
            placeholders(1, params.len())
        );

        let tx = self.db.begin().await?;
        let result: Result<i64, DatabaseError> = async {
            tx.execute(&sql, libsql::params_from_iter(params)).await?;
            let id = tx.last_insert_rowid();
            insert_subclass(&tx, id, &new.kind).await?;
            for (author, comment) in &new.comments {
                tx.execute(
                    &format!("INSERT INTO {COMMENTS} (task_id, author, comment) VALUES (?1, ?2, ?3)"),
                    libsql::params![id, author.as_str(), comment.as_str()],
                )
                .await?;
            }
            Ok(id)
        }
        .await;
        let id = finish(tx, "joined_table_create", result).await?;

        Ok(JoinedTableTask {
            id,
            core: stored_core(&new.core),
            kind: stored_kind(&new.kind),
            comments: new.comments.clone(),
        })
    }

    async fn get(&self, id: i64) -> Result<JoinedTableTask, DatabaseError> {
        let mut rows = self
            .db
            .conn()
            .query(&format!("{} WHERE t.id = ?1", select_from()), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(ENTITY, id))?;
        self.load(&row).await
    }

    async fn update(&self, id: i64, update: &TaskUpdate) -> Result<JoinedTableTask, DatabaseError> {
        update_core(self.db, "joined_table_update", ENTITY, TABLE, id, update).await?;
        self.get(id).await
    }

    async fn delete(&self, id: i64) -> Result<(), DatabaseError> {
        delete_row(self.db, "joined_table_delete", TABLE, ENTITY, id).await
    }

    async fn list(&self, filter: &TaskFilter) -> Result<Vec<JoinedTableTask>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params = Vec::new();
        filter.push_conditions("t", &mut conditions, &mut params);
        self.query(&conditions, params, filter.limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::test_service;
    use pretty_assertions::assert_eq;
    use scrum_core::entities::TaskCore;
    use scrum_core::enums::TaskStatus;

    fn bug(title: &str, severity: Severity) -> NewJoinedTableTask {
        bug_with(TaskCore::new(title), severity)
    }

    fn bug_with(core: TaskCore, severity: Severity) -> NewJoinedTableTask {
        NewJoinedTableTask::new(
            core,
            TaskKind::Bug(BugDetails {
                severity,
                steps_to_reproduce: None,
            }),
        )
    }

    async fn count(svc: &crate::service::ScrumService, table: &str) -> i64 {
        let mut rows = svc
            .db()
            .conn()
            .query(&format!("SELECT COUNT(*) FROM {table}"), ())
            .await
            .unwrap();
        rows.next().await.unwrap().unwrap().get(0).unwrap()
    }

    #[tokio::test]
    async fn subclass_row_shares_primary_key() {
        let svc = test_service().await;
        let task = svc
            .joined_table_tasks()
            .create(&bug("Crash", Severity::Critical))
            .await
            .unwrap();
        assert!(row_exists(svc.db().conn(), BUGS, "task_id", task.id).await.unwrap());
        assert_eq!(count(&svc, FEATURES).await, 0);
    }

    #[tokio::test]
    async fn variant_recovered_from_joins() {
        let svc = test_service().await;
        let repo = svc.joined_table_tasks();
        let plain = repo
            .create(&NewJoinedTableTask::new(TaskCore::new("Chore"), TaskKind::Task))
            .await
            .unwrap();
        let feature = repo
            .create(&NewJoinedTableTask::new(
                TaskCore::new("Export"),
                TaskKind::Feature(FeatureDetails {
                    business_value: 7,
                    acceptance_criteria: Some("CSV".into()),
                }),
            ))
            .await
            .unwrap();

        assert_eq!(repo.get(plain.id).await.unwrap().kind, TaskKind::Task);
        assert_eq!(repo.get(feature.id).await.unwrap().kind, feature.kind);
    }

    #[tokio::test]
    async fn bugs_by_severity() {
        let svc = test_service().await;
        let repo = svc.joined_table_tasks();
        repo.create(&bug("a", Severity::Minor)).await.unwrap();
        repo.create(&bug("b", Severity::Blocker)).await.unwrap();
        let blocked = repo
            .create(&bug_with(
                TaskCore::new("c").with_status(TaskStatus::Blocked),
                Severity::Blocker,
            ))
            .await
            .unwrap();

        let blockers = repo
            .list_bugs_by_severity(Severity::Blocker, &TaskFilter::default())
            .await
            .unwrap();
        assert_eq!(blockers.len(), 2);

        let blocked_blockers = repo
            .list_bugs_by_severity(
                Severity::Blocker,
                &TaskFilter::default().status(TaskStatus::Blocked),
            )
            .await
            .unwrap();
        assert_eq!(blocked_blockers.len(), 1);
        assert_eq!(blocked_blockers[0].id, blocked.id);
    }

    #[tokio::test]
    async fn comments_map_by_author() {
        let svc = test_service().await;
        let repo = svc.joined_table_tasks();
        let task = repo.create(&bug("Crash", Severity::Major)).await.unwrap();

        assert_eq!(repo.put_comment(task.id, "ada", "Repro'd").await.unwrap(), None);
        assert_eq!(
            repo.put_comment(task.id, "ada", "Fixed upstream").await.unwrap(),
            Some("Repro'd".to_string())
        );
        repo.put_comment(task.id, "bob", "LGTM").await.unwrap();

        let comments = repo.get(task.id).await.unwrap().comments;
        assert_eq!(comments.len(), 2);
        assert_eq!(comments["ada"], "Fixed upstream");

        assert!(repo.remove_comment(task.id, "bob").await.unwrap());
        assert!(!repo.remove_comment(task.id, "bob").await.unwrap());
    }

    #[tokio::test]
    async fn delete_cascades_to_subclass_and_comments() {
        let svc = test_service().await;
        let repo = svc.joined_table_tasks();
        let task = repo.create(&bug("Crash", Severity::Major)).await.unwrap();
        repo.put_comment(task.id, "ada", "note").await.unwrap();
        repo.delete(task.id).await.unwrap();

        assert_eq!(count(&svc, BUGS).await, 0);
        assert_eq!(count(&svc, COMMENTS).await, 0);
        assert!(matches!(
            repo.get(task.id).await,
            Err(DatabaseError::NotFound { .. })
        ));
    }
}
