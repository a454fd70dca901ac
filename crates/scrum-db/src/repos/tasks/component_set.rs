//! Component-set strategy: plain tasks in `tasks_component_set`, each owning
//! a set of embedded [`Attachment`] records keyed by file name.

use std::collections::BTreeSet;

use scrum_core::entities::{Attachment, ComponentSetTask, NewComponentSetTask};
use scrum_core::enums::MappingStrategy;
use scrum_core::validate;

use super::{
    CORE_COLS, TaskFilter, TaskRepository, core_params, placeholders, row_exists, row_to_core,
    stored_core, update_core, where_clause,
};
use crate::ScrumDb;
use crate::error::DatabaseError;
use crate::finish;
use crate::repos::delete_row;
use crate::updates::task::TaskUpdate;

const TABLE: &str = "tasks_component_set";
const ATTACHMENTS: &str = "task_attachments_component_set";
const ENTITY: &str = "ComponentSetTask";

fn size_param(attachment: &Attachment) -> Result<i64, DatabaseError> {
    i64::try_from(attachment.size_bytes).map_err(|_| {
        DatabaseError::Validation(format!(
            "{} is too large to store ({} bytes)",
            attachment.file_name, attachment.size_bytes
        ))
    })
}

pub struct ComponentSetTasks<'a> {
    db: &'a ScrumDb,
}

impl<'a> ComponentSetTasks<'a> {
    #[must_use]
    pub const fn new(db: &'a ScrumDb) -> Self {
        Self { db }
    }

    async fn attachments(&self, id: i64) -> Result<BTreeSet<Attachment>, DatabaseError> {
        let mut rows = self
            .db
            .conn()
            .query(
                &format!(
                    "SELECT file_name, content_type, size_bytes FROM {ATTACHMENTS} WHERE task_id = ?1"
                ),
                [id],
            )
            .await?;
        let mut attachments = BTreeSet::new();
        while let Some(row) = rows.next().await? {
            let size = row.get::<i64>(2)?;
            attachments.insert(Attachment {
                file_name: row.get(0)?,
                content_type: row.get(1)?,
                size_bytes: u64::try_from(size)
                    .map_err(|_| DatabaseError::Query(format!("negative size_bytes {size}")))?,
            });
        }
        Ok(attachments)
    }

    async fn load(&self, row: &libsql::Row) -> Result<ComponentSetTask, DatabaseError> {
        let id: i64 = row.get(0)?;
        Ok(ComponentSetTask {
            id,
            core: row_to_core(row, 1)?,
            attachments: self.attachments(id).await?,
        })
    }

    /// Add or replace the attachment with this file name.
    pub async fn add_attachment(
        &self,
        id: i64,
        attachment: &Attachment,
    ) -> Result<(), DatabaseError> {
        validate::non_blank("file_name", &attachment.file_name)?;
        let size = size_param(attachment)?;

        let tx = self.db.begin().await?;
        let result: Result<(), DatabaseError> = async {
            if !row_exists(&tx, TABLE, "id", id).await? {
                return Err(DatabaseError::not_found(ENTITY, id));
            }
            tx.execute(
                &format!(
                    "INSERT INTO {ATTACHMENTS} (task_id, file_name, content_type, size_bytes)
                     VALUES (?1, ?2, ?3, ?4)
                     ON CONFLICT(task_id, file_name) DO UPDATE
                     SET content_type = excluded.content_type, size_bytes = excluded.size_bytes"
                ),
                libsql::params![
                    id,
                    attachment.file_name.as_str(),
                    attachment.content_type.as_str(),
                    size
                ],
            )
            .await?;
            Ok(())
        }
        .await;
        finish(tx, "component_set_add_attachment", result).await
    }

    /// Returns `false` if no attachment had this file name.
    pub async fn remove_attachment(&self, id: i64, file_name: &str) -> Result<bool, DatabaseError> {
        let tx = self.db.begin().await?;
        let result = tx
            .execute(
                &format!("DELETE FROM {ATTACHMENTS} WHERE task_id = ?1 AND file_name = ?2"),
                libsql::params![id, file_name],
            )
            .await
            .map(|n| n > 0)
            .map_err(DatabaseError::from);
        finish(tx, "component_set_remove_attachment", result).await
    }
}

impl TaskRepository for ComponentSetTasks<'_> {
    type Task = ComponentSetTask;
    type NewTask = NewComponentSetTask;

    const STRATEGY: MappingStrategy = MappingStrategy::ComponentSet;

    /// Two attachments sharing a file name are a `Conflict`.
    async fn create(&self, new: &NewComponentSetTask) -> Result<ComponentSetTask, DatabaseError> {
        new.validate()?;
        let mut sized = Vec::with_capacity(new.attachments.len());
        for attachment in &new.attachments {
            sized.push((attachment, size_param(attachment)?));
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
            for (attachment, size) in &sized {
                tx.execute(
                    &format!(
                        "INSERT INTO {ATTACHMENTS} (task_id, file_name, content_type, size_bytes)
                         VALUES (?1, ?2, ?3, ?4)"
                    ),
                    libsql::params![
                        id,
                        attachment.file_name.as_str(),
                        attachment.content_type.as_str(),
                        *size
                    ],
                )
                .await?;
            }
            Ok(id)
        }
        .await;
        let id = finish(tx, "component_set_create", result).await?;

        Ok(ComponentSetTask {
            id,
            core: stored_core(&new.core),
            attachments: new.attachments.clone(),
        })
    }

    async fn get(&self, id: i64) -> Result<ComponentSetTask, DatabaseError> {
        let mut rows = self
            .db
            .conn()
            .query(
                &format!("SELECT t.id, {CORE_COLS} FROM {TABLE} t WHERE t.id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(ENTITY, id))?;
        self.load(&row).await
    }

    async fn update(&self, id: i64, update: &TaskUpdate) -> Result<ComponentSetTask, DatabaseError> {
        update_core(self.db, "component_set_update", ENTITY, TABLE, id, update).await?;
        self.get(id).await
    }

    async fn delete(&self, id: i64) -> Result<(), DatabaseError> {
        delete_row(self.db, "component_set_delete", TABLE, ENTITY, id).await
    }

    async fn list(&self, filter: &TaskFilter) -> Result<Vec<ComponentSetTask>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params = Vec::new();
        filter.push_conditions("t", &mut conditions, &mut params);
        let sql = format!(
            "SELECT t.id, {CORE_COLS} FROM {TABLE} t {} ORDER BY t.id LIMIT {}",
            where_clause(&conditions),
            filter.limit
        );
        let mut rows = self
            .db
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        // Rows read from the live statement, so decode before the next step.
        let mut found = Vec::new();
        while let Some(row) = rows.next().await? {
            found.push((row.get::<i64>(0)?, row_to_core(&row, 1)?));
        }
        let mut tasks = Vec::with_capacity(found.len());
        for (id, core) in found {
            tasks.push(ComponentSetTask {
                id,
                core,
                attachments: self.attachments(id).await?,
            });
        }
        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::test_service;
    use pretty_assertions::assert_eq;
    use scrum_core::entities::TaskCore;

    #[tokio::test]
    async fn attachments_roundtrip() {
        let svc = test_service().await;
        let repo = svc.component_set_tasks();
        let mut new = NewComponentSetTask::new(TaskCore::new("Design review"));
        new.attachments.insert(Attachment::new("mock.png", "image/png", 20_480));
        new.attachments.insert(Attachment::new("notes.md", "text/markdown", 512));
        let task = repo.create(&new).await.unwrap();

        let fetched = repo.get(task.id).await.unwrap();
        assert_eq!(fetched.attachments, new.attachments);
    }

    #[tokio::test]
    async fn list_returns_every_task_with_attachments() {
        let svc = test_service().await;
        let repo = svc.component_set_tasks();
        let mut first = NewComponentSetTask::new(TaskCore::new("First"));
        first.attachments.insert(Attachment::new("a.txt", "text/plain", 1));
        repo.create(&first).await.unwrap();
        repo.create(&NewComponentSetTask::new(TaskCore::new("Second")))
            .await
            .unwrap();

        let tasks = repo.list(&TaskFilter::default()).await.unwrap();
        let titles: Vec<_> = tasks.iter().map(|t| t.core.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
        assert_eq!(tasks[0].attachments, first.attachments);
        assert!(tasks[1].attachments.is_empty());
    }

    #[tokio::test]
    async fn empty_description_reads_back_as_created() {
        let svc = test_service().await;
        let repo = svc.component_set_tasks();
        let mut core = TaskCore::new("Blank");
        core.description = Some(String::new());
        let created = repo.create(&NewComponentSetTask::new(core)).await.unwrap();

        let fetched = repo.get(created.id).await.unwrap();
        assert_eq!(created.core.description, None);
        assert_eq!(fetched.core, created.core);
    }

    #[tokio::test]
    async fn same_file_name_twice_is_conflict() {
        let svc = test_service().await;
        let mut new = NewComponentSetTask::new(TaskCore::new("Dup"));
        new.attachments.insert(Attachment::new("a.txt", "text/plain", 1));
        new.attachments.insert(Attachment::new("a.txt", "text/markdown", 2));
        let err = svc.component_set_tasks().create(&new).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict(_)), "{err:?}");
        assert!(svc
            .component_set_tasks()
            .list(&TaskFilter::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn add_replaces_by_file_name() {
        let svc = test_service().await;
        let repo = svc.component_set_tasks();
        let task = repo
            .create(&NewComponentSetTask::new(TaskCore::new("T")))
            .await
            .unwrap();
        repo.add_attachment(task.id, &Attachment::new("a.txt", "text/plain", 1))
            .await
            .unwrap();
        repo.add_attachment(task.id, &Attachment::new("a.txt", "text/plain", 99))
            .await
            .unwrap();

        let attachments = repo.get(task.id).await.unwrap().attachments;
        assert_eq!(attachments.len(), 1);
        assert_eq!(attachments.iter().next().unwrap().size_bytes, 99);

        assert!(repo.remove_attachment(task.id, "a.txt").await.unwrap());
        assert!(repo.get(task.id).await.unwrap().attachments.is_empty());
    }

    #[tokio::test]
    async fn add_to_missing_task_is_not_found() {
        let svc = test_service().await;
        let err = svc
            .component_set_tasks()
            .add_attachment(9, &Attachment::new("a.txt", "text/plain", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { id: 9, .. }));
    }
}
