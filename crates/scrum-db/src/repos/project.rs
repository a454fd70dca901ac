//! Project repository.

use scrum_core::entities::{NewProject, Project};
use scrum_core::validate;

use crate::error::DatabaseError;
use crate::finish;
use crate::helpers::{get_opt_string, non_empty, opt_text};
use crate::repos::{apply_update, collect_rows, delete_row};
use crate::service::ScrumService;
use crate::updates::Assignments;
use crate::updates::project::ProjectUpdate;

pub(crate) const SELECT_COLS: &str = "id, name, description";

pub(crate) fn row_to_project(row: &libsql::Row) -> Result<Project, DatabaseError> {
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        description: get_opt_string(row, 2)?,
    })
}

impl ScrumService {
    pub async fn create_project(&self, new: &NewProject) -> Result<Project, DatabaseError> {
        new.validate()?;

        let tx = self.db().begin().await?;
        let result: Result<i64, DatabaseError> = async {
            tx.execute(
                "INSERT INTO projects (name, description) VALUES (?1, ?2)",
                libsql::params![new.name.as_str(), opt_text(new.description.as_deref())],
            )
            .await?;
            Ok(tx.last_insert_rowid())
        }
        .await;
        let id = finish(tx, "create_project", result).await?;

        Ok(Project {
            id,
            name: new.name.clone(),
            description: non_empty(new.description.as_deref()),
        })
    }

    pub async fn get_project(&self, id: i64) -> Result<Project, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM projects WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("Project", id))?;
        row_to_project(&row)
    }

    /// First project (lowest id) with exactly this name.
    pub async fn find_project_by_name(&self, name: &str) -> Result<Option<Project>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM projects WHERE name = ?1 ORDER BY id LIMIT 1"),
                [name],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_project(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn list_projects(&self, limit: u32) -> Result<Vec<Project>, DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM projects ORDER BY id LIMIT {limit}"),
                (),
            )
            .await?;
        collect_rows(rows, row_to_project).await
    }

    pub async fn update_project(
        &self,
        id: i64,
        update: &ProjectUpdate,
    ) -> Result<Project, DatabaseError> {
        let mut a = Assignments::default();
        if let Some(ref name) = update.name {
            validate::non_blank("name", name)?;
            a.push("name", name.clone());
        }
        if let Some(ref description) = update.description {
            a.push("description", opt_text(description.as_deref()));
        }
        if a.is_empty() {
            return self.get_project(id).await;
        }

        apply_update(
            self.db(),
            "update_project",
            "Project",
            id,
            a.into_update("projects", "id", id),
        )
        .await?;
        self.get_project(id).await
    }

    /// Delete a project together with its sprints and memberships.
    pub async fn delete_project(&self, id: i64) -> Result<(), DatabaseError> {
        delete_row(self.db(), "delete_project", "projects", "Project", id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seed_project, seed_sprint, test_service};
    use crate::updates::project::ProjectUpdateBuilder;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_and_get() {
        let svc = test_service().await;
        let created = svc
            .create_project(&NewProject::new("Billing", Some("Invoices and dunning")))
            .await
            .unwrap();
        let fetched = svc.get_project(created.id).await.unwrap();
        assert_eq!(fetched.name, "Billing");
        assert_eq!(fetched.description.as_deref(), Some("Invoices and dunning"));
    }

    #[tokio::test]
    async fn blank_name_rejected() {
        let svc = test_service().await;
        let err = svc
            .create_project(&NewProject::new("   ", None))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
    }

    #[tokio::test]
    async fn find_by_name_returns_first() {
        let svc = test_service().await;
        let first = seed_project(&svc, "Same").await;
        seed_project(&svc, "Same").await;
        let found = svc.find_project_by_name("Same").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
        assert!(svc.find_project_by_name("Other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_respects_limit() {
        let svc = test_service().await;
        for name in ["a", "b", "c"] {
            seed_project(&svc, name).await;
        }
        assert_eq!(svc.list_projects(2).await.unwrap().len(), 2);
        assert_eq!(svc.list_projects(50).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn update_clears_description() {
        let svc = test_service().await;
        let project = svc
            .create_project(&NewProject::new("P", Some("old")))
            .await
            .unwrap();
        let update = ProjectUpdateBuilder::new().description(None).build();
        let updated = svc.update_project(project.id, &update).await.unwrap();
        assert!(updated.description.is_none());
        assert_eq!(updated.name, "P");
    }

    #[tokio::test]
    async fn delete_cascades_to_sprints() {
        let svc = test_service().await;
        let sprint = seed_sprint(&svc).await;
        svc.delete_project(sprint.project_id).await.unwrap();
        assert!(matches!(
            svc.get_sprint(sprint.id).await,
            Err(DatabaseError::NotFound { .. })
        ));
    }
}
