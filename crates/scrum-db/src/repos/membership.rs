//! Project membership: the many-to-many link between users and projects.

use crate::error::DatabaseError;
use crate::finish;
use crate::repos::{collect_rows, project, user};
use crate::service::ScrumService;
use scrum_core::entities::{Project, User};

impl ScrumService {
    /// Add `user_id` to `project_id`. Returns `false` if already a member.
    ///
    /// An unknown project or user is a `Conflict` (foreign key).
    pub async fn add_member(&self, project_id: i64, user_id: i64) -> Result<bool, DatabaseError> {
        let tx = self.db().begin().await?;
        let result = tx
            .execute(
                "INSERT OR IGNORE INTO project_members (project_id, user_id) VALUES (?1, ?2)",
                libsql::params![project_id, user_id],
            )
            .await
            .map(|n| n > 0)
            .map_err(DatabaseError::from);
        finish(tx, "add_member", result).await
    }

    /// Returns `false` if the user was not a member.
    pub async fn remove_member(&self, project_id: i64, user_id: i64) -> Result<bool, DatabaseError> {
        let tx = self.db().begin().await?;
        let result = tx
            .execute(
                "DELETE FROM project_members WHERE project_id = ?1 AND user_id = ?2",
                libsql::params![project_id, user_id],
            )
            .await
            .map(|n| n > 0)
            .map_err(DatabaseError::from);
        finish(tx, "remove_member", result).await
    }

    pub async fn list_projects_for_user(&self, user_id: i64) -> Result<Vec<Project>, DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {} FROM projects
                     JOIN project_members m ON m.project_id = projects.id
                     WHERE m.user_id = ?1
                     ORDER BY projects.id",
                    project::SELECT_COLS
                ),
                [user_id],
            )
            .await?;
        collect_rows(rows, project::row_to_project).await
    }

    pub async fn list_members(&self, project_id: i64) -> Result<Vec<User>, DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {} FROM users
                     JOIN project_members m ON m.user_id = users.id
                     WHERE m.project_id = ?1
                     ORDER BY users.id",
                    user::SELECT_COLS
                ),
                [project_id],
            )
            .await?;
        collect_rows(rows, user::row_to_user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seed_project, seed_user, test_service};

    #[tokio::test]
    async fn add_list_remove() {
        let svc = test_service().await;
        let project = seed_project(&svc, "P").await;
        let ada = seed_user(&svc, "ada@example.com").await;
        let bob = seed_user(&svc, "bob@example.com").await;

        assert!(svc.add_member(project.id, ada.id).await.unwrap());
        assert!(svc.add_member(project.id, bob.id).await.unwrap());
        assert!(!svc.add_member(project.id, ada.id).await.unwrap());

        let members: Vec<i64> = svc
            .list_members(project.id)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(members, vec![ada.id, bob.id]);

        assert!(svc.remove_member(project.id, ada.id).await.unwrap());
        assert!(!svc.remove_member(project.id, ada.id).await.unwrap());
        assert_eq!(svc.list_members(project.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn projects_for_user() {
        let svc = test_service().await;
        let user = seed_user(&svc, "u@example.com").await;
        let a = seed_project(&svc, "A").await;
        seed_project(&svc, "B").await;
        svc.add_member(a.id, user.id).await.unwrap();

        let projects = svc.list_projects_for_user(user.id).await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "A");
    }

    #[tokio::test]
    async fn unknown_user_is_conflict() {
        let svc = test_service().await;
        let project = seed_project(&svc, "P").await;
        let err = svc.add_member(project.id, 404).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict(_)), "{err:?}");
    }

    #[tokio::test]
    async fn deleting_user_drops_membership() {
        let svc = test_service().await;
        let project = seed_project(&svc, "P").await;
        let user = seed_user(&svc, "u@example.com").await;
        svc.add_member(project.id, user.id).await.unwrap();
        svc.delete_user(user.id).await.unwrap();
        assert!(svc.list_members(project.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_project_drops_membership() {
        let svc = test_service().await;
        let project = seed_project(&svc, "P").await;
        let user = seed_user(&svc, "u@example.com").await;
        svc.add_member(project.id, user.id).await.unwrap();
        svc.delete_project(project.id).await.unwrap();
        assert!(svc.list_projects_for_user(user.id).await.unwrap().is_empty());
    }
}
