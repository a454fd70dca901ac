//! Sprint repository.

use chrono::NaiveDate;

use scrum_core::entities::{NewSprint, Sprint};
use scrum_core::validate;

use crate::error::DatabaseError;
use crate::finish;
use crate::helpers::{format_date, parse_date};
use crate::repos::{apply_update, collect_rows, delete_row};
use crate::service::ScrumService;
use crate::updates::Assignments;
use crate::updates::sprint::SprintUpdate;

const SELECT_COLS: &str = "id, project_id, start_date, end_date";

fn row_to_sprint(row: &libsql::Row) -> Result<Sprint, DatabaseError> {
    Ok(Sprint {
        id: row.get(0)?,
        project_id: row.get(1)?,
        start_date: parse_date(&row.get::<String>(2)?)?,
        end_date: parse_date(&row.get::<String>(3)?)?,
    })
}

impl ScrumService {
    pub async fn create_sprint(&self, new: &NewSprint) -> Result<Sprint, DatabaseError> {
        new.validate()?;

        let tx = self.db().begin().await?;
        let result: Result<i64, DatabaseError> = async {
            tx.execute(
                "INSERT INTO sprints (project_id, start_date, end_date) VALUES (?1, ?2, ?3)",
                libsql::params![
                    new.project_id,
                    format_date(new.start_date),
                    format_date(new.end_date)
                ],
            )
            .await?;
            Ok(tx.last_insert_rowid())
        }
        .await;
        let id = finish(tx, "create_sprint", result).await?;

        Ok(Sprint {
            id,
            project_id: new.project_id,
            start_date: new.start_date,
            end_date: new.end_date,
        })
    }

    pub async fn get_sprint(&self, id: i64) -> Result<Sprint, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM sprints WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("Sprint", id))?;
        row_to_sprint(&row)
    }

    /// Sprints of a project, earliest first.
    pub async fn list_sprints_for_project(
        &self,
        project_id: i64,
    ) -> Result<Vec<Sprint>, DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM sprints WHERE project_id = ?1 ORDER BY start_date, id"
                ),
                [project_id],
            )
            .await?;
        collect_rows(rows, row_to_sprint).await
    }

    /// Sprints whose date range includes `date` (both ends inclusive).
    pub async fn sprints_active_on(&self, date: NaiveDate) -> Result<Vec<Sprint>, DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM sprints
                     WHERE start_date <= ?1 AND end_date >= ?1
                     ORDER BY start_date, id"
                ),
                [format_date(date)],
            )
            .await?;
        collect_rows(rows, row_to_sprint).await
    }

    pub async fn update_sprint(
        &self,
        id: i64,
        update: &SprintUpdate,
    ) -> Result<Sprint, DatabaseError> {
        let current = self.get_sprint(id).await?;
        let start = update.start_date.unwrap_or(current.start_date);
        let end = update.end_date.unwrap_or(current.end_date);
        validate::sprint_dates(start, end)?;

        let mut a = Assignments::default();
        if let Some(date) = update.start_date {
            a.push("start_date", format_date(date));
        }
        if let Some(date) = update.end_date {
            a.push("end_date", format_date(date));
        }
        if a.is_empty() {
            return Ok(current);
        }

        apply_update(
            self.db(),
            "update_sprint",
            "Sprint",
            id,
            a.into_update("sprints", "id", id),
        )
        .await?;
        self.get_sprint(id).await
    }

    /// Delete a sprint and its retrospective. Its tasks stay, unscheduled.
    pub async fn delete_sprint(&self, id: i64) -> Result<(), DatabaseError> {
        delete_row(self.db(), "delete_sprint", "sprints", "Sprint", id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{date, seed_project, seed_sprint, test_service};
    use crate::updates::sprint::SprintUpdateBuilder;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_and_get() {
        let svc = test_service().await;
        let sprint = seed_sprint(&svc).await;
        let fetched = svc.get_sprint(sprint.id).await.unwrap();
        assert_eq!(fetched.start_date, date(2026, 3, 2));
        assert_eq!(fetched.end_date, date(2026, 3, 13));
        assert_eq!(fetched.project_id, sprint.project_id);
    }

    #[tokio::test]
    async fn reversed_dates_rejected_before_sql() {
        let svc = test_service().await;
        let project = seed_project(&svc, "P").await;
        let err = svc
            .create_sprint(&NewSprint {
                project_id: project.id,
                start_date: date(2026, 3, 13),
                end_date: date(2026, 3, 2),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_project_is_conflict() {
        let svc = test_service().await;
        let err = svc
            .create_sprint(&NewSprint {
                project_id: 77,
                start_date: date(2026, 3, 2),
                end_date: date(2026, 3, 2),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict(_)), "{err:?}");
    }

    #[tokio::test]
    async fn list_for_project_in_date_order() {
        let svc = test_service().await;
        let project = seed_project(&svc, "P").await;
        for (start, end) in [((2026, 3, 16), (2026, 3, 27)), ((2026, 3, 2), (2026, 3, 13))] {
            svc.create_sprint(&NewSprint {
                project_id: project.id,
                start_date: date(start.0, start.1, start.2),
                end_date: date(end.0, end.1, end.2),
            })
            .await
            .unwrap();
        }
        let sprints = svc.list_sprints_for_project(project.id).await.unwrap();
        let starts: Vec<_> = sprints.iter().map(|s| s.start_date).collect();
        assert_eq!(starts, vec![date(2026, 3, 2), date(2026, 3, 16)]);
    }

    #[tokio::test]
    async fn active_on_is_inclusive() {
        let svc = test_service().await;
        let sprint = seed_sprint(&svc).await;
        assert_eq!(svc.sprints_active_on(date(2026, 3, 2)).await.unwrap().len(), 1);
        assert_eq!(svc.sprints_active_on(date(2026, 3, 13)).await.unwrap()[0].id, sprint.id);
        assert!(svc.sprints_active_on(date(2026, 3, 14)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_checks_merged_dates() {
        let svc = test_service().await;
        let sprint = seed_sprint(&svc).await;

        let bad = SprintUpdateBuilder::new().start_date(date(2026, 3, 20)).build();
        assert!(matches!(
            svc.update_sprint(sprint.id, &bad).await,
            Err(DatabaseError::Validation(_))
        ));

        let good = SprintUpdateBuilder::new().end_date(date(2026, 3, 20)).build();
        let updated = svc.update_sprint(sprint.id, &good).await.unwrap();
        assert_eq!(updated.end_date, date(2026, 3, 20));
        assert_eq!(updated.length_days(), 19);
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let svc = test_service().await;
        let sprint = seed_sprint(&svc).await;
        svc.delete_sprint(sprint.id).await.unwrap();
        assert!(matches!(
            svc.get_sprint(sprint.id).await,
            Err(DatabaseError::NotFound { .. })
        ));
    }
}
