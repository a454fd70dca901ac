//! Shared test utilities for scrum-db unit tests.

pub(crate) mod helpers {
    use chrono::NaiveDate;
    use scrum_core::entities::{NewProject, NewSprint, NewUser, Project, Sprint, User};

    use crate::ScrumDb;
    use crate::service::ScrumService;

    /// Create an in-memory `ScrumService`.
    pub async fn test_service() -> ScrumService {
        let db = ScrumDb::open_local(":memory:").await.unwrap();
        ScrumService::from_db(db)
    }

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub async fn seed_user(svc: &ScrumService, email: &str) -> User {
        svc.create_user(&NewUser::new("Test User", email)).await.unwrap()
    }

    pub async fn seed_project(svc: &ScrumService, name: &str) -> Project {
        svc.create_project(&NewProject::new(name, None)).await.unwrap()
    }

    /// A project plus one two-week sprint starting 2026-03-02.
    pub async fn seed_sprint(svc: &ScrumService) -> Sprint {
        let project = seed_project(svc, "Sprint Host").await;
        svc.create_sprint(&NewSprint {
            project_id: project.id,
            start_date: date(2026, 3, 2),
            end_date: date(2026, 3, 13),
        })
        .await
        .unwrap()
    }
}
