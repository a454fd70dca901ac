//! User repository.

use chrono::Utc;

use scrum_core::entities::{NewUser, User};
use scrum_core::validate;

use crate::error::DatabaseError;
use crate::finish;
use crate::helpers::{get_opt_string, non_empty, opt_text, parse_datetime, parse_optional_datetime};
use crate::repos::{apply_update, collect_rows, delete_row};
use crate::service::ScrumService;
use crate::updates::Assignments;
use crate::updates::user::UserUpdate;

pub(crate) const SELECT_COLS: &str = "id, name, email, bio, active, last_login, joined_at";

pub(crate) fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        bio: get_opt_string(row, 3)?,
        active: row.get::<i64>(4)? != 0,
        last_login: parse_optional_datetime(get_opt_string(row, 5)?.as_deref())?,
        joined_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

impl ScrumService {
    pub async fn create_user(&self, new: &NewUser) -> Result<User, DatabaseError> {
        new.validate()?;
        let joined_at = Utc::now();

        let tx = self.db().begin().await?;
        let result: Result<i64, DatabaseError> = async {
            tx.execute(
                "INSERT INTO users (name, email, bio, active, joined_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    new.name.as_str(),
                    new.email.as_str(),
                    opt_text(new.bio.as_deref()),
                    i64::from(new.active),
                    joined_at.to_rfc3339()
                ],
            )
            .await?;
            Ok(tx.last_insert_rowid())
        }
        .await;
        let id = finish(tx, "create_user", result).await?;

        Ok(User {
            id,
            name: new.name.clone(),
            email: new.email.clone(),
            bio: non_empty(new.bio.as_deref()),
            active: new.active,
            last_login: None,
            joined_at,
        })
    }

    pub async fn get_user(&self, id: i64) -> Result<User, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM users WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("User", id))?;
        row_to_user(&row)
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM users WHERE email = ?1"),
                [email],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn list_users(&self, active_only: bool, limit: u32) -> Result<Vec<User>, DatabaseError> {
        let filter = if active_only { "WHERE active = 1" } else { "" };
        let rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM users {filter} ORDER BY id LIMIT {limit}"),
                (),
            )
            .await?;
        collect_rows(rows, row_to_user).await
    }

    pub async fn update_user(&self, id: i64, update: &UserUpdate) -> Result<User, DatabaseError> {
        if let Some(ref name) = update.name {
            validate::non_blank("name", name)?;
        }
        if let Some(ref email) = update.email {
            validate::email(email)?;
        }

        let mut a = Assignments::default();
        if let Some(ref name) = update.name {
            a.push("name", name.clone());
        }
        if let Some(ref email) = update.email {
            a.push("email", email.clone());
        }
        if let Some(ref bio) = update.bio {
            a.push("bio", opt_text(bio.as_deref()));
        }
        if let Some(active) = update.active {
            a.push("active", i64::from(active));
        }
        if a.is_empty() {
            return self.get_user(id).await;
        }

        apply_update(self.db(), "update_user", "User", id, a.into_update("users", "id", id))
            .await?;
        self.get_user(id).await
    }

    /// Stamp `last_login` with the current time.
    pub async fn record_login(&self, id: i64) -> Result<User, DatabaseError> {
        let mut a = Assignments::default();
        a.push("last_login", Utc::now().to_rfc3339());
        apply_update(self.db(), "record_login", "User", id, a.into_update("users", "id", id))
            .await?;
        self.get_user(id).await
    }

    /// Delete a user. Memberships go with it; assigned tasks become unassigned.
    pub async fn delete_user(&self, id: i64) -> Result<(), DatabaseError> {
        delete_row(self.db(), "delete_user", "users", "User", id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seed_user, test_service};
    use crate::updates::user::UserUpdateBuilder;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_and_get() {
        let svc = test_service().await;
        let mut new = NewUser::new("Ada", "ada@example.com");
        new.bio = Some("Analyst".into());
        let created = svc.create_user(&new).await.unwrap();

        let fetched = svc.get_user(created.id).await.unwrap();
        assert_eq!(fetched.name, "Ada");
        assert_eq!(fetched.bio.as_deref(), Some("Analyst"));
        assert!(fetched.active);
        assert!(fetched.last_login.is_none());
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn empty_bio_is_stored_as_absent() {
        let svc = test_service().await;
        let mut new = NewUser::new("Bo", "bo@example.com");
        new.bio = Some(String::new());
        let created = svc.create_user(&new).await.unwrap();
        assert_eq!(created.bio, None);
        assert_eq!(svc.get_user(created.id).await.unwrap().bio, None);
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let svc = test_service().await;
        seed_user(&svc, "dup@example.com").await;
        let err = svc
            .create_user(&NewUser::new("Other", "dup@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict(_)), "{err:?}");
    }

    #[tokio::test]
    async fn invalid_email_never_reaches_sql() {
        let svc = test_service().await;
        let err = svc
            .create_user(&NewUser::new("Bad", "not-an-email"))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
        assert!(svc.list_users(false, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_by_email() {
        let svc = test_service().await;
        let user = seed_user(&svc, "find@example.com").await;
        let found = svc.find_user_by_email("find@example.com").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id));
        assert!(svc.find_user_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_active_only() {
        let svc = test_service().await;
        seed_user(&svc, "a@example.com").await;
        let mut inactive = NewUser::new("B", "b@example.com");
        inactive.active = false;
        svc.create_user(&inactive).await.unwrap();

        assert_eq!(svc.list_users(false, 10).await.unwrap().len(), 2);
        let active = svc.list_users(true, 10).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].email, "a@example.com");
    }

    #[tokio::test]
    async fn update_fields() {
        let svc = test_service().await;
        let user = seed_user(&svc, "u@example.com").await;
        let update = UserUpdateBuilder::new()
            .name("Renamed")
            .bio(Some("New bio".into()))
            .active(false)
            .build();
        let updated = svc.update_user(user.id, &update).await.unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.bio.as_deref(), Some("New bio"));
        assert!(!updated.active);
        assert_eq!(updated.email, "u@example.com");
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let svc = test_service().await;
        let update = UserUpdateBuilder::new().name("x").build();
        let err = svc.update_user(99, &update).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { id: 99, .. }));
    }

    #[tokio::test]
    async fn update_to_taken_email_rolls_back() {
        let svc = test_service().await;
        seed_user(&svc, "taken@example.com").await;
        let user = seed_user(&svc, "mine@example.com").await;
        let update = UserUpdateBuilder::new()
            .name("Should not stick")
            .email("taken@example.com")
            .build();
        let err = svc.update_user(user.id, &update).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict(_)));
        assert_eq!(svc.get_user(user.id).await.unwrap().name, "Test User");
    }

    #[tokio::test]
    async fn record_login_sets_timestamp() {
        let svc = test_service().await;
        let user = seed_user(&svc, "login@example.com").await;
        let logged = svc.record_login(user.id).await.unwrap();
        assert!(logged.last_login.is_some());
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let svc = test_service().await;
        let user = seed_user(&svc, "gone@example.com").await;
        svc.delete_user(user.id).await.unwrap();
        assert!(matches!(
            svc.get_user(user.id).await,
            Err(DatabaseError::NotFound { .. })
        ));
        assert!(matches!(
            svc.delete_user(user.id).await,
            Err(DatabaseError::NotFound { .. })
        ));
    }
}
