//! Retrospective repository.
//!
//! `improvements` and `positives` are ordered element collections, each in
//! its own table keyed by `(retrospective_id, position)`.

use scrum_core::entities::{NewRetrospective, Retrospective};
use scrum_core::validate;

use crate::error::DatabaseError;
use crate::finish;
use crate::repos::delete_row;
use crate::service::ScrumService;
use crate::updates::retrospective::RetrospectiveUpdate;

const SELECT_COLS: &str = "id, sprint_id, summary";

#[derive(Clone, Copy)]
enum ItemList {
    Improvements,
    Positives,
}

impl ItemList {
    const fn table(self) -> &'static str {
        match self {
            Self::Improvements => "retrospective_improvements",
            Self::Positives => "retrospective_positives",
        }
    }
}

/// Replace a list wholesale, renumbering positions from 0.
async fn write_items(
    conn: &libsql::Connection,
    list: ItemList,
    retrospective_id: i64,
    items: &[String],
) -> Result<(), DatabaseError> {
    let table = list.table();
    conn.execute(
        &format!("DELETE FROM {table} WHERE retrospective_id = ?1"),
        [retrospective_id],
    )
    .await?;
    for (position, item) in (0_i64..).zip(items) {
        conn.execute(
            &format!(
                "INSERT INTO {table} (retrospective_id, position, item) VALUES (?1, ?2, ?3)"
            ),
            libsql::params![retrospective_id, position, item.as_str()],
        )
        .await?;
    }
    Ok(())
}

async fn read_items(
    conn: &libsql::Connection,
    list: ItemList,
    retrospective_id: i64,
) -> Result<Vec<String>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT item FROM {} WHERE retrospective_id = ?1 ORDER BY position",
                list.table()
            ),
            [retrospective_id],
        )
        .await?;
    let mut items = Vec::new();
    while let Some(row) = rows.next().await? {
        items.push(row.get::<String>(0)?);
    }
    Ok(items)
}

fn decode(row: &libsql::Row) -> Result<(i64, i64, String), DatabaseError> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}

fn validate_items(field: &str, items: &[String]) -> Result<(), DatabaseError> {
    for item in items {
        validate::non_blank(field, item)?;
    }
    Ok(())
}

impl ScrumService {
    async fn load_retrospective(
        &self,
        (id, sprint_id, summary): (i64, i64, String),
    ) -> Result<Retrospective, DatabaseError> {
        let conn = self.db().conn();
        Ok(Retrospective {
            id,
            sprint_id,
            summary,
            improvements: read_items(conn, ItemList::Improvements, id).await?,
            positives: read_items(conn, ItemList::Positives, id).await?,
        })
    }

    /// A second retrospective for the same sprint is a `Conflict`.
    pub async fn create_retrospective(
        &self,
        new: &NewRetrospective,
    ) -> Result<Retrospective, DatabaseError> {
        new.validate()?;

        let tx = self.db().begin().await?;
        let result: Result<i64, DatabaseError> = async {
            tx.execute(
                "INSERT INTO retrospectives (sprint_id, summary) VALUES (?1, ?2)",
                libsql::params![new.sprint_id, new.summary.as_str()],
            )
            .await?;
            let id = tx.last_insert_rowid();
            write_items(&tx, ItemList::Improvements, id, &new.improvements).await?;
            write_items(&tx, ItemList::Positives, id, &new.positives).await?;
            Ok(id)
        }
        .await;
        let id = finish(tx, "create_retrospective", result).await?;

        Ok(Retrospective {
            id,
            sprint_id: new.sprint_id,
            summary: new.summary.clone(),
            improvements: new.improvements.clone(),
            positives: new.positives.clone(),
        })
    }

    pub async fn get_retrospective(&self, id: i64) -> Result<Retrospective, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM retrospectives WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("Retrospective", id))?;
        self.load_retrospective(decode(&row)?).await
    }

    pub async fn get_retrospective_for_sprint(
        &self,
        sprint_id: i64,
    ) -> Result<Option<Retrospective>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM retrospectives WHERE sprint_id = ?1"),
                [sprint_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(self.load_retrospective(decode(&row)?).await?)),
            None => Ok(None),
        }
    }

    /// Every retrospective, oldest first.
    pub async fn list_retrospectives(&self, limit: u32) -> Result<Vec<Retrospective>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM retrospectives ORDER BY id LIMIT {limit}"),
                (),
            )
            .await?;
        // Rows read from the live statement, so decode before the next step.
        let mut found = Vec::new();
        while let Some(row) = rows.next().await? {
            found.push(decode(&row)?);
        }
        let mut retrospectives = Vec::with_capacity(found.len());
        for decoded in found {
            retrospectives.push(self.load_retrospective(decoded).await?);
        }
        Ok(retrospectives)
    }

    pub async fn update_retrospective(
        &self,
        id: i64,
        update: &RetrospectiveUpdate,
    ) -> Result<Retrospective, DatabaseError> {
        if let Some(ref summary) = update.summary {
            validate::non_blank("summary", summary)?;
        }
        if let Some(ref items) = update.improvements {
            validate_items("improvement", items)?;
        }
        if let Some(ref items) = update.positives {
            validate_items("positive", items)?;
        }

        self.get_retrospective(id).await?;

        let tx = self.db().begin().await?;
        let result: Result<(), DatabaseError> = async {
            if let Some(ref summary) = update.summary {
                tx.execute(
                    "UPDATE retrospectives SET summary = ?1 WHERE id = ?2",
                    libsql::params![summary.as_str(), id],
                )
                .await?;
            }
            if let Some(ref items) = update.improvements {
                write_items(&tx, ItemList::Improvements, id, items).await?;
            }
            if let Some(ref items) = update.positives {
                write_items(&tx, ItemList::Positives, id, items).await?;
            }
            Ok(())
        }
        .await;
        finish(tx, "update_retrospective", result).await?;

        self.get_retrospective(id).await
    }

    pub async fn delete_retrospective(&self, id: i64) -> Result<(), DatabaseError> {
        delete_row(
            self.db(),
            "delete_retrospective",
            "retrospectives",
            "Retrospective",
            id,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seed_sprint, test_service};
    use crate::updates::retrospective::RetrospectiveUpdateBuilder;
    use pretty_assertions::assert_eq;

    fn new_retro(sprint_id: i64) -> NewRetrospective {
        NewRetrospective {
            sprint_id,
            summary: "Shipped the importer".into(),
            improvements: vec!["Smaller PRs".into(), "Earlier demos".into()],
            positives: vec!["Pairing worked".into()],
        }
    }

    #[tokio::test]
    async fn create_and_get_keeps_order() {
        let svc = test_service().await;
        let sprint = seed_sprint(&svc).await;
        let created = svc.create_retrospective(&new_retro(sprint.id)).await.unwrap();

        let fetched = svc.get_retrospective(created.id).await.unwrap();
        assert_eq!(fetched.improvements, vec!["Smaller PRs", "Earlier demos"]);
        assert_eq!(fetched.positives, vec!["Pairing worked"]);
        assert_eq!(fetched.summary, "Shipped the importer");
    }

    #[tokio::test]
    async fn one_per_sprint() {
        let svc = test_service().await;
        let sprint = seed_sprint(&svc).await;
        svc.create_retrospective(&new_retro(sprint.id)).await.unwrap();
        let err = svc
            .create_retrospective(&new_retro(sprint.id))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict(_)), "{err:?}");
    }

    #[tokio::test]
    async fn lookup_by_sprint() {
        let svc = test_service().await;
        let sprint = seed_sprint(&svc).await;
        assert!(svc.get_retrospective_for_sprint(sprint.id).await.unwrap().is_none());
        let created = svc.create_retrospective(&new_retro(sprint.id)).await.unwrap();
        let found = svc
            .get_retrospective_for_sprint(sprint.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn update_replaces_lists() {
        let svc = test_service().await;
        let sprint = seed_sprint(&svc).await;
        let retro = svc.create_retrospective(&new_retro(sprint.id)).await.unwrap();

        let update = RetrospectiveUpdateBuilder::new()
            .summary("Revised")
            .improvements(vec!["Only one".into()])
            .build();
        let updated = svc.update_retrospective(retro.id, &update).await.unwrap();
        assert_eq!(updated.summary, "Revised");
        assert_eq!(updated.improvements, vec!["Only one"]);
        assert_eq!(updated.positives, vec!["Pairing worked"]);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let svc = test_service().await;
        let update = RetrospectiveUpdateBuilder::new().positives(vec![]).build();
        assert!(matches!(
            svc.update_retrospective(5, &update).await,
            Err(DatabaseError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn deleting_sprint_removes_retrospective() {
        let svc = test_service().await;
        let sprint = seed_sprint(&svc).await;
        let retro = svc.create_retrospective(&new_retro(sprint.id)).await.unwrap();
        svc.delete_sprint(sprint.id).await.unwrap();
        assert!(matches!(
            svc.get_retrospective(retro.id).await,
            Err(DatabaseError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn list_loads_every_retrospective_with_items() {
        let svc = test_service().await;
        let first = seed_sprint(&svc).await;
        let second = seed_sprint(&svc).await;
        svc.create_retrospective(&new_retro(first.id)).await.unwrap();
        let mut other = new_retro(second.id);
        other.summary = "Quiet sprint".into();
        other.improvements.clear();
        svc.create_retrospective(&other).await.unwrap();

        let all = svc.list_retrospectives(10).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].summary, "Shipped the importer");
        assert_eq!(all[0].improvements, vec!["Smaller PRs", "Earlier demos"]);
        assert_eq!(all[1].summary, "Quiet sprint");
        assert!(all[1].improvements.is_empty());
        assert_eq!(all[1].positives, vec!["Pairing worked"]);
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let svc = test_service().await;
        let sprint = seed_sprint(&svc).await;
        let retro = svc.create_retrospective(&new_retro(sprint.id)).await.unwrap();
        svc.delete_retrospective(retro.id).await.unwrap();
        assert!(svc.get_retrospective_for_sprint(sprint.id).await.unwrap().is_none());
        assert!(svc.list_retrospectives(10).await.unwrap().is_empty());
    }
}
