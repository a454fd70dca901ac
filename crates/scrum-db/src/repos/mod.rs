//! Repository modules for every scrumkit entity.
//!
//! The plain entities add methods to `ScrumService` via `impl ScrumService`
//! blocks. Tasks live under `tasks/`, one repository per mapping strategy.

pub mod membership;
pub mod project;
pub mod retrospective;
pub mod sprint;
pub mod tasks;
pub mod user;

/// Collect every row of a query through `map`.
pub(crate) async fn collect_rows<T>(
    mut rows: libsql::Rows,
    map: impl Fn(&libsql::Row) -> Result<T, crate::error::DatabaseError>,
) -> Result<Vec<T>, crate::error::DatabaseError> {
    let mut out = Vec::new();
    while let Some(row) = rows.next().await? {
        out.push(map(&row)?);
    }
    Ok(out)
}

/// Run one keyed UPDATE as its own unit of work; zero rows is `NotFound`.
pub(crate) async fn apply_update(
    db: &crate::ScrumDb,
    op: &'static str,
    entity: &str,
    id: i64,
    (sql, params): (String, Vec<libsql::Value>),
) -> Result<(), crate::error::DatabaseError> {
    let tx = db.begin().await?;
    let result = match tx.execute(&sql, libsql::params_from_iter(params)).await {
        Ok(0) => Err(crate::error::DatabaseError::not_found(entity, id)),
        Ok(_) => Ok(()),
        Err(e) => Err(e.into()),
    };
    crate::finish(tx, op, result).await
}

/// Delete one row by primary key as its own unit of work.
///
/// Dependent rows go with it through `ON DELETE` clauses.
pub(crate) async fn delete_row(
    db: &crate::ScrumDb,
    op: &'static str,
    table: &str,
    entity: &str,
    id: i64,
) -> Result<(), crate::error::DatabaseError> {
    apply_update(
        db,
        op,
        entity,
        id,
        (
            format!("DELETE FROM {table} WHERE id = ?1"),
            vec![libsql::Value::Integer(id)],
        ),
    )
    .await
}
