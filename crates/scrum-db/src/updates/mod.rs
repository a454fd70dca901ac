//! Update builder types for entity mutations.
//!
//! Each builder produces an update struct with `Option` fields. Only `Some`
//! fields generate SET clauses in the dynamic UPDATE SQL. `Option<Option<T>>`
//! fields distinguish "leave as is" from "set to NULL".

pub mod project;
pub mod retrospective;
pub mod sprint;
pub mod task;
pub mod user;

/// Collects `column = ?N` assignments and their bound values.
#[derive(Debug, Default)]
pub(crate) struct Assignments {
    sets: Vec<String>,
    params: Vec<libsql::Value>,
}

impl Assignments {
    pub(crate) fn push(&mut self, column: &str, value: impl Into<libsql::Value>) {
        self.params.push(value.into());
        self.sets.push(format!("{column} = ?{}", self.params.len()));
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// `UPDATE {table} SET ... WHERE {key} = ?N` plus its parameters.
    pub(crate) fn into_update(
        mut self,
        table: &str,
        key: &str,
        id: i64,
    ) -> (String, Vec<libsql::Value>) {
        self.params.push(libsql::Value::Integer(id));
        let sql = format!(
            "UPDATE {table} SET {} WHERE {key} = ?{}",
            self.sets.join(", "),
            self.params.len()
        );
        (sql, self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_params_in_order() {
        let mut a = Assignments::default();
        a.push("title", "x");
        a.push("sprint_id", libsql::Value::Null);
        let (sql, params) = a.into_update("tasks_component_set", "id", 9);
        assert_eq!(
            sql,
            "UPDATE tasks_component_set SET title = ?1, sprint_id = ?2 WHERE id = ?3"
        );
        assert_eq!(params.len(), 3);
    }
}
