use crate::{Statement, StoreValue};

/// Builds `UPDATE <table> SET a = ?, b = ? WHERE <key> = ?` from only the
/// columns that were actually supplied.
///
/// Table and column names are `&'static str` so they can only come from code;
/// every value is bound to a placeholder.
#[derive(Debug, Clone)]
pub struct UpdateBuilder {
    table: &'static str,
    assignments: Vec<(&'static str, StoreValue)>,
}

impl UpdateBuilder {
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            assignments: Vec::new(),
        }
    }

    pub fn set(mut self, column: &'static str, value: impl Into<StoreValue>) -> Self {
        self.assignments.push((column, value.into()));
        self
    }

    /// Add the assignment only when `value` is present and non-empty.
    pub fn set_if_present<S: AsRef<str>>(self, column: &'static str, value: Option<S>) -> Self {
        match value {
            Some(v) if !v.as_ref().is_empty() => self.set(column, v.as_ref()),
            _ => self,
        }
    }

    pub fn columns(&self) -> Vec<&'static str> {
        self.assignments.iter().map(|(column, _)| *column).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// `None` when nothing was supplied, so the caller can skip the store.
    pub fn build(self, key_column: &'static str, key: impl Into<StoreValue>) -> Option<Statement> {
        if self.assignments.is_empty() {
            return None;
        }

        let set_clause = self
            .assignments
            .iter()
            .map(|(column, _)| format!("{} = ?", column))
            .collect::<Vec<_>>()
            .join(", ");

        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?",
            self.table, set_clause, key_column
        );

        let statement = self
            .assignments
            .into_iter()
            .fold(Statement::write(sql), |statement, (_, value)| {
                statement.bind(value)
            });

        Some(statement.bind(key))
    }
}
