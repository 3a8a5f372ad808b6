use crate::{DbError, Result as DbErrorResult, StoreValue};

use sqlx::any::AnyRow;
use sqlx::{Column, Row, ValueRef};

/// One result row as an ordered field map.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: Vec<(String, StoreValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, keeping column order.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<StoreValue>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&StoreValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    #[track_caller]
    pub fn int(&self, name: &str) -> DbErrorResult<i64> {
        match self.get(name) {
            Some(StoreValue::Int(v)) => Ok(*v),
            Some(other) => Err(DbError::decode(format!(
                "field '{}' is {}, expected integer",
                name,
                other.type_name()
            ))),
            None => Err(DbError::decode(format!("field '{}' is missing", name))),
        }
    }

    #[track_caller]
    pub fn text(&self, name: &str) -> DbErrorResult<String> {
        match self.get(name) {
            Some(StoreValue::Text(v)) => Ok(v.clone()),
            Some(other) => Err(DbError::decode(format!(
                "field '{}' is {}, expected text",
                name,
                other.type_name()
            ))),
            None => Err(DbError::decode(format!("field '{}' is missing", name))),
        }
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StoreValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Decode every column of a driver row. Integers stay integers, everything
    /// else non-null is read as text.
    pub(crate) fn from_row(row: &AnyRow) -> DbErrorResult<Self> {
        let mut fields = Vec::with_capacity(row.columns().len());

        for column in row.columns() {
            let ordinal = column.ordinal();
            let is_null = row.try_get_raw(ordinal)?.is_null();

            let value = if is_null {
                StoreValue::Null
            } else if let Ok(v) = row.try_get::<i64, _>(ordinal) {
                StoreValue::Int(v)
            } else {
                let text = row.try_get::<String, _>(ordinal).map_err(|e| {
                    DbError::decode(format!("column '{}': {}", column.name(), e))
                })?;
                StoreValue::Text(text)
            };

            fields.push((column.name().to_string(), value));
        }

        Ok(Self { fields })
    }
}
