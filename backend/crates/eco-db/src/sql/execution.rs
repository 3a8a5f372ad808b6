use crate::{DbError, Record, Result as DbErrorResult};

/// Outcome of [`StoreConnector::execute`](crate::StoreConnector::execute).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Execution {
    /// Full result set of a read, in store order
    Rows(Vec<Record>),
    /// Generated id of a committed insert
    Inserted(i64),
    /// Rows touched by a committed update or delete
    Affected(u64),
}

impl Execution {
    #[track_caller]
    pub fn into_rows(self) -> DbErrorResult<Vec<Record>> {
        match self {
            Self::Rows(rows) => Ok(rows),
            other => Err(DbError::decode(format!("expected rows, got {}", other.label()))),
        }
    }

    #[track_caller]
    pub fn into_inserted_id(self) -> DbErrorResult<i64> {
        match self {
            Self::Inserted(id) => Ok(id),
            other => Err(DbError::decode(format!(
                "expected inserted id, got {}",
                other.label()
            ))),
        }
    }

    #[track_caller]
    pub fn into_affected(self) -> DbErrorResult<u64> {
        match self {
            Self::Affected(count) => Ok(count),
            other => Err(DbError::decode(format!(
                "expected affected rows, got {}",
                other.label()
            ))),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Rows(_) => "rows",
            Self::Inserted(_) => "inserted id",
            Self::Affected(_) => "affected rows",
        }
    }
}
