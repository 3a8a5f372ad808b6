use crate::StoreValue;

/// Whether a statement only reads, or writes and must be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Read,
    Write,
}

/// Parameterized SQL. Caller data only ever travels in `params`, bound to `?`
/// placeholders, never spliced into `sql`.
#[derive(Clone, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<StoreValue>,
    kind: StatementKind,
}

impl Statement {
    pub fn read(sql: impl Into<String>) -> Self {
        Self::new(sql, StatementKind::Read)
    }

    pub fn write(sql: impl Into<String>) -> Self {
        Self::new(sql, StatementKind::Write)
    }

    pub fn new(sql: impl Into<String>, kind: StatementKind) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
            kind,
        }
    }

    /// Bind the next placeholder.
    pub fn bind(mut self, value: impl Into<StoreValue>) -> Self {
        self.params.push(value.into());
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[StoreValue] {
        &self.params
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    pub fn is_write(&self) -> bool {
        self.kind == StatementKind::Write
    }

    /// Inserts report the generated id instead of an affected-row count.
    pub fn is_insert(&self) -> bool {
        self.is_write()
            && self
                .sql
                .trim_start()
                .get(..6)
                .is_some_and(|verb| verb.eq_ignore_ascii_case("INSERT"))
    }

    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }
}

// Bound values can be password hashes, so only their count is printed.
impl std::fmt::Debug for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Statement")
            .field("sql", &self.sql)
            .field("params", &self.params.len())
            .field("kind", &self.kind)
            .finish()
    }
}
