use crate::{DbError, Result as DbErrorResult};

use std::path::PathBuf;
use std::str::FromStr;

use sqlx::ConnectOptions;
use sqlx::any::AnyConnectOptions;
use sqlx::migrate::Migrator;
use sqlx::mysql::MySqlConnectOptions;

static SQLITE_MIGRATOR: Migrator = sqlx::migrate!("./migrations/sqlite");
static MYSQL_MIGRATOR: Migrator = sqlx::migrate!("./migrations/mysql");

/// SQL dialect of a target. Placeholders are `?` in both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    MySql,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::MySql => "mysql",
        }
    }

    /// Connection-scoped "last generated id" query.
    pub(crate) fn last_insert_id_sql(&self) -> &'static str {
        match self {
            Self::Sqlite => "SELECT last_insert_rowid()",
            Self::MySql => "SELECT CAST(LAST_INSERT_ID() AS SIGNED)",
        }
    }

    pub(crate) fn migrator(&self) -> &'static Migrator {
        match self {
            Self::Sqlite => &SQLITE_MIGRATOR,
            Self::MySql => &MYSQL_MIGRATOR,
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the store lives.
#[derive(Clone)]
pub enum StoreTarget {
    /// Private in-memory SQLite database, lost on disconnect
    SqliteMemory,
    /// SQLite file, created when missing
    Sqlite { path: PathBuf },
    /// MySQL server. Host, database and user are required.
    MySql {
        host: Option<String>,
        port: u16,
        database: Option<String>,
        user: Option<String>,
        password: Option<String>,
    },
}

impl StoreTarget {
    pub fn dialect(&self) -> Dialect {
        match self {
            Self::SqliteMemory | Self::Sqlite { .. } => Dialect::Sqlite,
            Self::MySql { .. } => Dialect::MySql,
        }
    }

    /// Human-readable target without credentials.
    pub fn describe(&self) -> String {
        match self {
            Self::SqliteMemory => String::from("sqlite::memory:"),
            Self::Sqlite { path } => format!("sqlite://{}", path.display()),
            Self::MySql {
                host,
                port,
                database,
                ..
            } => format!(
                "mysql://{}:{}/{}",
                host.as_deref().unwrap_or("<unset>"),
                port,
                database.as_deref().unwrap_or("<unset>")
            ),
        }
    }

    #[track_caller]
    pub(crate) fn connect_options(&self) -> DbErrorResult<AnyConnectOptions> {
        match self {
            Self::SqliteMemory => AnyConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::connection(format!("Invalid sqlite target: {}", e))),
            Self::Sqlite { path } => {
                let url = format!("sqlite://{}?mode=rwc", path.display());
                AnyConnectOptions::from_str(&url)
                    .map_err(|e| DbError::connection(format!("Invalid sqlite target: {}", e)))
            }
            Self::MySql {
                host,
                port,
                database,
                user,
                password,
            } => {
                let host = Self::required(host, "host")?;
                let database = Self::required(database, "database name")?;
                let user = Self::required(user, "user")?;

                let mut options = MySqlConnectOptions::new()
                    .host(host)
                    .port(*port)
                    .database(database)
                    .username(user);
                if let Some(password) = password {
                    options = options.password(password);
                }

                AnyConnectOptions::from_url(&options.to_url_lossy())
                    .map_err(|e| DbError::connection(format!("Invalid mysql target: {}", e)))
            }
        }
    }

    #[track_caller]
    fn required<'a>(value: &'a Option<String>, what: &str) -> DbErrorResult<&'a str> {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| DbError::connection(format!("mysql {} is not configured", what)))
    }
}

impl std::fmt::Debug for StoreTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MySql { user, password, .. } => f
                .debug_struct("MySql")
                .field("target", &self.describe())
                .field("user", user)
                .field("password", &password.as_ref().map(|_| "<redacted>"))
                .finish(),
            _ => write!(f, "{}", self.describe()),
        }
    }
}
