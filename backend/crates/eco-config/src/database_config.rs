use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_DATABASE_FILENAME, DEFAULT_MAX_CONNECTIONS,
    DEFAULT_MYSQL_PORT, DatabaseBackend,
};

use std::path::Path;

use serde::Deserialize;

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub backend: DatabaseBackend,
    /// SQLite file, relative to the config directory
    pub path: String,
    pub host: Option<String>,
    pub port: u16,
    pub name: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: DatabaseBackend::default(),
            path: String::from(DEFAULT_DATABASE_FILENAME),
            host: None,
            port: DEFAULT_MYSQL_PORT,
            name: None,
            user: None,
            password: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.max_connections == 0 {
            return Err(ConfigError::database(
                "database.max_connections must be at least 1",
            ));
        }

        match self.backend {
            DatabaseBackend::Sqlite => {
                // Keep the database file inside the config directory
                if Path::new(&self.path).is_absolute() || self.path.contains("..") {
                    return Err(ConfigError::database(
                        "database.path must be relative and cannot contain '..'",
                    ));
                }
                if self.path.trim().is_empty() {
                    return Err(ConfigError::database("database.path must not be empty"));
                }
            }
            DatabaseBackend::Mysql => {
                for (field, value) in [
                    ("host", &self.host),
                    ("name", &self.name),
                    ("user", &self.user),
                ] {
                    if value.as_deref().is_none_or(|v| v.trim().is_empty()) {
                        return Err(ConfigError::database(format!(
                            "database.{} is required for the mysql backend",
                            field
                        )));
                    }
                }
                if self.port == 0 {
                    return Err(ConfigError::database("database.port must be non-zero"));
                }
            }
        }

        Ok(())
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("backend", &self.backend)
            .field("path", &self.path)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("max_connections", &self.max_connections)
            .finish()
    }
}
