mod config;
mod database_backend;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod security_config;

pub use config::Config;
pub use database_backend::DatabaseBackend;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use security_config::SecurityConfig;

const CONFIG_DIR_ENV: &str = "ECO_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".eco";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_DATABASE_FILENAME: &str = "ecotech.db";
const DEFAULT_MYSQL_PORT: u16 = 3306;
const DEFAULT_MAX_CONNECTIONS: u32 = 1;

const DEFAULT_HASH_MEMORY_KIB: u32 = 19_456;
const DEFAULT_HASH_ITERATIONS: u32 = 2;
const DEFAULT_HASH_PARALLELISM: u32 = 1;
const DEFAULT_MAX_LOGIN_ATTEMPTS: u32 = 3;
const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;

const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;

#[cfg(test)]
mod tests;
