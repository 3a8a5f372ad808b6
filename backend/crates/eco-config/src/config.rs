use crate::{
    CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR,
    DatabaseBackend, DatabaseConfig, LoggingConfig, SecurityConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for ECO_CONFIG_DIR env var, else use ./.eco/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply legacy DB_* variables, then ECO_* overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Priority: ECO_CONFIG_DIR env var > ./.eco/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(ConfigError::directory)?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all sections. Call after load() to fail at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.database.validate()?;
        self.security.validate()?;

        if let Some(file) = &self.logging.file
            && (Path::new(file).is_absolute() || file.contains(".."))
        {
            return Err(ConfigError::logging(
                "logging.file must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Absolute path of the SQLite database file.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.database.path))
    }

    /// Absolute path of the log file, when file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match &self.logging.file {
            Some(file) => Ok(Some(
                Self::config_dir()?.join(&self.logging.dir).join(file),
            )),
            None => Ok(None),
        }
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");

        match self.database.backend {
            DatabaseBackend::Sqlite => info!("  database: sqlite ({})", self.database.path),
            DatabaseBackend::Mysql => info!(
                "  database: mysql {}:{}/{} as {} (password {})",
                self.database.host.as_deref().unwrap_or("<unset>"),
                self.database.port,
                self.database.name.as_deref().unwrap_or("<unset>"),
                self.database.user.as_deref().unwrap_or("<unset>"),
                if self.database.password.is_some() {
                    "set"
                } else {
                    "unset"
                }
            ),
        }
        info!(
            "  database: max {} connection(s)",
            self.database.max_connections
        );

        info!(
            "  security: argon2id m={}KiB t={} p={}, {} login attempt(s), min password {}",
            self.security.hash_memory_kib,
            self.security.hash_iterations,
            self.security.hash_parallelism,
            self.security.max_login_attempts,
            self.security.min_password_length
        );

        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
    }

    fn apply_env_overrides(&mut self) {
        // Legacy deployment variables
        Self::apply_env_option_string("DB_HOST", &mut self.database.host);
        Self::apply_env_option_string("DB_NAME", &mut self.database.name);
        Self::apply_env_option_string("DB_USER", &mut self.database.user);
        Self::apply_env_option_string("DB_PASSWORD", &mut self.database.password);
        Self::apply_env_parse("DB_PORT", &mut self.database.port);

        // Database
        Self::apply_env_parse("ECO_DATABASE_BACKEND", &mut self.database.backend);
        Self::apply_env_string("ECO_DATABASE_PATH", &mut self.database.path);
        Self::apply_env_option_string("ECO_DATABASE_HOST", &mut self.database.host);
        Self::apply_env_parse("ECO_DATABASE_PORT", &mut self.database.port);
        Self::apply_env_option_string("ECO_DATABASE_NAME", &mut self.database.name);
        Self::apply_env_option_string("ECO_DATABASE_USER", &mut self.database.user);
        Self::apply_env_option_string("ECO_DATABASE_PASSWORD", &mut self.database.password);
        Self::apply_env_parse(
            "ECO_DATABASE_MAX_CONNECTIONS",
            &mut self.database.max_connections,
        );

        // Security
        Self::apply_env_parse("ECO_HASH_MEMORY_KIB", &mut self.security.hash_memory_kib);
        Self::apply_env_parse("ECO_HASH_ITERATIONS", &mut self.security.hash_iterations);
        Self::apply_env_parse(
            "ECO_HASH_PARALLELISM",
            &mut self.security.hash_parallelism,
        );
        Self::apply_env_parse(
            "ECO_MAX_LOGIN_ATTEMPTS",
            &mut self.security.max_login_attempts,
        );
        Self::apply_env_parse(
            "ECO_MIN_PASSWORD_LENGTH",
            &mut self.security.min_password_length,
        );
        Self::apply_env_string("ECO_DEFAULT_ROLE", &mut self.security.default_role);

        // Logging
        Self::apply_env_parse("ECO_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("ECO_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("ECO_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values.
    /// Unparseable values are ignored.
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values.
    /// An empty value clears the option.
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val).filter(|v| !v.is_empty());
        }
    }
}
