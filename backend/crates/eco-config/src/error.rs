use std::panic::Location;
use std::path::PathBuf;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error as ThisError;

/// Failures while locating, reading or validating the eco configuration.
///
/// Each `config.toml` section reports through its own variant so callers can
/// tell a bad `[database]` block from a bad `[security]` one.
#[derive(ThisError, Debug)]
pub enum ConfigError {
    #[error("Cannot resolve config directory: {source} {location}")]
    Directory {
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Invalid [database] setting: {message} {location}")]
    Database {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid [security] setting: {message} {location}")]
    Security {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid [logging] setting: {message} {location}")]
    Logging {
        message: String,
        location: ErrorLocation,
    },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[track_caller]
    pub fn directory(source: std::io::Error) -> Self {
        Self::Directory {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn security(message: impl Into<String>) -> Self {
        Self::Security {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// The `config.toml` section at fault, if the error is about one.
    pub fn section(&self) -> Option<&'static str> {
        match self {
            Self::Database { .. } => Some("database"),
            Self::Security { .. } => Some("security"),
            Self::Logging { .. } => Some("logging"),
            Self::Directory { .. } | Self::Io { .. } | Self::Toml { .. } => None,
        }
    }
}

pub type ConfigErrorResult<T> = StdResult<T, ConfigError>;
