use eco_config::ConfigError;
use eco_identity::{IdentityError, LoginError};

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("{}", .0.message())]
    Identity(#[from] IdentityError),

    #[error("{0}")]
    Login(#[from] LoginError),

    #[error("Access denied: {message} {location}")]
    AccessDenied {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid input: {message} {location}")]
    Input {
        message: String,
        location: ErrorLocation,
    },

    #[error("Prompt failed: {message} {location}")]
    Prompt {
        message: String,
        location: ErrorLocation,
    },

    #[error("Logger error: {message}")]
    Logger { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    #[track_caller]
    pub fn access_denied<S: Into<String>>(message: S) -> Self {
        Self::AccessDenied {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn input<S: Into<String>>(message: S) -> Self {
        Self::Input {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn prompt<S: Into<String>>(message: S) -> Self {
        Self::Prompt {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<eco_core::CoreError> for CliError {
    #[track_caller]
    fn from(error: eco_core::CoreError) -> Self {
        Self::Identity(IdentityError::from(error))
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
