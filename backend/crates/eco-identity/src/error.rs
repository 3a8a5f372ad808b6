use eco_core::CoreError;
use eco_db::DbError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// What went wrong, without the details. Callers branch on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityErrorKind {
    Connection,
    Store,
    NotFound,
    Duplicate,
    InvalidCredentials,
    Validation,
    Hashing,
}

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Store unavailable: {message} {location}")]
    Connection {
        message: String,
        location: ErrorLocation,
    },

    #[error("Store error: {message} {location}")]
    Store {
        message: String,
        location: ErrorLocation,
    },

    #[error("Not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    #[error("Duplicate: {message} {location}")]
    Duplicate {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid credentials: {message} {location}")]
    InvalidCredentials {
        message: String,
        location: ErrorLocation,
    },

    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Hashing error: {message} {location}")]
    Hashing {
        message: String,
        location: ErrorLocation,
    },
}

impl IdentityError {
    #[track_caller]
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn duplicate<S: Into<String>>(message: S) -> Self {
        Self::Duplicate {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_credentials<S: Into<String>>(message: S) -> Self {
        Self::InvalidCredentials {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn hashing<S: Into<String>>(message: S) -> Self {
        Self::Hashing {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn kind(&self) -> IdentityErrorKind {
        match self {
            Self::Connection { .. } => IdentityErrorKind::Connection,
            Self::Store { .. } => IdentityErrorKind::Store,
            Self::NotFound { .. } => IdentityErrorKind::NotFound,
            Self::Duplicate { .. } => IdentityErrorKind::Duplicate,
            Self::InvalidCredentials { .. } => IdentityErrorKind::InvalidCredentials,
            Self::Validation { .. } => IdentityErrorKind::Validation,
            Self::Hashing { .. } => IdentityErrorKind::Hashing,
        }
    }

    /// The human-readable message, without the source location.
    pub fn message(&self) -> &str {
        match self {
            Self::Connection { message, .. }
            | Self::Store { message, .. }
            | Self::NotFound { message, .. }
            | Self::Duplicate { message, .. }
            | Self::InvalidCredentials { message, .. }
            | Self::Validation { message, .. }
            | Self::Hashing { message, .. } => message,
        }
    }
}

impl From<DbError> for IdentityError {
    #[track_caller]
    fn from(error: DbError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match error {
            DbError::Connection { message, .. } => Self::Connection { message, location },
            DbError::Statement { source, .. } => Self::Store {
                message: source.to_string(),
                location,
            },
            DbError::Migration { message, .. } | DbError::Decode { message, .. } => {
                Self::Store { message, location }
            }
        }
    }
}

impl From<CoreError> for IdentityError {
    #[track_caller]
    fn from(error: CoreError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match error {
            CoreError::Validation { message, .. } => Self::Validation { message, location },
            CoreError::InvalidHashCost { message, .. } | CoreError::Hashing { message, .. } => {
                Self::Hashing { message, location }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, IdentityError>;
