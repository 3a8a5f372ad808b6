use crate::IdentityError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoginError {
    #[error("Access denied: {attempts} failed attempt(s), login is locked {location}")]
    Locked {
        attempts: u32,
        location: ErrorLocation,
    },

    #[error("Login already succeeded {location}")]
    AlreadyAuthenticated { location: ErrorLocation },

    #[error("Username and password are required {location}")]
    MissingCredentials { location: ErrorLocation },

    #[error("Login rejected ({remaining} attempt(s) left): {source}")]
    Rejected {
        remaining: u32,
        #[source]
        source: IdentityError,
        location: ErrorLocation,
    },
}

impl LoginError {
    #[track_caller]
    pub(crate) fn locked(attempts: u32) -> Self {
        Self::Locked {
            attempts,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn already_authenticated() -> Self {
        Self::AlreadyAuthenticated {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn missing_credentials() -> Self {
        Self::MissingCredentials {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn rejected(remaining: u32, source: IdentityError) -> Self {
        Self::Rejected {
            remaining,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Attempts left after this error, if it came from a counted attempt.
    pub fn remaining(&self) -> Option<u32> {
        match self {
            Self::Rejected { remaining, .. } => Some(*remaining),
            Self::Locked { .. } => Some(0),
            _ => None,
        }
    }
}
