pub mod authenticator;
pub mod error;
pub mod identity_changes;
pub mod identity_manager;
pub mod login_error;
pub mod login_policy;
pub mod login_state;

pub use authenticator::Authenticator;
pub use error::{IdentityError, IdentityErrorKind, Result};
pub use identity_changes::IdentityChanges;
pub use identity_manager::IdentityManager;
pub use login_error::LoginError;
pub use login_policy::{DEFAULT_MAX_LOGIN_ATTEMPTS, LoginPolicy};
pub use login_state::LoginState;

#[cfg(test)]
mod tests;
