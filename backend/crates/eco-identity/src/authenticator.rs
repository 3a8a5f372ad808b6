use crate::Result as IdentityErrorResult;

use eco_core::Identity;

use async_trait::async_trait;

/// Checks a username/password pair and returns the matching identity.
///
/// Unknown usernames and wrong passwords must fail with the same
/// [`crate::IdentityErrorKind::InvalidCredentials`] kind.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, username: &str, password: &str)
    -> IdentityErrorResult<Identity>;
}
