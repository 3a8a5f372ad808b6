//! Identity entity - a user record with an opaque password hash.
//!
//! The plaintext password is only ever borrowed for the duration of a hashing
//! call. What the entity holds is the PHC string, which is either computed
//! here from a fresh plaintext or copied verbatim from storage through
//! [`Identity::set_existing_hash`]. A stored hash is never re-hashed.

use crate::{CoreError, PasswordHasher, Result as CoreErrorResult};

use serde::Serialize;

/// Role assigned when none is specified.
pub const DEFAULT_ROLE: &str = "user";

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    /// Store-generated id; `None` until persisted
    pub id: Option<i64>,
    pub username: String,
    pub email: String,
    pub role: String,
    #[serde(skip_serializing)]
    password_hash: Option<String>,
}

impl Identity {
    /// Build a transient identity without a password.
    ///
    /// A blank or missing role falls back to [`DEFAULT_ROLE`].
    pub fn new(username: impl Into<String>, email: impl Into<String>, role: Option<&str>) -> Self {
        let role = role
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_ROLE);

        Self {
            id: None,
            username: username.into(),
            email: email.into(),
            role: role.to_string(),
            password_hash: None,
        }
    }

    /// Build a transient identity and hash `password` immediately.
    pub fn with_password(
        username: impl Into<String>,
        email: impl Into<String>,
        role: Option<&str>,
        password: &str,
        hasher: &PasswordHasher,
    ) -> CoreErrorResult<Self> {
        let mut identity = Self::new(username, email, role);
        identity.set_password(password, hasher)?;
        Ok(identity)
    }

    /// Rebuild an identity from a stored row. The hash is taken as-is.
    pub fn from_stored(
        id: i64,
        username: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let mut identity = Self {
            id: Some(id),
            username: username.into(),
            email: email.into(),
            role: role.into(),
            password_hash: None,
        };
        identity.set_existing_hash(password_hash);
        identity
    }

    /// Replace the hash with a fresh hash of `plain` (new salt).
    pub fn set_password(&mut self, plain: &str, hasher: &PasswordHasher) -> CoreErrorResult<()> {
        if plain.is_empty() {
            return Err(CoreError::validation("password must not be empty"));
        }
        self.password_hash = Some(hasher.hash(plain)?);
        Ok(())
    }

    /// Check `plain` against the stored hash. `false` when no hash is set.
    pub fn verify_password(&self, plain: &str) -> bool {
        self.password_hash
            .as_deref()
            .is_some_and(|hash| PasswordHasher::verify(plain, hash))
    }

    /// Assign a hash loaded from storage without re-hashing it.
    pub fn set_existing_hash(&mut self, hash: impl Into<String>) {
        self.password_hash = Some(hash.into());
    }

    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Check the fields every persisted identity must satisfy.
    #[track_caller]
    pub fn validate(&self) -> CoreErrorResult<()> {
        if self.username.trim().is_empty() {
            return Err(CoreError::validation("username must not be empty"));
        }
        if self.email.trim().is_empty() {
            return Err(CoreError::validation("email must not be empty"));
        }
        if self.role.trim().is_empty() {
            return Err(CoreError::validation("role must not be empty"));
        }
        if self.password_hash.as_deref().is_none_or(str::is_empty) {
            return Err(CoreError::validation("password hash must be set"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("role", &self.role)
            .field(
                "password_hash",
                &self.password_hash.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(
                f,
                "Identity(id={}, username={}, email={}, role={})",
                id, self.username, self.email, self.role
            ),
            None => write!(
                f,
                "Identity(id=<new>, username={}, email={}, role={})",
                self.username, self.email, self.role
            ),
        }
    }
}
