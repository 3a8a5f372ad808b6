/// Optional fields for a partial identity update. `None` and empty values
/// leave the stored column untouched.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct IdentityChanges {
    pub email: Option<String>,
    pub role: Option<String>,
    /// Plaintext; hashed with a fresh salt before it reaches the store
    pub password: Option<String>,
}

impl IdentityChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        [&self.email, &self.role, &self.password]
            .iter()
            .all(|field| field.as_deref().is_none_or(str::is_empty))
    }

    pub(crate) fn supplied_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

impl std::fmt::Debug for IdentityChanges {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityChanges")
            .field("email", &self.email)
            .field("role", &self.role)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
