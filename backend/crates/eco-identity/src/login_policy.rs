//! Bounded-retry login.
//!
//! ```text
//! Attempting(0) --fail--> Attempting(1) --fail--> ... --fail--> Locked
//!       |                        |
//!       +---------success--------+-----------------------> Authenticated
//! ```
//!
//! The policy counts attempts, not time. Once locked it never calls the
//! authenticator again, even with correct credentials.

use crate::{Authenticator, LoginError, LoginState};

use eco_core::Identity;

use log::{info, warn};

pub const DEFAULT_MAX_LOGIN_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone)]
pub struct LoginPolicy {
    max_attempts: u32,
    state: LoginState,
}

impl LoginPolicy {
    /// A zero maximum is raised to one.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            state: LoginState::Attempting(0),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn state(&self) -> LoginState {
        self.state
    }

    pub fn attempts_used(&self) -> u32 {
        match self.state {
            LoginState::Attempting(used) => used,
            LoginState::Locked => self.max_attempts,
            LoginState::Authenticated => 0,
        }
    }

    pub fn remaining_attempts(&self) -> u32 {
        match self.state {
            LoginState::Attempting(used) => self.max_attempts.saturating_sub(used),
            LoginState::Authenticated | LoginState::Locked => 0,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.state == LoginState::Locked
    }

    /// Run one attempt through `authenticator`.
    ///
    /// Blank credentials are refused without consuming an attempt. Every
    /// authenticator failure is counted, whatever its kind.
    pub async fn attempt<A>(
        &mut self,
        authenticator: &A,
        username: &str,
        password: &str,
    ) -> Result<Identity, LoginError>
    where
        A: Authenticator + ?Sized,
    {
        let used = match self.state {
            LoginState::Attempting(used) => used,
            LoginState::Authenticated => return Err(LoginError::already_authenticated()),
            LoginState::Locked => return Err(LoginError::locked(self.max_attempts)),
        };

        if username.trim().is_empty() || password.is_empty() {
            return Err(LoginError::missing_credentials());
        }

        match authenticator.authenticate(username.trim(), password).await {
            Ok(identity) => {
                self.state = LoginState::Authenticated;
                info!("Login succeeded after {} failed attempt(s)", used);
                Ok(identity)
            }
            Err(source) => {
                let used = used + 1;
                let remaining = self.max_attempts.saturating_sub(used);

                if remaining == 0 {
                    self.state = LoginState::Locked;
                    warn!("Login locked after {} failed attempt(s)", used);
                } else {
                    self.state = LoginState::Attempting(used);
                    warn!(
                        "Login attempt {} of {} failed",
                        used, self.max_attempts
                    );
                }

                Err(LoginError::rejected(remaining, source))
            }
        }
    }
}

impl Default for LoginPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LOGIN_ATTEMPTS)
    }
}
