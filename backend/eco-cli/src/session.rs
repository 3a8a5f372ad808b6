use crate::error::{CliError, Result as CliErrorResult};
use crate::prompt::Prompter;

use eco_core::Identity;
use eco_identity::{Authenticator, LoginError, LoginPolicy};

use log::info;

/// Prompt for credentials until the policy authenticates or locks.
///
/// A locked policy ends the session with [`CliError::AccessDenied`]; nothing
/// is granted after that, whatever the caller does next.
pub async fn login<A, P>(
    authenticator: &A,
    prompter: &P,
    max_attempts: u32,
) -> CliErrorResult<Identity>
where
    A: Authenticator + ?Sized,
    P: Prompter + ?Sized,
{
    let mut policy = LoginPolicy::new(max_attempts);

    while !policy.state().is_terminal() {
        let username = prompter.input("Username")?;
        let password = prompter.secret("Password")?;

        match policy.attempt(authenticator, &username, &password).await {
            Ok(identity) => {
                info!("Session opened for '{}'", identity.username);
                eprintln!("Welcome, {} ({})", identity.username, identity.role);
                return Ok(identity);
            }
            Err(LoginError::MissingCredentials { .. }) => {
                eprintln!("Username and password are required");
            }
            Err(LoginError::Rejected {
                remaining, source, ..
            }) if remaining > 0 => {
                eprintln!(
                    "Login failed: {} ({} attempt(s) left)",
                    source.message(),
                    remaining
                );
            }
            Err(LoginError::Rejected { .. } | LoginError::Locked { .. }) => break,
            Err(e) => return Err(e.into()),
        }
    }

    Err(CliError::access_denied(format!(
        "{} failed login attempt(s)",
        policy.attempts_used()
    )))
}
