use crate::{
    Authenticator, IdentityError, IdentityErrorKind, LoginError, LoginPolicy, LoginState,
    Result as IdentityErrorResult,
};

use eco_core::Identity;

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use googletest::prelude::*;

const USERNAME: &str = "admin";
const PASSWORD: &str = "secret1";

/// Accepts a single fixed pair and counts every call.
struct FakeAuthenticator {
    calls: AtomicU32,
    store_down: bool,
}

impl FakeAuthenticator {
    fn new() -> Self {
        Self {
            calls: AtomicU32::new(0),
            store_down: false,
        }
    }

    fn unavailable() -> Self {
        Self {
            calls: AtomicU32::new(0),
            store_down: true,
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Authenticator for FakeAuthenticator {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> IdentityErrorResult<Identity> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.store_down {
            return Err(IdentityError::store("database is locked"));
        }

        match (username, password) {
            (USERNAME, PASSWORD) => Ok(Identity::from_stored(
                1,
                USERNAME,
                "admin@x.com",
                "admin",
                "$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaA",
            )),
            (USERNAME, _) => Err(IdentityError::invalid_credentials("incorrect password")),
            _ => Err(IdentityError::invalid_credentials("user not found")),
        }
    }
}

#[test]
fn given_new_policy_then_attempting_zero() {
    let policy = LoginPolicy::new(3);

    assert_that!(policy.state(), eq(LoginState::Attempting(0)));
    assert_that!(policy.remaining_attempts(), eq(3));
    assert!(!policy.state().is_terminal());
}

#[test]
fn given_zero_max_attempts_then_one_attempt_allowed() {
    let policy = LoginPolicy::new(0);

    assert_that!(policy.max_attempts(), eq(1));
}

#[tokio::test]
async fn given_correct_credentials_when_attempted_then_authenticated() {
    // Given
    let authenticator = FakeAuthenticator::new();
    let mut policy = LoginPolicy::new(3);

    // When
    let identity = policy.attempt(&authenticator, USERNAME, PASSWORD).await;

    // Then
    assert_that!(identity.unwrap().id, some(eq(1)));
    assert_that!(policy.state(), eq(LoginState::Authenticated));
}

#[tokio::test]
async fn given_failure_then_success_when_attempted_then_authenticated() {
    // Given
    let authenticator = FakeAuthenticator::new();
    let mut policy = LoginPolicy::new(3);

    // When
    let first = policy.attempt(&authenticator, USERNAME, "wrong").await;
    let second = policy.attempt(&authenticator, USERNAME, PASSWORD).await;

    // Then
    assert_that!(first.unwrap_err().remaining(), some(eq(2)));
    assert!(second.is_ok());
    assert_that!(policy.state(), eq(LoginState::Authenticated));
}

#[tokio::test]
async fn given_three_failures_when_max_is_three_then_locked() {
    // Given
    let authenticator = FakeAuthenticator::new();
    let mut policy = LoginPolicy::new(3);

    // When
    for wrong in ["a", "b", "c"] {
        let result = policy.attempt(&authenticator, USERNAME, wrong).await;
        assert!(matches!(result, Err(LoginError::Rejected { .. })));
    }

    // Then
    assert_that!(policy.state(), eq(LoginState::Locked));
    assert_that!(policy.attempts_used(), eq(3));
    assert_that!(policy.remaining_attempts(), eq(0));
}

#[tokio::test]
async fn given_locked_policy_when_correct_credentials_then_not_attempted() {
    // Given
    let authenticator = FakeAuthenticator::new();
    let mut policy = LoginPolicy::new(3);
    for _ in 0..3 {
        let _ = policy.attempt(&authenticator, "ghost", "nope").await;
    }
    assert_that!(authenticator.calls(), eq(3));

    // When
    let result = policy.attempt(&authenticator, USERNAME, PASSWORD).await;

    // Then
    assert!(matches!(result, Err(LoginError::Locked { attempts: 3, .. })));
    assert_that!(authenticator.calls(), eq(3));
    assert!(policy.is_locked());
}

#[tokio::test]
async fn given_unknown_user_and_wrong_password_then_same_rejection_kind() {
    // Given
    let authenticator = FakeAuthenticator::new();
    let mut policy = LoginPolicy::new(5);

    // When
    let unknown = policy.attempt(&authenticator, "ghost", PASSWORD).await;
    let wrong = policy.attempt(&authenticator, USERNAME, "wrong").await;

    // Then
    let kind_of = |result: std::result::Result<Identity, LoginError>| match result {
        Err(LoginError::Rejected { source, .. }) => Some(source.kind()),
        _ => None,
    };
    assert_that!(kind_of(unknown), some(eq(IdentityErrorKind::InvalidCredentials)));
    assert_that!(kind_of(wrong), some(eq(IdentityErrorKind::InvalidCredentials)));
}

#[tokio::test]
async fn given_blank_credentials_when_attempted_then_no_attempt_consumed() {
    // Given
    let authenticator = FakeAuthenticator::new();
    let mut policy = LoginPolicy::new(3);

    // When
    let blank_user = policy.attempt(&authenticator, "   ", PASSWORD).await;
    let blank_password = policy.attempt(&authenticator, USERNAME, "").await;

    // Then
    assert!(matches!(blank_user, Err(LoginError::MissingCredentials { .. })));
    assert!(matches!(blank_password, Err(LoginError::MissingCredentials { .. })));
    assert_that!(policy.state(), eq(LoginState::Attempting(0)));
    assert_that!(authenticator.calls(), eq(0));
}

#[tokio::test]
async fn given_store_failures_when_attempted_then_attempts_still_counted() {
    // Given
    let authenticator = FakeAuthenticator::unavailable();
    let mut policy = LoginPolicy::new(2);

    // When
    let first = policy.attempt(&authenticator, USERNAME, PASSWORD).await;
    let second = policy.attempt(&authenticator, USERNAME, PASSWORD).await;

    // Then
    assert_that!(first.unwrap_err().remaining(), some(eq(1)));
    assert_that!(second.unwrap_err().remaining(), some(eq(0)));
    assert_that!(policy.state(), eq(LoginState::Locked));
}

#[tokio::test]
async fn given_authenticated_policy_when_attempted_again_then_already_authenticated() {
    // Given
    let authenticator = FakeAuthenticator::new();
    let mut policy = LoginPolicy::new(3);
    policy
        .attempt(&authenticator, USERNAME, PASSWORD)
        .await
        .unwrap();

    // When
    let result = policy.attempt(&authenticator, USERNAME, PASSWORD).await;

    // Then
    assert!(matches!(result, Err(LoginError::AlreadyAuthenticated { .. })));
    assert_that!(authenticator.calls(), eq(1));
}
