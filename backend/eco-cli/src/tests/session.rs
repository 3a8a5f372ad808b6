use crate::CliError;
use crate::session::login;
use crate::tests::{ScriptedPrompter, create_test_manager, seed_identity};

use googletest::prelude::*;

#[tokio::test]
async fn given_correct_credentials_when_login_then_identity_returned() {
    // Given
    let manager = create_test_manager();
    seed_identity(&manager, "admin", "admin", "secret1").await;
    let prompter = ScriptedPrompter::new(&["admin", "secret1"]);

    // When
    let identity = login(&manager, &prompter, 3).await.unwrap();

    // Then
    assert_that!(identity.username, eq("admin"));
    assert_that!(prompter.remaining(), eq(0));
}

#[tokio::test]
async fn given_two_failures_then_success_when_login_then_identity_returned() {
    // Given
    let manager = create_test_manager();
    seed_identity(&manager, "admin", "admin", "secret1").await;
    let prompter =
        ScriptedPrompter::new(&["admin", "nope", "ghost", "secret1", "admin", "secret1"]);

    // When
    let result = login(&manager, &prompter, 3).await;

    // Then
    assert!(result.is_ok());
}

#[tokio::test]
async fn given_three_failures_when_login_then_access_denied_and_no_more_prompts() {
    // Given
    let manager = create_test_manager();
    seed_identity(&manager, "admin", "admin", "secret1").await;
    let prompter = ScriptedPrompter::new(&[
        "admin", "a", "admin", "b", "admin", "c", "admin", "secret1",
    ]);

    // When
    let result = login(&manager, &prompter, 3).await;

    // Then
    assert!(matches!(result, Err(CliError::AccessDenied { .. })));
    assert_that!(prompter.remaining(), eq(2));
}

#[tokio::test]
async fn given_blank_entries_when_login_then_they_do_not_count() {
    // Given
    let manager = create_test_manager();
    seed_identity(&manager, "admin", "admin", "secret1").await;
    let prompter = ScriptedPrompter::new(&["", "", "admin", "", "admin", "secret1"]);

    // When
    let result = login(&manager, &prompter, 1).await;

    // Then
    assert!(result.is_ok());
}
