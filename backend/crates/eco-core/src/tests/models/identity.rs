use crate::{CoreError, DEFAULT_ROLE, HashCost, Identity, PasswordHasher};

use googletest::prelude::*;

fn fast_hasher() -> PasswordHasher {
    PasswordHasher::new(HashCost::minimal()).unwrap()
}

#[test]
fn given_plaintext_when_constructed_then_hash_is_set_and_verifies() {
    // Given / When
    let identity = Identity::with_password(
        "alice",
        "alice@x.com",
        Some("user"),
        "secret1",
        &fast_hasher(),
    )
    .unwrap();

    // Then
    assert_that!(identity.id, none());
    assert_that!(identity.password_hash(), some(not(eq("secret1"))));
    assert!(identity.verify_password("secret1"));
    assert!(!identity.verify_password("wrong"));
}

#[test]
fn given_no_role_when_constructed_then_default_role() {
    let identity = Identity::new("bob", "bob@x.com", None);
    let blank = Identity::new("carol", "carol@x.com", Some("   "));

    assert_that!(identity.role, eq(DEFAULT_ROLE));
    assert_that!(blank.role, eq(DEFAULT_ROLE));
}

#[test]
fn given_identity_without_hash_when_verifying_then_false() {
    let identity = Identity::new("bob", "bob@x.com", None);

    assert_that!(identity.password_hash(), none());
    assert!(!identity.verify_password(""));
    assert!(!identity.verify_password("anything"));
}

#[test]
fn given_stored_hash_when_loaded_then_hash_is_copied_verbatim() {
    // Given
    let hash = fast_hasher().hash("secret1").unwrap();

    // When
    let identity = Identity::from_stored(7, "alice", "alice@x.com", "admin", hash.clone());

    // Then
    assert_that!(identity.id, some(eq(7)));
    assert_that!(identity.password_hash(), some(eq(hash.as_str())));
    assert!(identity.verify_password("secret1"));
}

#[test]
fn given_stored_bcrypt_hash_when_loaded_then_password_still_verifies() {
    // Given: a row carried over from the bcrypt era
    let identity = Identity::from_stored(
        1,
        "alice",
        "a@x.com",
        "user",
        "$2b$04$pEvIDOcQ9myabKLMKdqavevKT3aL8oo2tGawfXaLSTCJ.RCuTeHHy",
    );

    // When / Then
    assert!(identity.verify_password("secret1"));
    assert!(!identity.verify_password("wrong"));
}

#[test]
fn given_new_password_when_set_then_old_no_longer_verifies() {
    let hasher = fast_hasher();
    let mut identity =
        Identity::with_password("alice", "alice@x.com", None, "secret1", &hasher).unwrap();

    identity.set_password("secret2", &hasher).unwrap();

    assert!(!identity.verify_password("secret1"));
    assert!(identity.verify_password("secret2"));
}

#[test]
fn given_empty_password_when_set_then_validation_error() {
    let mut identity = Identity::new("alice", "alice@x.com", None);

    let result = identity.set_password("", &fast_hasher());

    assert!(matches!(result, Err(CoreError::Validation { .. })));
    assert_that!(identity.password_hash(), none());
}

#[test]
fn given_blank_username_when_validated_then_error() {
    let identity =
        Identity::with_password("  ", "alice@x.com", None, "secret1", &fast_hasher()).unwrap();

    assert!(matches!(
        identity.validate(),
        Err(CoreError::Validation { .. })
    ));
}

#[test]
fn given_missing_hash_when_validated_then_error() {
    let identity = Identity::new("alice", "alice@x.com", None);

    assert!(matches!(
        identity.validate(),
        Err(CoreError::Validation { .. })
    ));
}

#[test]
fn given_complete_identity_when_validated_then_ok() {
    let identity =
        Identity::with_password("alice", "alice@x.com", None, "secret1", &fast_hasher()).unwrap();

    assert_that!(identity.validate(), ok(anything()));
}

#[test]
fn given_identity_when_debug_formatted_then_hash_is_redacted() {
    let identity =
        Identity::with_password("alice", "alice@x.com", None, "secret1", &fast_hasher()).unwrap();
    let hash = identity.password_hash().unwrap().to_string();

    let debug = format!("{:?}", identity);

    assert_that!(debug, contains_substring("<redacted>"));
    assert_that!(debug, not(contains_substring(hash.as_str())));
}

#[test]
fn given_identity_when_serialized_then_hash_is_skipped() {
    let identity =
        Identity::with_password("alice", "alice@x.com", None, "secret1", &fast_hasher()).unwrap();

    let json = serde_json::to_string(&identity).unwrap();

    assert_that!(json, contains_substring("\"username\":\"alice\""));
    assert_that!(json, not(contains_substring("password_hash")));
}
