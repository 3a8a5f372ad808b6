#![allow(dead_code)]

use eco_core::{HashCost, Identity, PasswordHasher};
use eco_db::{ConnectionSettings, StoreConnector};
use eco_identity::IdentityManager;

/// Creates a manager over a private in-memory store with the cheapest hash cost
pub fn create_test_manager() -> IdentityManager {
    let store = StoreConnector::new(ConnectionSettings::in_memory());
    let hasher = PasswordHasher::new(HashCost::minimal()).expect("Minimal hash cost is valid");
    IdentityManager::new(store, hasher)
}

/// Builds and persists an identity, returning it with its id bound
pub async fn create_test_identity(
    manager: &IdentityManager,
    username: &str,
    email: &str,
    role: Option<&str>,
    password: &str,
) -> Identity {
    let mut identity = manager
        .build_identity(username, email, role, password)
        .await
        .expect("Failed to build test identity");
    manager
        .create(&mut identity)
        .await
        .expect("Failed to create test identity");
    identity
}
