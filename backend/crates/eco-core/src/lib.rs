pub mod error;
pub mod hashing;
pub mod models;

pub use error::{CoreError, Result};
pub use hashing::hash_cost::HashCost;
pub use hashing::password_hasher::PasswordHasher;
pub use models::identity::{DEFAULT_ROLE, Identity};

#[cfg(test)]
mod tests;
