pub mod hash_cost;
pub mod password_hasher;
