use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_HASH_ITERATIONS, DEFAULT_HASH_MEMORY_KIB,
    DEFAULT_HASH_PARALLELISM, DEFAULT_MAX_LOGIN_ATTEMPTS, DEFAULT_MIN_PASSWORD_LENGTH,
};

use eco_core::{DEFAULT_ROLE, HashCost};

use serde::Deserialize;

/// Password hashing cost and login limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub hash_memory_kib: u32,
    pub hash_iterations: u32,
    pub hash_parallelism: u32,
    pub max_login_attempts: u32,
    pub min_password_length: usize,
    pub default_role: String,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            hash_memory_kib: DEFAULT_HASH_MEMORY_KIB,
            hash_iterations: DEFAULT_HASH_ITERATIONS,
            hash_parallelism: DEFAULT_HASH_PARALLELISM,
            max_login_attempts: DEFAULT_MAX_LOGIN_ATTEMPTS,
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
            default_role: String::from(DEFAULT_ROLE),
        }
    }
}

impl SecurityConfig {
    pub fn hash_cost(&self) -> HashCost {
        HashCost::new(
            self.hash_memory_kib,
            self.hash_iterations,
            self.hash_parallelism,
        )
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.hash_cost()
            .params()
            .map_err(|e| ConfigError::security(format!("invalid hash cost: {}", e)))?;

        if self.max_login_attempts == 0 {
            return Err(ConfigError::security(
                "security.max_login_attempts must be at least 1",
            ));
        }

        if self.min_password_length == 0 {
            return Err(ConfigError::security(
                "security.min_password_length must be at least 1",
            ));
        }

        if self.default_role.trim().is_empty() {
            return Err(ConfigError::security(
                "security.default_role must not be empty",
            ));
        }

        Ok(())
    }
}
