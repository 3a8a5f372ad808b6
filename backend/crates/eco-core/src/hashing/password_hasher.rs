use crate::{CoreError, HashCost, Result as CoreErrorResult};

use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::Rng;

const SALT_LEN: usize = 16;
const LEGACY_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

/// Argon2id password hasher with an explicit work factor.
///
/// Every call to [`PasswordHasher::hash`] draws a fresh random salt, so hashing
/// the same plaintext twice yields two different PHC strings that both verify.
#[derive(Clone)]
pub struct PasswordHasher {
    cost: HashCost,
    context: Argon2<'static>,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            cost: HashCost::default(),
            context: Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::DEFAULT),
        }
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("algorithm", &"argon2id")
            .field("cost", &self.cost)
            .finish()
    }
}

impl PasswordHasher {
    #[track_caller]
    pub fn new(cost: HashCost) -> CoreErrorResult<Self> {
        let params = cost.params()?;
        Ok(Self {
            cost,
            context: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    pub fn cost(&self) -> HashCost {
        self.cost
    }

    /// Hash a plaintext password into a PHC string.
    #[track_caller]
    pub fn hash(&self, plain: &str) -> CoreErrorResult<String> {
        let salt = Self::generate_salt()?;
        self.context
            .hash_password(plain.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CoreError::hashing(e.to_string()))
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// Algorithm, cost and salt are taken from the stored string itself, and the
    /// digest comparison is the algorithm crate's constant-time check. Rows
    /// written before the switch to Argon2id carry bcrypt (`$2a$`, `$2b$`,
    /// `$2y$`) hashes and are still accepted. Unparseable hashes never verify.
    pub fn verify(plain: &str, hash: &str) -> bool {
        if Self::is_legacy(hash) {
            return bcrypt::verify(plain, hash).unwrap_or(false);
        }

        PasswordHash::new(hash)
            .ok()
            .as_ref()
            .map(|parsed| {
                Argon2::default()
                    .verify_password(plain.as_bytes(), parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    /// `true` for bcrypt hashes, which verify but are never produced here.
    pub fn is_legacy(hash: &str) -> bool {
        LEGACY_PREFIXES.iter().any(|prefix| hash.starts_with(prefix))
    }

    #[track_caller]
    fn generate_salt() -> CoreErrorResult<SaltString> {
        let mut bytes = [0u8; SALT_LEN];
        rand::rng().fill(&mut bytes);
        SaltString::encode_b64(&bytes).map_err(|e| CoreError::hashing(e.to_string()))
    }
}
