use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use argon2::Params;
use error_location::ErrorLocation;

// Argon2id defaults recommended for interactive logins: 19 MiB, 2 passes, 1 lane.
const DEFAULT_MEMORY_KIB: u32 = 19_456;
const DEFAULT_ITERATIONS: u32 = 2;
const DEFAULT_PARALLELISM: u32 = 1;

/// Work factor for the adaptive password hash.
///
/// The cost is written into every PHC string, so raising it only affects
/// hashes produced afterwards; existing hashes keep verifying with the cost
/// they were created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory size in KiB
    pub memory_kib: u32,
    /// Number of passes over memory
    pub iterations: u32,
    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: DEFAULT_MEMORY_KIB,
            iterations: DEFAULT_ITERATIONS,
            parallelism: DEFAULT_PARALLELISM,
        }
    }
}

impl HashCost {
    pub const fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Self {
        Self {
            memory_kib,
            iterations,
            parallelism,
        }
    }

    /// Cheapest cost argon2 accepts. Meant for tests and fixtures only.
    pub const fn minimal() -> Self {
        Self {
            memory_kib: Params::MIN_M_COST,
            iterations: Params::MIN_T_COST,
            parallelism: Params::MIN_P_COST,
        }
    }

    /// Convert into argon2 parameters, rejecting combinations argon2 refuses.
    #[track_caller]
    pub fn params(&self) -> CoreErrorResult<Params> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, None).map_err(|e| {
            CoreError::InvalidHashCost {
                message: format!(
                    "memory={}KiB iterations={} parallelism={}: {}",
                    self.memory_kib, self.iterations, self.parallelism, e
                ),
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }
}
