//! Configuration Module
//!
//! Handles loading and validating cache configuration.

use std::env;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cache::DEFAULT_CAPACITY;
use crate::error::{CacheError, Result};

/// Environment variable holding the cache capacity.
pub const CAPACITY_ENV_VAR: &str = "CACHE_CAPACITY";

/// Cache configuration parameters.
///
/// Can be loaded from the environment or embedded in a host application's
/// own (serde-deserialized) configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
}

impl CacheConfig {
    /// Creates a config with an explicit capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1000)
    ///
    /// Unset or unparsable values fall back to the default.
    pub fn from_env() -> Self {
        Self {
            capacity: env::var(CAPACITY_ENV_VAR)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CAPACITY),
        }
    }

    // == Validate ==
    /// Checks that the configuration describes a usable cache.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            warn!("Rejected cache capacity of {}", self.capacity);
            return Err(CacheError::InvalidCapacity(self.capacity));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}
