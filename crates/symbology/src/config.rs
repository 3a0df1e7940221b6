//! Configuration for the style cache.

use serde::{Deserialize, Serialize};

/// Configuration for [`StyleCache`](crate::StyleCache).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleCacheConfig {
    /// Maximum number of distinct styles kept.
    pub capacity: usize,
}

impl Default for StyleCacheConfig {
    fn default() -> Self {
        Self { capacity: 10_000 }
    }
}

impl StyleCacheConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("STYLE_CACHE_CAPACITY") {
            if let Ok(capacity) = val.parse() {
                config.capacity = capacity;
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.capacity == 0 {
            return Err("capacity must be > 0".to_string());
        }
        Ok(())
    }
}
