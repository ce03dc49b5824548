use std::env;

use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Stagger between background candidate fetches
    pub prefetch_interval_ms: u64,
}

impl SessionConfig {
    pub fn new() -> Self {
        let prefetch_interval_ms = env::var("PREFETCH_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(2000); // 2 seconds default

        Self {
            prefetch_interval_ms,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}
