use std::env;

use serde::{Deserialize, Serialize};

/// Remote vocabulary store (Supabase). An empty URL selects the in-memory
/// fallback store.
#[derive(Default, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub url: String,
    pub api_key: String,
}

impl StoreConfig {
    pub fn new() -> Self {
        let url = env::var("SUPABASE_URL").unwrap_or_default();
        let api_key = env::var("SUPABASE_ANON_KEY").unwrap_or_default();

        Self { url, api_key }
    }

    pub fn is_configured(&self) -> bool {
        !self.url.is_empty()
    }
}
