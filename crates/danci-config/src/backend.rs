use std::env;

use serde::{Deserialize, Serialize};

/// Generation backend (OpenAI-compatible chat completions).
#[derive(Default, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// API credential, OPENAI_API_KEY
    pub api_key: String,
    /// Model override, OPENAI_MODEL
    pub model: String,
    pub api_url: String,
}

impl BackendConfig {
    pub fn new() -> Self {
        let api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        let api_url = env::var("OPENAI_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string());

        Self {
            api_key,
            model,
            api_url,
        }
    }
}
