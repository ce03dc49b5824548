use std::env;

use serde::{Deserialize, Serialize};

/// Lookup gateway addresses: where the server binds and where clients
/// reach it.
#[derive(Default, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub bind_addr: String,
    pub url: String,
}

impl GatewayConfig {
    pub fn new() -> Self {
        let bind_addr = env::var("GATEWAY_ADDR").unwrap_or_else(|_| "127.0.0.1:8787".to_string());
        let url = env::var("GATEWAY_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8787/generate".to_string());

        Self { bind_addr, url }
    }
}
