use async_trait::async_trait;
use danci_config::gateway::GatewayConfig;
use danci_core::lookup::{Lookup, LookupError};
use danci_types::GenerationResponse;
use serde_json::{Value, json};

/// HTTP client for a running lookup gateway.
#[derive(Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    url: String,
}

impl GatewayClient {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: config.url.clone(),
        }
    }
}

#[async_trait]
impl Lookup for GatewayClient {
    async fn generate(&self, term: &str) -> Result<GenerationResponse, LookupError> {
        let response = self
            .client
            .post(&self.url)
            .json(&json!({ "word": term }))
            .send()
            .await?;

        let status = response.status();
        let payload: Value = response
            .json()
            .await
            .map_err(|e| LookupError::MalformedResponse(format!("gateway sent non-JSON: {e}")))?;

        if !status.is_success() {
            let detail = payload["details"]
                .as_str()
                .or_else(|| payload["error"].as_str())
                .unwrap_or("gateway error");
            return Err(LookupError::ApiError(format!("HTTP {status}: {detail}")));
        }

        Ok(GenerationResponse::from_value(payload)?)
    }
}
