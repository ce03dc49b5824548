use async_trait::async_trait;
use danci_config::backend::BackendConfig;
use danci_core::lookup::{Lookup, LookupError};
use danci_types::GenerationResponse;
use serde::{Deserialize, Serialize};

use crate::prompt;

/// Client for an OpenAI-compatible chat-completions endpoint. Stateless
/// across invocations; the prompt contract is the only thing it sends
/// beyond the term.
#[derive(Clone)]
pub struct OpenAiBackend {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
}

impl OpenAiBackend {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            api_url: config.api_url.clone(),
            model: config.model.clone(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[async_trait]
impl Lookup for OpenAiBackend {
    async fn generate(&self, term: &str) -> Result<GenerationResponse, LookupError> {
        if self.api_key.is_empty() {
            return Err(LookupError::AuthenticationError);
        }

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompt::SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt::user_message(term),
                },
            ],
            response_format: ResponseFormat {
                format: "json_object",
            },
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if response.status() == 429 {
            return Err(LookupError::RateLimitExceeded);
        }

        if response.status() == 401 || response.status() == 403 {
            return Err(LookupError::AuthenticationError);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::ApiError(format!("HTTP {status}: {body}")));
        }

        let chat: ChatResponse = response.json().await.map_err(|e| {
            LookupError::MalformedResponse(format!("invalid completion payload: {e}"))
        })?;

        let content = chat
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or_else(|| LookupError::MalformedResponse("no choices in completion".to_string()))?;

        let value: serde_json::Value = serde_json::from_str(content)
            .map_err(|e| LookupError::MalformedResponse(format!("completion is not JSON: {e}")))?;

        let generated = GenerationResponse::from_value(value)?;
        generated.validate()?;
        Ok(generated)
    }
}
