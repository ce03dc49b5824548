use danci_types::{GenerationResponse, ShapeError};

/// Generation-backend interface the session coordinator talks to.
#[async_trait::async_trait]
pub trait Lookup: Send + Sync {
    /// Resolve a term into a detail record or a candidate list
    async fn generate(&self, term: &str) -> Result<GenerationResponse, LookupError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}

impl From<ShapeError> for LookupError {
    fn from(e: ShapeError) -> Self {
        Self::MalformedResponse(e.to_string())
    }
}
