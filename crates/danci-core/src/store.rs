use danci_types::SavedEntry;
use serde_json::Value;

/// Persisted vocabulary list, ordered by `created_at` descending.
#[async_trait::async_trait]
pub trait VocabularyStore: Send + Sync {
    async fn list(&self) -> Result<Vec<SavedEntry>, StoreError>;

    /// Insert a row; `data` is written as an opaque blob.
    async fn insert(
        &self,
        word: &str,
        data: Value,
        user_id: Option<&str>,
    ) -> Result<SavedEntry, StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}
