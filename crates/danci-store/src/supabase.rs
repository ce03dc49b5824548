use async_trait::async_trait;
use danci_config::store::StoreConfig;
use danci_core::store::{StoreError, VocabularyStore};
use danci_types::SavedEntry;
use serde_json::{Value, json};

/// PostgREST client for the remote `vocabulary` table
/// (id uuid, word text, data jsonb, user_id uuid null, created_at timestamptz).
#[derive(Clone)]
pub struct SupabaseStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SupabaseStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/vocabulary", self.base_url)
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }
}

#[async_trait]
impl VocabularyStore for SupabaseStore {
    async fn list(&self) -> Result<Vec<SavedEntry>, StoreError> {
        let response = self
            .authed(self.client.get(self.table_url()))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoreError::ApiError(format!(
                "list failed: HTTP {}",
                response.status()
            )));
        }

        response
            .json::<Vec<SavedEntry>>()
            .await
            .map_err(|e| StoreError::ApiError(format!("unreadable list payload: {e}")))
    }

    async fn insert(
        &self,
        word: &str,
        data: Value,
        user_id: Option<&str>,
    ) -> Result<SavedEntry, StoreError> {
        let rows = json!([{ "word": word, "data": data, "user_id": user_id }]);
        let response = self
            .authed(self.client.post(self.table_url()))
            .header("Prefer", "return=representation")
            .json(&rows)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoreError::ApiError(format!(
                "insert failed: HTTP {}",
                response.status()
            )));
        }

        let mut rows: Vec<SavedEntry> = response
            .json()
            .await
            .map_err(|e| StoreError::ApiError(format!("unreadable insert payload: {e}")))?;

        rows.pop()
            .ok_or_else(|| StoreError::ApiError("insert returned no row".to_string()))
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let response = self
            .authed(self.client.delete(self.table_url()))
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoreError::ApiError(format!(
                "delete failed: HTTP {}",
                response.status()
            )));
        }

        Ok(())
    }
}
