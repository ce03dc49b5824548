use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use danci_core::store::{StoreError, VocabularyStore};
use danci_types::SavedEntry;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local store used when no remote store is configured. Saved
/// words do not survive a restart.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<Vec<SavedEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn timestamp() -> String {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs().to_string())
            .unwrap_or_default()
    }
}

#[async_trait]
impl VocabularyStore for MemoryStore {
    async fn list(&self) -> Result<Vec<SavedEntry>, StoreError> {
        Ok(self.entries.read().await.clone())
    }

    async fn insert(
        &self,
        word: &str,
        data: Value,
        user_id: Option<&str>,
    ) -> Result<SavedEntry, StoreError> {
        let entry = SavedEntry {
            id: Uuid::new_v4().to_string(),
            word: word.to_string(),
            data,
            user_id: user_id.map(str::to_string),
            created_at: Self::timestamp(),
        };

        // Newest first, matching the remote `created_at desc` ordering
        self.entries.write().await.insert(0, entry.clone());
        Ok(entry)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.entries.write().await.retain(|e| e.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn round_trip_preserves_word_and_data() {
        let store = MemoryStore::new();
        let data = json!({ "word": "谢谢", "pinyin": "xièxie", "meanings": [] });

        let entry = store.insert("谢谢", data.clone(), None).await.unwrap();
        let listed = store.list().await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, entry.id);
        assert_eq!(listed[0].word, "谢谢");
        assert_eq!(listed[0].data, data);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = MemoryStore::new();
        store.insert("一", json!({}), None).await.unwrap();
        store.insert("二", json!({}), None).await.unwrap();

        let words: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.word)
            .collect();
        assert_eq!(words, vec!["二", "一"]);
    }

    #[tokio::test]
    async fn delete_removes_only_that_entry() {
        let store = MemoryStore::new();
        let first = store.insert("一", json!({}), None).await.unwrap();
        store.insert("二", json!({}), None).await.unwrap();

        store.delete(&first.id).await.unwrap();
        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].word, "二");

        // Deleting an unknown id is a no-op
        store.delete("missing").await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
    }
}
