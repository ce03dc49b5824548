use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use danci_types::{CandidateRecord, DetailRecord, GenerationResponse, SavedEntry, ShapeError};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::lookup::{Lookup, LookupError};
use crate::preprocess::normalize_term;
use crate::store::{StoreError, VocabularyStore};

/// Where the session currently is. Every user action moves it through
/// Loading to exactly one visible result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Loading,
    CandidateList,
    DetailShown,
}

/// What a user-initiated lookup produced.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Detail(DetailRecord),
    Candidates(Vec<CandidateRecord>),
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("input term is empty")]
    InvalidInput,

    #[error("no candidate at index {0}")]
    InvalidSelection(usize),

    #[error("no saved entry at index {0}")]
    UnknownEntry(usize),

    #[error("no detail to save")]
    NothingToSave,

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("unreadable record: {0}")]
    BadRecord(#[from] ShapeError),
}

type DetailCache = Arc<RwLock<HashMap<String, DetailRecord>>>;

/// Reconciles manual searches, candidate selections and background
/// prefetch against one shared detail cache and the saved-word list.
///
/// Callers drive it from a single event loop, so user actions are
/// serialized and no overlapping manual search can be in flight.
pub struct SessionCoordinator {
    lookup: Arc<dyn Lookup>,
    store: Arc<dyn VocabularyStore>,
    phase: SessionPhase,
    term: String,
    current: Option<DetailRecord>,
    candidates: Vec<CandidateRecord>,
    saved: Vec<SavedEntry>,
    cache: DetailCache,
    prefetch_interval: Duration,
    prefetch_cancel: CancellationToken,
}

impl SessionCoordinator {
    pub fn new(
        lookup: Arc<dyn Lookup>,
        store: Arc<dyn VocabularyStore>,
        prefetch_interval: Duration,
    ) -> Self {
        Self {
            lookup,
            store,
            phase: SessionPhase::Idle,
            term: String::new(),
            current: None,
            candidates: Vec::new(),
            saved: Vec::new(),
            cache: Arc::new(RwLock::new(HashMap::new())),
            prefetch_interval,
            prefetch_cancel: CancellationToken::new(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn current_detail(&self) -> Option<&DetailRecord> {
        self.current.as_ref()
    }

    pub fn candidates(&self) -> &[CandidateRecord] {
        &self.candidates
    }

    pub fn saved(&self) -> &[SavedEntry] {
        &self.saved
    }

    pub async fn is_cached(&self, word: &str) -> bool {
        self.cache.read().await.contains_key(word)
    }

    /// Loads the saved list in full; called at startup and after
    /// mutations.
    pub async fn load_saved(&mut self) -> Result<&[SavedEntry], SessionError> {
        self.saved = self.store.list().await?;
        Ok(&self.saved)
    }

    /// Fresh manual search. Resets the whole session, then resolves the
    /// term through the saved list before touching the gateway.
    pub async fn search(&mut self, raw: &str) -> Result<LookupOutcome, SessionError> {
        let term = normalize_term(raw);
        if term.is_empty() {
            return Err(SessionError::InvalidInput);
        }

        // Invalidate the previous candidate set and its prefetch tasks.
        // Replacing the cache wholesale keeps late writers out of the new
        // session.
        self.prefetch_cancel.cancel();
        self.prefetch_cancel = CancellationToken::new();
        self.cache = Arc::new(RwLock::new(HashMap::new()));
        self.candidates.clear();
        self.current = None;
        self.term = term.clone();

        if let Some(entry) = self.saved.iter().find(|e| e.word == term) {
            let detail = DetailRecord::from_value(entry.data.clone())?;
            self.current = Some(detail.clone());
            self.phase = SessionPhase::DetailShown;
            return Ok(LookupOutcome::Detail(detail));
        }

        self.phase = SessionPhase::Loading;
        match self.lookup.generate(&term).await {
            Ok(GenerationResponse::Candidates { candidates }) => {
                self.candidates = candidates.clone();
                self.phase = SessionPhase::CandidateList;
                Ok(LookupOutcome::Candidates(candidates))
            }
            Ok(GenerationResponse::Detail(detail)) => {
                self.cache
                    .write()
                    .await
                    .insert(detail.word.clone(), detail.clone());
                self.current = Some(detail.clone());
                self.phase = SessionPhase::DetailShown;
                Ok(LookupOutcome::Detail(detail))
            }
            Err(e) => {
                self.phase = SessionPhase::Idle;
                Err(e.into())
            }
        }
    }

    /// Resolves one candidate, then kicks off background prefetch of the
    /// rest.
    pub async fn select_candidate(&mut self, index: usize) -> Result<DetailRecord, SessionError> {
        let word = self
            .candidates
            .get(index)
            .map(|c| c.zh.clone())
            .ok_or(SessionError::InvalidSelection(index))?;

        match self.resolve(&word).await {
            Ok(detail) => {
                self.current = Some(detail.clone());
                self.phase = SessionPhase::DetailShown;
                self.spawn_prefetch(index);
                Ok(detail)
            }
            Err(e) => {
                // The candidate list is still valid; let the user pick again
                self.phase = SessionPhase::CandidateList;
                Err(e)
            }
        }
    }

    /// Cache, then saved list, then the gateway.
    async fn resolve(&mut self, word: &str) -> Result<DetailRecord, SessionError> {
        if let Some(detail) = self.cache.read().await.get(word) {
            return Ok(detail.clone());
        }

        if let Some(entry) = self.saved.iter().find(|e| e.word == word) {
            return Ok(DetailRecord::from_value(entry.data.clone())?);
        }

        self.phase = SessionPhase::Loading;
        match self.lookup.generate(word).await? {
            GenerationResponse::Detail(detail) => {
                // Keyed by the resolved word, which may differ from the
                // surface form.
                self.cache
                    .write()
                    .await
                    .insert(detail.word.clone(), detail.clone());
                Ok(detail)
            }
            GenerationResponse::Candidates { .. } => Err(LookupError::MalformedResponse(format!(
                "expected a detail record for {word}"
            ))
            .into()),
        }
    }

    /// Fire-and-forget fetches for the candidates the user did not pick,
    /// staggered so they do not burst the backend. Failures are logged and
    /// dropped; a completion after the user navigated away still lands in
    /// the shared cache (last write wins).
    fn spawn_prefetch(&self, selected: usize) {
        let remaining: Vec<String> = self
            .candidates
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != selected)
            .map(|(_, c)| c.zh.clone())
            .collect();

        for (position, word) in remaining.into_iter().enumerate() {
            let delay = self.prefetch_interval * (position as u32 + 1);
            let cache = Arc::clone(&self.cache);
            let lookup = Arc::clone(&self.lookup);
            let cancel = self.prefetch_cancel.clone();

            tokio::spawn(async move {
                tokio::select! {
                    _ = cancel.cancelled() => return,
                    _ = tokio::time::sleep(delay) => {}
                }

                if cache.read().await.contains_key(&word) {
                    return;
                }

                match lookup.generate(&word).await {
                    Ok(GenerationResponse::Detail(detail)) => {
                        cache.write().await.insert(detail.word.clone(), detail);
                    }
                    Ok(GenerationResponse::Candidates { .. }) => {
                        tracing::warn!("prefetch for {word} returned a candidate list, dropped");
                    }
                    Err(e) => {
                        tracing::warn!("prefetch for {word} failed: {e}");
                    }
                }
            });
        }
    }

    /// Shows a saved entry as the current detail. Accepts both historical
    /// data shapes.
    pub fn open_saved(&mut self, index: usize) -> Result<DetailRecord, SessionError> {
        let entry = self
            .saved
            .get(index)
            .ok_or(SessionError::UnknownEntry(index))?;
        let detail = DetailRecord::from_value(entry.data.clone())?;

        self.term = detail.word.clone();
        self.current = Some(detail.clone());
        self.phase = SessionPhase::DetailShown;
        Ok(detail)
    }

    /// Persists the current detail. The displayed detail survives a store
    /// failure.
    pub async fn save_current(&mut self) -> Result<SavedEntry, SessionError> {
        let detail = self.current.as_ref().ok_or(SessionError::NothingToSave)?;
        let data = serde_json::to_value(detail)
            .map_err(|e| SessionError::BadRecord(ShapeError::Invalid(e.to_string())))?;

        let entry = self.store.insert(&detail.word, data, None).await?;
        self.saved = self.store.list().await?;
        Ok(entry)
    }

    pub async fn delete_saved(&mut self, id: &str) -> Result<(), SessionError> {
        self.store.delete(id).await?;
        self.saved = self.store.list().await?;
        Ok(())
    }
}
