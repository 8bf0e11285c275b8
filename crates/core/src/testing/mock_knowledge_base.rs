//! Mock knowledge base for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Notify, RwLock};

use crate::lookup::{KnowledgeBase, LookupError};

/// A recorded lookup for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedLookup {
    CategoryMembers { category_title: String },
    Search { query: String },
    Thumbnail { title: String },
    Summary { title: String, sentences: u32 },
}

/// Mock implementation of the KnowledgeBase trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable categories, search hits, thumbnails and summaries
/// - Track lookups for assertions
/// - Simulate failures
/// - Park category, thumbnail or summary lookups behind a gate to
///   interleave transitions
///
/// # Example
///
/// ```rust,ignore
/// use physiquiz_core::testing::MockKnowledgeBase;
///
/// let kb = MockKnowledgeBase::new();
/// kb.set_category("Category:Quantum physicists", &["Max Planck", "Niels Bohr"]).await;
/// kb.set_thumbnail("Max Planck", "https://img.example/planck.jpg").await;
///
/// let titles = kb.list_category_members("Category:Quantum physicists").await?;
/// assert_eq!(titles.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MockKnowledgeBase {
    /// Category title -> member titles.
    categories: Arc<RwLock<HashMap<String, Vec<String>>>>,
    /// Search query -> hit titles.
    searches: Arc<RwLock<HashMap<String, Vec<String>>>>,
    /// Page title -> thumbnail URL.
    thumbnails: Arc<RwLock<HashMap<String, String>>>,
    /// Page title -> summary text.
    summaries: Arc<RwLock<HashMap<String, String>>>,
    /// Recorded lookups.
    lookups: Arc<RwLock<Vec<RecordedLookup>>>,
    /// If set, the next lookup will fail with this error.
    next_error: Arc<RwLock<Option<LookupError>>>,
    /// Category title -> gate its lookups wait on.
    category_gates: Arc<RwLock<HashMap<String, Arc<Notify>>>>,
    /// If set, thumbnail lookups wait for a notification before answering.
    thumbnail_gate: Arc<RwLock<Option<Arc<Notify>>>>,
    /// If set, summary lookups wait for a notification before answering.
    summary_gate: Arc<RwLock<Option<Arc<Notify>>>>,
}

impl MockKnowledgeBase {
    /// Create a new empty mock knowledge base.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Content Configuration
    // =========================================================================

    /// Set the members of a category.
    pub async fn set_category(&self, category_title: &str, members: &[&str]) {
        self.categories
            .write()
            .await
            .insert(category_title.to_string(), to_owned(members));
    }

    /// Set the hits for a search query.
    pub async fn set_search(&self, query: &str, hits: &[&str]) {
        self.searches
            .write()
            .await
            .insert(query.to_string(), to_owned(hits));
    }

    /// Set the thumbnail URL for a page.
    pub async fn set_thumbnail(&self, title: &str, url: &str) {
        self.thumbnails
            .write()
            .await
            .insert(title.to_string(), url.to_string());
    }

    /// Set the summary text for a page.
    pub async fn set_summary(&self, title: &str, text: &str) {
        self.summaries
            .write()
            .await
            .insert(title.to_string(), text.to_string());
    }

    // =========================================================================
    // Lookup Recording
    // =========================================================================

    /// Get all recorded lookups.
    pub async fn recorded_lookups(&self) -> Vec<RecordedLookup> {
        self.lookups.read().await.clone()
    }

    /// Clear recorded lookups.
    pub async fn clear_recorded(&self) {
        self.lookups.write().await.clear();
    }

    /// Get the number of lookups performed.
    pub async fn lookup_count(&self) -> usize {
        self.lookups.read().await.len()
    }

    /// Get the number of search lookups performed.
    pub async fn search_count(&self) -> usize {
        self.lookups
            .read()
            .await
            .iter()
            .filter(|l| matches!(l, RecordedLookup::Search { .. }))
            .count()
    }

    /// Get the number of thumbnail lookups performed.
    pub async fn thumbnail_count(&self) -> usize {
        self.lookups
            .read()
            .await
            .iter()
            .filter(|l| matches!(l, RecordedLookup::Thumbnail { .. }))
            .count()
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Configure the next lookup to fail with the given error.
    pub async fn set_next_error(&self, error: LookupError) {
        *self.next_error.write().await = Some(error);
    }

    /// Clear any pending error.
    pub async fn clear_next_error(&self) {
        *self.next_error.write().await = None;
    }

    /// Take the next error if set.
    async fn take_error(&self) -> Option<LookupError> {
        self.next_error.write().await.take()
    }

    // =========================================================================
    // Interleaving
    // =========================================================================

    /// Make thumbnail lookups wait on the returned handle. Each
    /// `notify_one()` releases one lookup.
    pub async fn gate_thumbnails(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.thumbnail_gate.write().await = Some(Arc::clone(&notify));
        notify
    }

    /// Make summary lookups wait on the returned handle.
    pub async fn gate_summaries(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.summary_gate.write().await = Some(Arc::clone(&notify));
        notify
    }

    /// Make member lookups of one category wait on the returned handle.
    /// Other categories answer immediately.
    pub async fn gate_category(&self, category_title: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.category_gates
            .write()
            .await
            .insert(category_title.to_string(), Arc::clone(&notify));
        notify
    }

    /// Let every lookup answer immediately again.
    pub async fn open_gates(&self) {
        self.category_gates.write().await.clear();
        *self.thumbnail_gate.write().await = None;
        *self.summary_gate.write().await = None;
    }

    async fn record(&self, lookup: RecordedLookup) {
        self.lookups.write().await.push(lookup);
    }
}

fn to_owned(titles: &[&str]) -> Vec<String> {
    titles.iter().map(|t| t.to_string()).collect()
}

#[async_trait]
impl KnowledgeBase for MockKnowledgeBase {
    async fn list_category_members(
        &self,
        category_title: &str,
    ) -> Result<Vec<String>, LookupError> {
        self.record(RecordedLookup::CategoryMembers {
            category_title: category_title.to_string(),
        })
        .await;

        let gate = self.category_gates.read().await.get(category_title).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if let Some(error) = self.take_error().await {
            return Err(error);
        }

        Ok(self
            .categories
            .read()
            .await
            .get(category_title)
            .cloned()
            .unwrap_or_default())
    }

    async fn search_titles(&self, query: &str) -> Result<Vec<String>, LookupError> {
        self.record(RecordedLookup::Search {
            query: query.to_string(),
        })
        .await;

        if let Some(error) = self.take_error().await {
            return Err(error);
        }

        Ok(self
            .searches
            .read()
            .await
            .get(query)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_thumbnail(&self, title: &str) -> Result<Option<String>, LookupError> {
        self.record(RecordedLookup::Thumbnail {
            title: title.to_string(),
        })
        .await;

        let gate = self.thumbnail_gate.read().await.clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if let Some(error) = self.take_error().await {
            return Err(error);
        }

        Ok(self.thumbnails.read().await.get(title).cloned())
    }

    async fn fetch_summary(&self, title: &str, sentences: u32) -> Result<String, LookupError> {
        self.record(RecordedLookup::Summary {
            title: title.to_string(),
            sentences,
        })
        .await;

        let gate = self.summary_gate.read().await.clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if let Some(error) = self.take_error().await {
            return Err(error);
        }

        Ok(self
            .summaries
            .read()
            .await
            .get(title)
            .cloned()
            .unwrap_or_default())
    }
}
