//! Knowledge-base lookups used to build and illustrate the quiz.
//!
//! The quiz needs four read-only queries: category membership, free-text
//! search, a page thumbnail and a plain-text summary. `KnowledgeBase` is the
//! seam between the quiz logic and the HTTP client so tests can substitute
//! `testing::MockKnowledgeBase`.

mod wikipedia;

pub use wikipedia::WikipediaClient;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when querying the knowledge base.
///
/// An empty listing, a missing thumbnail or a missing extract is not an
/// error; those come back as empty values.
#[derive(Debug, Error)]
pub enum LookupError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Server answered 200 with an error object in the body.
    #[error("Remote error: {code} - {info}")]
    RemoteError { code: String, info: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Read-only queries against an encyclopedic knowledge base.
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    /// List article titles in a category. Unknown or empty categories yield
    /// an empty list.
    async fn list_category_members(&self, category_title: &str)
        -> Result<Vec<String>, LookupError>;

    /// Full-text search over article titles.
    async fn search_titles(&self, query: &str) -> Result<Vec<String>, LookupError>;

    /// Thumbnail URL for a page, following redirects. `None` when the page
    /// has no image or does not exist.
    async fn fetch_thumbnail(&self, title: &str) -> Result<Option<String>, LookupError>;

    /// Plain-text introduction limited to `sentences` sentences, following
    /// redirects. Empty when no extract is available.
    async fn fetch_summary(&self, title: &str, sentences: u32) -> Result<String, LookupError>;
}
