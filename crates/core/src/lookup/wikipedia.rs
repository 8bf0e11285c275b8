//! MediaWiki action API client (Wikipedia by default).
//!
//! Every operation is a single `GET <base_url>?action=query&format=json&...`.
//! Page lookups pass `redirects=1` so aliases resolve to their target page.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{KnowledgeBase, LookupError};
use crate::config::LookupConfig;

/// MediaWiki action API client.
pub struct WikipediaClient {
    client: Client,
    base_url: String,
    thumbnail_size: String,
    result_limit: String,
}

impl WikipediaClient {
    /// Create a new client from lookup configuration.
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        let mut builder = Client::builder().user_agent(&config.user_agent);
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            thumbnail_size: config.thumbnail_size.to_string(),
            result_limit: config.result_limit.to_string(),
        })
    }

    /// Issue one `action=query` request and unwrap the `query` object.
    async fn query(&self, params: &[(&str, &str)]) -> Result<ApiQuery, LookupError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("action", "query"), ("format", "json")])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Knowledge base returned HTTP {}", status.as_u16());
            return Err(LookupError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: ApiResponse = response.json().await.map_err(|e| {
            LookupError::ParseError(format!("Failed to parse query response: {}", e))
        })?;

        body.into_query()
    }
}

#[async_trait]
impl KnowledgeBase for WikipediaClient {
    async fn list_category_members(
        &self,
        category_title: &str,
    ) -> Result<Vec<String>, LookupError> {
        debug!("Category members: cmtitle='{}'", category_title);

        let query = self
            .query(&[
                ("list", "categorymembers"),
                ("cmtitle", category_title),
                ("cmnamespace", "0"),
                ("cmlimit", &self.result_limit),
            ])
            .await?;

        Ok(titles(query.categorymembers))
    }

    async fn search_titles(&self, query: &str) -> Result<Vec<String>, LookupError> {
        debug!("Search: srsearch='{}'", query);

        let result = self
            .query(&[
                ("list", "search"),
                ("srsearch", query),
                ("srnamespace", "0"),
                ("srlimit", &self.result_limit),
            ])
            .await?;

        Ok(titles(result.search))
    }

    async fn fetch_thumbnail(&self, title: &str) -> Result<Option<String>, LookupError> {
        debug!("Thumbnail: title='{}'", title);

        let query = self
            .query(&[
                ("titles", title),
                ("prop", "pageimages"),
                ("piprop", "thumbnail"),
                ("pithumbsize", &self.thumbnail_size),
                ("redirects", "1"),
            ])
            .await?;

        Ok(query
            .into_first_page()
            .and_then(|page| page.thumbnail)
            .map(|thumb| thumb.source))
    }

    async fn fetch_summary(&self, title: &str, sentences: u32) -> Result<String, LookupError> {
        debug!("Summary: title='{}', sentences={}", title, sentences);

        let sentences = sentences.to_string();
        let query = self
            .query(&[
                ("titles", title),
                ("prop", "extracts"),
                ("explaintext", "1"),
                ("exsentences", &sentences),
                ("redirects", "1"),
            ])
            .await?;

        Ok(query
            .into_first_page()
            .and_then(|page| page.extract)
            .unwrap_or_default())
    }
}

fn titles(entries: Vec<TitleEntry>) -> Vec<String> {
    entries.into_iter().map(|e| e.title).collect()
}

// ============================================================================
// MediaWiki API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    query: Option<ApiQuery>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

impl ApiResponse {
    fn into_query(self) -> Result<ApiQuery, LookupError> {
        if let Some(error) = self.error {
            return Err(LookupError::RemoteError {
                code: error.code,
                info: error.info,
            });
        }
        // No `query` object means nothing matched
        Ok(self.query.unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Default, Deserialize)]
struct ApiQuery {
    #[serde(default)]
    categorymembers: Vec<TitleEntry>,
    #[serde(default)]
    search: Vec<TitleEntry>,
    #[serde(default)]
    pages: HashMap<String, ApiPage>,
}

impl ApiQuery {
    /// A single title was requested, so at most one page comes back.
    fn into_first_page(self) -> Option<ApiPage> {
        self.pages.into_values().next()
    }
}

#[derive(Debug, Deserialize)]
struct TitleEntry {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ApiPage {
    #[serde(default)]
    thumbnail: Option<ApiThumbnail>,
    #[serde(default)]
    extract: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiThumbnail {
    source: String,
}
