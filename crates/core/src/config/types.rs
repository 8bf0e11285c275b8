use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub lookup: LookupConfig,
    #[serde(default)]
    pub quiz: QuizConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

/// Knowledge-base (MediaWiki action API) client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LookupConfig {
    /// API endpoint (e.g., "https://en.wikipedia.org/w/api.php")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds (0 = no timeout)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Preferred thumbnail width in pixels
    #[serde(default = "default_thumbnail_size")]
    pub thumbnail_size: u32,
    /// Maximum titles returned by category and search listings
    #[serde(default = "default_result_limit")]
    pub result_limit: u32,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
            thumbnail_size: default_thumbnail_size(),
            result_limit: default_result_limit(),
        }
    }
}

fn default_base_url() -> String {
    "https://en.wikipedia.org/w/api.php".to_string()
}

fn default_user_agent() -> String {
    format!("Physiquiz/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout() -> u64 {
    30
}

fn default_thumbnail_size() -> u32 {
    300
}

fn default_result_limit() -> u32 {
    500
}

/// Quiz behaviour configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuizConfig {
    /// Category title template; `{topic}` is replaced by the trimmed topic
    #[serde(default = "default_category_template")]
    pub category_template: String,
    /// Free-text search template used when the category is empty
    #[serde(default = "default_search_template")]
    pub search_template: String,
    /// Random thumbnail probes before falling back to the first candidate
    #[serde(default = "default_max_pick_attempts")]
    pub max_pick_attempts: u32,
    /// Sentences fetched for the post-guess summary
    #[serde(default = "default_summary_sentences")]
    pub summary_sentences: u32,
    /// Fixed RNG seed for reproducible picks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            category_template: default_category_template(),
            search_template: default_search_template(),
            max_pick_attempts: default_max_pick_attempts(),
            summary_sentences: default_summary_sentences(),
            seed: None,
        }
    }
}

fn default_category_template() -> String {
    "Category:{topic} physicists".to_string()
}

fn default_search_template() -> String {
    "{topic} physicist".to_string()
}

fn default_max_pick_attempts() -> u32 {
    10
}

fn default_summary_sentences() -> u32 {
    10
}
