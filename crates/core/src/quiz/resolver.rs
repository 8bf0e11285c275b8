//! Topic -> candidate names, category listing first and search second.

use tracing::debug;

use crate::config::{QuizConfig, TOPIC_PLACEHOLDER};
use crate::lookup::{KnowledgeBase, LookupError};

/// Builds the candidate list for a topic.
#[derive(Debug, Clone)]
pub struct TopicResolver {
    category_template: String,
    search_template: String,
}

impl TopicResolver {
    pub fn new(config: &QuizConfig) -> Self {
        Self {
            category_template: config.category_template.clone(),
            search_template: config.search_template.clone(),
        }
    }

    /// Category title for a topic, e.g. "Category:Quantum physicists".
    pub fn category_title(&self, topic: &str) -> String {
        self.category_template.replace(TOPIC_PLACEHOLDER, topic.trim())
    }

    /// Search query for a topic, e.g. "Quantum physicist".
    pub fn search_query(&self, topic: &str) -> String {
        self.search_template.replace(TOPIC_PLACEHOLDER, topic.trim())
    }

    /// Resolve a topic into candidate names.
    ///
    /// Category members win when there are any; search is only issued for an
    /// empty category. An empty result is valid and means "no results".
    pub async fn resolve(
        &self,
        kb: &dyn KnowledgeBase,
        topic: &str,
    ) -> Result<Vec<String>, LookupError> {
        let category = self.category_title(topic);
        let members = kb.list_category_members(&category).await?;
        if !members.is_empty() {
            debug!("'{}' has {} members", category, members.len());
            return Ok(members);
        }

        let query = self.search_query(topic);
        debug!("'{}' is empty, searching '{}'", category, query);
        kb.search_titles(&query).await
    }
}
