//! Testing utilities and mock implementations.
//!
//! `MockKnowledgeBase` stands in for the HTTP lookup client so quiz
//! transitions can be exercised without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use physiquiz_core::testing::{fixtures, MockKnowledgeBase};
//!
//! let kb = Arc::new(MockKnowledgeBase::new());
//! fixtures::seed_quantum(&kb).await;
//!
//! let controller = QuizController::new(kb.clone(), &fixtures::quiz_config());
//! ```

mod mock_knowledge_base;

pub use mock_knowledge_base::{MockKnowledgeBase, RecordedLookup};

/// Test fixtures and helper functions.
pub mod fixtures {
    use super::MockKnowledgeBase;
    use crate::config::QuizConfig;

    /// Category title the default templates produce for "Quantum".
    pub const QUANTUM_CATEGORY: &str = "Category:Quantum physicists";

    /// Quiz configuration with a fixed seed so picks are reproducible.
    pub fn quiz_config() -> QuizConfig {
        QuizConfig {
            seed: Some(7),
            ..Default::default()
        }
    }

    /// Thumbnail URL used for a fixture physicist.
    pub fn thumbnail_url(name: &str) -> String {
        format!(
            "https://img.example/{}.jpg",
            name.to_lowercase().replace(' ', "_")
        )
    }

    /// Summary text used for a fixture physicist.
    pub fn summary_text(name: &str) -> String {
        format!("{} was a physicist.", name)
    }

    /// Register a physicist with a thumbnail and a summary.
    pub async fn add_physicist(kb: &MockKnowledgeBase, name: &str) {
        kb.set_thumbnail(name, &thumbnail_url(name)).await;
        kb.set_summary(name, &summary_text(name)).await;
    }

    /// The "Quantum" topic: a category holding Max Planck and Niels Bohr,
    /// both with photos.
    pub async fn seed_quantum(kb: &MockKnowledgeBase) {
        kb.set_category(QUANTUM_CATEGORY, &["Max Planck", "Niels Bohr"])
            .await;
        add_physicist(kb, "Max Planck").await;
        add_physicist(kb, "Niels Bohr").await;
    }

    /// A topic whose category holds `names`, all with photos.
    pub async fn seed_topic(kb: &MockKnowledgeBase, topic: &str, names: &[&str]) {
        kb.set_category(&format!("Category:{} physicists", topic), names)
            .await;
        for name in names {
            add_physicist(kb, name).await;
        }
    }
}
