//! Quiz session: topic resolution, photo-backed picks and the session
//! state machine that drives them.

mod controller;
mod resolver;
mod selector;
mod types;

pub use controller::QuizController;
pub use resolver::TopicResolver;
pub use selector::CandidateSelector;
pub use types::*;

use thiserror::Error;

use crate::lookup::LookupError;

/// Errors surfaced by quiz transitions that cannot recover locally.
#[derive(Debug, Error)]
pub enum QuizError {
    /// A knowledge-base lookup failed.
    #[error("Lookup failed: {0}")]
    Lookup(#[from] LookupError),

    /// Selection was asked to pick from an empty candidate list.
    #[error("No candidates to pick from")]
    NoCandidates,
}
