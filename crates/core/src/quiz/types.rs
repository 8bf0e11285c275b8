//! Quiz domain types: the active pick, the session record and the
//! observable view handed to the presentation layer.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

/// The candidate currently being guessed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pick {
    /// Page title of the person.
    pub name: String,
    /// Thumbnail URL, absent when no photo could be found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Score, activity flag and studied names for one quiz session.
///
/// Mutation is crate-private so only the controller's transitions can
/// change it.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    score: u32,
    active: bool,
    studied: HashSet<String>,
}

impl SessionState {
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Distinct names presented since the last start.
    pub fn studied(&self) -> &HashSet<String> {
        &self.studied
    }

    pub fn studied_count(&self) -> usize {
        self.studied.len()
    }

    pub(crate) fn begin(&mut self) {
        self.score = 0;
        self.studied.clear();
        self.active = true;
    }

    pub(crate) fn end(&mut self) {
        self.active = false;
    }

    pub(crate) fn record_correct(&mut self) {
        self.score += 1;
    }

    pub(crate) fn record_studied(&mut self, name: &str) {
        self.studied.insert(name.to_string());
    }
}

/// Whether a quiz is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Active,
}

/// User-facing feedback after a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Feedback {
    Welcome,
    MissingTopic,
    Loading,
    Found { topic: String, count: usize },
    NoResults { topic: String },
    LoadFailed,
    Correct,
    Incorrect { answer: String },
    Stopped { studied: usize },
    Failed,
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Welcome => write!(f, "Enter a field and click Load to begin!"),
            Feedback::MissingTopic => write!(f, "Please enter a field (e.g. \"Quantum\")."),
            Feedback::Loading => write!(f, "Loading…"),
            Feedback::Found { topic, count } => {
                write!(f, "Found {} \"{}\" physicists.", count, topic)
            }
            Feedback::NoResults { topic } => write!(f, "No results found for \"{}\".", topic),
            Feedback::LoadFailed => write!(f, "Error loading topic."),
            Feedback::Correct => write!(f, "Correct!"),
            Feedback::Incorrect { answer } => write!(f, "Nope, it's {}.", answer),
            Feedback::Stopped { studied } => write!(
                f,
                "Quiz stopped. You studied {} scientists this session.",
                studied
            ),
            Feedback::Failed => write!(f, "Something went wrong. Try Next or Stop."),
        }
    }
}

/// Everything a presentation layer needs to render the quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizView {
    pub phase: Phase,
    /// A topic load is in flight.
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    pub candidate_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,
    /// Rendered feedback text; empty when there is no feedback.
    pub message: String,
    pub score: u32,
    pub studied_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub image_visible: bool,
    /// Summary of the pick, shown after a guess.
    pub summary: String,
    pub input_enabled: bool,
    pub submit_enabled: bool,
    /// "Next" and "Stop" controls are shown.
    pub controls_visible: bool,
}

/// Result of a topic load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The topic was blank; nothing was queried.
    MissingTopic,
    /// Candidates were found. `started` is false when a quiz was already
    /// running; the new candidates are used from the next advance.
    Loaded { count: usize, started: bool },
    /// Neither the category nor the search produced candidates.
    NoResults,
    /// A lookup failed; candidates and session were left untouched.
    Failed,
    /// A newer load finished first; this result was dropped.
    Superseded,
}

/// Result of a scored guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOutcome {
    pub correct: bool,
    /// The pick's real name.
    pub answer: String,
    /// Score after this guess.
    pub score: u32,
}
