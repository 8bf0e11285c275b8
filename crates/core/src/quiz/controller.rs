//! Quiz session state machine.
//!
//! Two phases: Idle (no quiz running) and Active (exactly one pick held
//! once selection completes). All state sits behind one async mutex that is
//! released before any lookup, so `stop()` never waits on the network.
//! Picks and summaries are tagged with the generation they were requested
//! under; a completion whose generation has moved on is dropped. Topic loads
//! carry their own epoch the same way.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::{
    CandidateSelector, Feedback, GuessOutcome, LoadOutcome, Phase, Pick, QuizError, QuizView,
    SessionState, TopicResolver,
};
use crate::config::QuizConfig;
use crate::lookup::KnowledgeBase;

struct Inner {
    state: SessionState,
    topic: Option<String>,
    candidates: Arc<Vec<String>>,
    pick: Option<Pick>,
    feedback: Option<Feedback>,
    summary: String,
    image_visible: bool,
    guess_enabled: bool,
    loading: bool,
    /// Bumped by start/advance/stop.
    generation: u64,
    /// Bumped by every topic load.
    load_epoch: u64,
    rng: StdRng,
}

impl Inner {
    fn new(rng: StdRng) -> Self {
        Self {
            state: SessionState::default(),
            topic: None,
            candidates: Arc::new(Vec::new()),
            pick: None,
            feedback: Some(Feedback::Welcome),
            summary: String::new(),
            image_visible: false,
            guess_enabled: false,
            loading: false,
            generation: 0,
            load_epoch: 0,
            rng,
        }
    }

    /// Leave the Active phase and invalidate in-flight picks and summaries.
    fn end_session(&mut self) {
        self.state.end();
        self.generation += 1;
        self.pick = None;
        self.image_visible = false;
        self.guess_enabled = false;
        self.summary.clear();
    }

    fn view(&self) -> QuizView {
        let active = self.state.is_active();
        QuizView {
            phase: if active { Phase::Active } else { Phase::Idle },
            loading: self.loading,
            topic: self.topic.clone(),
            candidate_count: self.candidates.len(),
            message: self
                .feedback
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            feedback: self.feedback.clone(),
            score: self.state.score(),
            studied_count: self.state.studied_count(),
            image: self.pick.as_ref().and_then(|p| p.thumbnail.clone()),
            image_visible: self.image_visible,
            summary: self.summary.clone(),
            input_enabled: self.guess_enabled,
            submit_enabled: self.guess_enabled,
            controls_visible: active,
        }
    }
}

/// Owns one quiz session and applies user intents to it.
pub struct QuizController {
    kb: Arc<dyn KnowledgeBase>,
    resolver: TopicResolver,
    selector: CandidateSelector,
    summary_sentences: u32,
    inner: Mutex<Inner>,
}

impl QuizController {
    /// Create an idle controller. A configured seed makes picks
    /// reproducible.
    pub fn new(kb: Arc<dyn KnowledgeBase>, config: &QuizConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            kb,
            resolver: TopicResolver::new(config),
            selector: CandidateSelector::new(config),
            summary_sentences: config.summary_sentences,
            inner: Mutex::new(Inner::new(rng)),
        }
    }

    /// Current observable state.
    pub async fn view(&self) -> QuizView {
        self.inner.lock().await.view()
    }

    /// Copy of the session record.
    pub async fn session(&self) -> SessionState {
        self.inner.lock().await.state.clone()
    }

    /// The pick being guessed, if any.
    pub async fn current_pick(&self) -> Option<Pick> {
        self.inner.lock().await.pick.clone()
    }

    /// Candidate names of the last successful load.
    pub async fn candidates(&self) -> Vec<String> {
        self.inner.lock().await.candidates.as_ref().clone()
    }

    /// Resolve `topic` into candidates and start a quiz if none is running.
    ///
    /// Lookup failures are reported through feedback and leave candidates
    /// and session untouched. An error is only returned when the quiz starts
    /// and its first pick fails.
    pub async fn load_topic(&self, topic: &str) -> Result<LoadOutcome, QuizError> {
        let topic = topic.trim();

        let epoch = {
            let mut inner = self.inner.lock().await;
            if topic.is_empty() {
                inner.feedback = Some(Feedback::MissingTopic);
                return Ok(LoadOutcome::MissingTopic);
            }
            inner.load_epoch += 1;
            inner.loading = true;
            inner.feedback = Some(Feedback::Loading);
            inner.load_epoch
        };

        info!("Loading topic '{}'", topic);
        let result = self.resolver.resolve(self.kb.as_ref(), topic).await;

        let count = {
            let mut inner = self.inner.lock().await;
            if inner.load_epoch != epoch {
                debug!("Dropping superseded load of '{}'", topic);
                return Ok(LoadOutcome::Superseded);
            }
            inner.loading = false;

            let candidates = match result {
                Ok(candidates) => candidates,
                Err(e) => {
                    warn!("Failed to load topic '{}': {}", topic, e);
                    inner.feedback = Some(Feedback::LoadFailed);
                    return Ok(LoadOutcome::Failed);
                }
            };

            inner.topic = Some(topic.to_string());
            if candidates.is_empty() {
                info!("No candidates for '{}'", topic);
                inner.candidates = Arc::new(Vec::new());
                if inner.state.is_active() {
                    // Nothing left to advance to
                    inner.end_session();
                }
                inner.feedback = Some(Feedback::NoResults {
                    topic: topic.to_string(),
                });
                return Ok(LoadOutcome::NoResults);
            }

            let count = candidates.len();
            info!("Loaded {} candidates for '{}'", count, topic);
            inner.candidates = Arc::new(candidates);
            inner.feedback = Some(Feedback::Found {
                topic: topic.to_string(),
                count,
            });
            count
        };

        let started = self.start().await?;
        Ok(LoadOutcome::Loaded { count, started })
    }

    /// Begin a quiz over the loaded candidates.
    ///
    /// Returns false without doing anything when a quiz is already running
    /// or no candidates are loaded.
    pub async fn start(&self) -> Result<bool, QuizError> {
        {
            let mut inner = self.inner.lock().await;
            if inner.state.is_active() || inner.candidates.is_empty() {
                return Ok(false);
            }
            inner.state.begin();
            info!("Quiz started with {} candidates", inner.candidates.len());
        }

        self.advance().await?;
        Ok(true)
    }

    /// Move to a fresh pick. Does nothing while Idle.
    ///
    /// Returns the new pick, or `None` when idle or when the pick was
    /// superseded by a stop or another advance before it arrived.
    pub async fn advance(&self) -> Result<Option<Pick>, QuizError> {
        let (generation, candidates, mut rng) = {
            let mut inner = self.inner.lock().await;
            if !inner.state.is_active() {
                return Ok(None);
            }
            inner.generation += 1;
            inner.pick = None;
            inner.feedback = None;
            inner.summary.clear();
            inner.image_visible = false;
            inner.guess_enabled = false;

            let seed: u64 = inner.rng.gen();
            (
                inner.generation,
                Arc::clone(&inner.candidates),
                StdRng::seed_from_u64(seed),
            )
        };

        let result = self
            .selector
            .select(self.kb.as_ref(), &candidates, &mut rng)
            .await;

        let mut inner = self.inner.lock().await;
        if inner.generation != generation {
            debug!("Dropping stale pick (generation {})", generation);
            return Ok(None);
        }

        match result {
            Ok(pick) => {
                inner.state.record_studied(&pick.name);
                inner.image_visible = pick.thumbnail.is_some();
                inner.guess_enabled = true;
                inner.pick = Some(pick.clone());
                Ok(Some(pick))
            }
            Err(e) => {
                warn!("Failed to pick next candidate: {}", e);
                inner.feedback = Some(Feedback::Failed);
                Err(e)
            }
        }
    }

    /// Alias for `advance`, the "Next" control.
    pub async fn next(&self) -> Result<Option<Pick>, QuizError> {
        self.advance().await
    }

    /// Score a guess against the current pick and fetch its summary.
    ///
    /// Blank guesses, guesses while Idle and repeat guesses for the same
    /// pick are ignored and return `None`. Matching trims the guess and
    /// ignores case.
    pub async fn submit_guess(&self, text: &str) -> Result<Option<GuessOutcome>, QuizError> {
        let guess = text.trim();
        if guess.is_empty() {
            return Ok(None);
        }

        let (generation, outcome) = {
            let mut inner = self.inner.lock().await;
            if !inner.state.is_active() || !inner.guess_enabled {
                return Ok(None);
            }
            let Some(answer) = inner.pick.as_ref().map(|p| p.name.clone()) else {
                return Ok(None);
            };

            let correct = guess.to_lowercase() == answer.to_lowercase();
            if correct {
                inner.state.record_correct();
                inner.feedback = Some(Feedback::Correct);
            } else {
                inner.feedback = Some(Feedback::Incorrect {
                    answer: answer.clone(),
                });
            }
            // Closed before the summary fetch so a repeat cannot score twice
            inner.guess_enabled = false;

            (
                inner.generation,
                GuessOutcome {
                    correct,
                    answer,
                    score: inner.state.score(),
                },
            )
        };

        debug!(
            "Guess '{}' for '{}': correct={}",
            guess, outcome.answer, outcome.correct
        );
        let summary = self
            .kb
            .fetch_summary(&outcome.answer, self.summary_sentences)
            .await;

        let mut inner = self.inner.lock().await;
        if inner.generation != generation {
            debug!("Dropping stale summary for '{}'", outcome.answer);
            return Ok(Some(outcome));
        }

        match summary {
            Ok(text) => {
                inner.summary = text;
                Ok(Some(outcome))
            }
            Err(e) => {
                warn!("Failed to fetch summary for '{}': {}", outcome.answer, e);
                Err(e.into())
            }
        }
    }

    /// End the quiz. Returns the number of distinct names studied, or
    /// `None` when already Idle.
    pub async fn stop(&self) -> Option<usize> {
        let mut inner = self.inner.lock().await;
        if !inner.state.is_active() {
            return None;
        }

        inner.end_session();
        let studied = inner.state.studied_count();
        inner.feedback = Some(Feedback::Stopped { studied });
        info!("Quiz stopped after {} distinct names", studied);
        Some(studied)
    }
}
