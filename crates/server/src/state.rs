use std::sync::Arc;

use physiquiz_core::{Config, QuizController};

/// Shared application state
pub struct AppState {
    config: Config,
    quiz: Arc<QuizController>,
}

impl AppState {
    pub fn new(config: Config, quiz: Arc<QuizController>) -> Self {
        Self { config, quiz }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn quiz(&self) -> &QuizController {
        self.quiz.as_ref()
    }
}
