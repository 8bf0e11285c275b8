pub mod config;
pub mod lookup;
pub mod quiz;
pub mod testing;

pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, Config, ConfigError,
    LookupConfig, QuizConfig, ServerConfig,
};
pub use lookup::{KnowledgeBase, LookupError, WikipediaClient};
pub use quiz::{
    CandidateSelector, Feedback, GuessOutcome, LoadOutcome, Phase, Pick, QuizController,
    QuizError, QuizView, SessionState, TopicResolver,
};
