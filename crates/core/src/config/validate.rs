use super::{types::Config, ConfigError};

/// Placeholder that topic templates must contain
pub const TOPIC_PLACEHOLDER: &str = "{topic}";

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Lookup endpoint is set and listing limits are within API bounds
/// - Topic templates contain the `{topic}` placeholder
/// - Quiz counters are at least 1
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    let lookup = &config.lookup;
    if lookup.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "lookup.base_url cannot be empty".to_string(),
        ));
    }
    if lookup.thumbnail_size == 0 {
        return Err(ConfigError::ValidationError(
            "lookup.thumbnail_size must be at least 1".to_string(),
        ));
    }
    // MediaWiki caps list queries at 500 for anonymous clients
    if lookup.result_limit == 0 || lookup.result_limit > 500 {
        return Err(ConfigError::ValidationError(
            "lookup.result_limit must be between 1 and 500".to_string(),
        ));
    }

    let quiz = &config.quiz;
    if !quiz.category_template.contains(TOPIC_PLACEHOLDER) {
        return Err(ConfigError::ValidationError(format!(
            "quiz.category_template must contain {}",
            TOPIC_PLACEHOLDER
        )));
    }
    if !quiz.search_template.contains(TOPIC_PLACEHOLDER) {
        return Err(ConfigError::ValidationError(format!(
            "quiz.search_template must contain {}",
            TOPIC_PLACEHOLDER
        )));
    }
    if quiz.max_pick_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "quiz.max_pick_attempts must be at least 1".to_string(),
        ));
    }
    if quiz.summary_sentences == 0 {
        return Err(ConfigError::ValidationError(
            "quiz.summary_sentences must be at least 1".to_string(),
        ));
    }

    Ok(())
}
