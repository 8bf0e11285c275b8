use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{handlers, quiz};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Quiz intents
        .route("/quiz", get(quiz::get_quiz))
        .route("/quiz/topic", post(quiz::load_topic))
        .route("/quiz/guess", post(quiz::submit_guess))
        .route("/quiz/next", post(quiz::next))
        .route("/quiz/stop", post(quiz::stop))
        .with_state(state);

    // Any origin may drive the quiz; there is nothing to authenticate
    Router::new()
        .nest("/api/v1", api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
