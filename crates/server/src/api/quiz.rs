//! Quiz intent handlers.
//!
//! Every handler forwards one user intent to the session controller and
//! answers with the resulting `QuizView`.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use physiquiz_core::{QuizError, QuizView};

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LoadTopicRequest {
    #[serde(default)]
    pub topic: String,
}

#[derive(Debug, Deserialize)]
pub struct GuessRequest {
    #[serde(default)]
    pub guess: String,
}

/// Failure body: the error text plus the state left behind.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub state: QuizView,
}

type QuizResponse = Result<Json<QuizView>, (StatusCode, Json<ErrorResponse>)>;

async fn failure(state: &AppState, err: QuizError) -> (StatusCode, Json<ErrorResponse>) {
    error!("Quiz transition failed: {}", err);
    let status = match &err {
        QuizError::Lookup(_) => StatusCode::BAD_GATEWAY,
        QuizError::NoCandidates => StatusCode::CONFLICT,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            state: state.quiz().view().await,
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/quiz
///
/// Current quiz state.
pub async fn get_quiz(State(state): State<Arc<AppState>>) -> Json<QuizView> {
    Json(state.quiz().view().await)
}

/// POST /api/v1/quiz/topic
///
/// Load a topic and start a quiz when none is running.
pub async fn load_topic(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoadTopicRequest>,
) -> QuizResponse {
    match state.quiz().load_topic(&request.topic).await {
        Ok(outcome) => {
            debug!("Load '{}': {:?}", request.topic, outcome);
            Ok(Json(state.quiz().view().await))
        }
        Err(e) => Err(failure(&state, e).await),
    }
}

/// POST /api/v1/quiz/guess
///
/// Score a guess for the current pick.
pub async fn submit_guess(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GuessRequest>,
) -> QuizResponse {
    match state.quiz().submit_guess(&request.guess).await {
        Ok(_) => Ok(Json(state.quiz().view().await)),
        Err(e) => Err(failure(&state, e).await),
    }
}

/// POST /api/v1/quiz/next
///
/// Move to a new pick. Ignored while no quiz is running.
pub async fn next(State(state): State<Arc<AppState>>) -> QuizResponse {
    match state.quiz().next().await {
        Ok(_) => Ok(Json(state.quiz().view().await)),
        Err(e) => Err(failure(&state, e).await),
    }
}

/// POST /api/v1/quiz/stop
///
/// End the running quiz.
pub async fn stop(State(state): State<Arc<AppState>>) -> Json<QuizView> {
    state.quiz().stop().await;
    Json(state.quiz().view().await)
}
