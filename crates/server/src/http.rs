//! HTTP endpoints
//!
//! JSON API for the session/UI boundary. Rendering is the client's job;
//! these handlers only move `(user_input, session_id)` in and response text
//! out.

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", get(get_session))
        .route("/api/sessions/:id", delete(end_session))
        .route("/api/chat/:id", post(chat))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct CreateSessionResponse {
    session_id: String,
    greeting: String,
}

async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
    let session_id = state.sessions.create();

    let greeting = match state.sessions.get(&session_id) {
        Some(handle) => {
            let context = handle.lock().await;
            state
                .orchestrator
                .greeting(&context, &mut rand::thread_rng())
        },
        None => String::new(),
    };

    (
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id,
            greeting,
        }),
    )
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: String,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    session_id: String,
    response: String,
    language: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

async fn chat(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse {
    let Some(handle) = state.sessions.get(&session_id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorBody {
                error: format!("Unknown session: {}", session_id),
            }),
        )
            .into_response();
    };

    // One turn at a time per session; the lock spans the whole pipeline.
    let mut context = handle.lock().await;
    let response = state
        .orchestrator
        .generate_response(&request.message, &mut context)
        .await;

    (
        StatusCode::OK,
        Json(ChatResponse {
            session_id,
            response,
            language: context.language.clone(),
        }),
    )
        .into_response()
}

#[derive(Debug, Serialize)]
struct SessionSummary {
    session_id: String,
    language: String,
    turns: usize,
    created_at: chrono::DateTime<chrono::Utc>,
    last_interaction: chrono::DateTime<chrono::Utc>,
}

async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.sessions.get(&session_id) {
        Some(handle) => {
            let context = handle.lock().await;
            (
                StatusCode::OK,
                Json(SessionSummary {
                    session_id: context.session_id.clone(),
                    language: context.language.clone(),
                    turns: context.turn_count(),
                    created_at: context.created_at,
                    last_interaction: context.last_interaction,
                }),
            )
                .into_response()
        },
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorBody {
                error: format!("Unknown session: {}", session_id),
            }),
        )
            .into_response(),
    }
}

async fn end_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    if state.sessions.end(&session_id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorBody {
                error: format!("Unknown session: {}", session_id),
            }),
        )
            .into_response()
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    sessions: usize,
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        sessions: state.sessions.len(),
    })
}
