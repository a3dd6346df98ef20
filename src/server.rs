//! HTTP surface for the game core. Wire format here is a thin mirror of the
//! inbound operations; nothing in `state` depends on it.

use crate::error::GameError;
use crate::protocol::{ChatRequest, GuessRequest, RegisterRequest};
use crate::state::AppState;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

/// Header carrying the caller's player id on per-player routes
pub const PLAYER_ID_HEADER: &str = "x-quizcast-player-id";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/register", post(register))
        .route("/goodbye", post(goodbye))
        .route("/start", post(start))
        .route("/question", get(question))
        .route("/answer", post(answer))
        .route("/chat", post(chat))
        .with_state(state)
}

impl IntoResponse for GameError {
    fn into_response(self) -> Response {
        let status = match &self {
            GameError::StartFailed(_) | GameError::QuestionUnavailable(_) => {
                StatusCode::BAD_GATEWAY
            }
            GameError::NoActiveQuestion => StatusCode::BAD_REQUEST,
            GameError::UnknownPlayer(_) => StatusCode::NOT_FOUND,
        };
        error_response(status, &self.to_string())
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    let body = Json(serde_json::json!({
        "error": message,
        "status": status.as_u16(),
    }));
    (status, body).into_response()
}

fn player_id(headers: &HeaderMap) -> Result<String, Response> {
    headers
        .get(PLAYER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| {
            error_response(
                StatusCode::BAD_REQUEST,
                &format!("missing {PLAYER_ID_HEADER} header"),
            )
        })
}

async fn root(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({ "players": state.players().await }))
}

async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> StatusCode {
    // Idempotent: a duplicate id is a no-op, still 204
    state
        .register_player(req.player_id, req.address, req.nick)
        .await;
    StatusCode::NO_CONTENT
}

async fn goodbye(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, Response> {
    let player_id = player_id(&headers)?;
    state.remove_player(&player_id).await;
    Ok(StatusCode::NO_CONTENT)
}

async fn start(State(state): State<AppState>) -> Result<StatusCode, GameError> {
    state.start().await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn question(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, Response> {
    let player_id = player_id(&headers)?;
    let view = state
        .request_question(&player_id)
        .await
        .map_err(IntoResponse::into_response)?;
    Ok(Json(view).into_response())
}

async fn answer(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<GuessRequest>,
) -> Result<Response, Response> {
    let player_id = player_id(&headers)?;
    let outcome = state
        .submit_guess(&player_id, &req.text)
        .await
        .map_err(IntoResponse::into_response)?;
    Ok(Json(outcome).into_response())
}

async fn chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> StatusCode {
    state.post_chat_message(req.message).await;
    StatusCode::NO_CONTENT
}
