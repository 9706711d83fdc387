use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use shared::{Feedback, FeedbackRequest};

use super::AppState;
use crate::error::AppResult;

pub async fn list(State(state): State<AppState>) -> Json<Vec<Feedback>> {
    Json(state.feedback.list())
}

pub async fn general(
    State(state): State<AppState>,
    Json(req): Json<FeedbackRequest>,
) -> AppResult<impl IntoResponse> {
    let fb = state.feedback.submit_general(req)?;
    Ok((StatusCode::CREATED, Json(fb)))
}

pub async fn session(
    State(state): State<AppState>,
    Json(req): Json<FeedbackRequest>,
) -> AppResult<impl IntoResponse> {
    let fb = state.feedback.submit_session(req)?;
    Ok((StatusCode::CREATED, Json(fb)))
}
