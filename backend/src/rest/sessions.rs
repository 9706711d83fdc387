use axum::extract::{Path, State};
use axum::http::header::ORIGIN;
use axum::http::HeaderMap;
use axum::Json;
use shared::{
    CompleteSessionRequest, CompletedSession, ExtendSessionRequest, Session, SessionPatch,
};

use super::AppState;
use crate::error::AppResult;

pub async fn list(State(state): State<AppState>) -> Json<Vec<Session>> {
    Json(state.sessions.list())
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<Session>> {
    Ok(Json(state.sessions.get(id)?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(patch): Json<SessionPatch>,
) -> AppResult<Json<Session>> {
    Ok(Json(state.sessions.update(id, patch)?))
}

pub async fn pause(State(state): State<AppState>, Path(id): Path<u64>) -> AppResult<Json<Session>> {
    Ok(Json(state.sessions.pause(id)?))
}

/// The desk posts these without a body; an absent or non-JSON body means
/// "use the defaults".
pub async fn complete(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    body: Option<Json<CompleteSessionRequest>>,
) -> AppResult<Json<CompletedSession>> {
    let origin = headers.get(ORIGIN).and_then(|v| v.to_str().ok());
    let req = body.map(|Json(r)| r).unwrap_or_default();
    Ok(Json(state.sessions.complete(id, req, origin)?))
}

pub async fn extend(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    body: Option<Json<ExtendSessionRequest>>,
) -> AppResult<Json<Session>> {
    let req = body.map(|Json(r)| r).unwrap_or_default();
    Ok(Json(state.sessions.extend(id, req)?))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<Session>> {
    Ok(Json(state.sessions.delete(id)?))
}
