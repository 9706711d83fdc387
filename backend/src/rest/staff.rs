use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use shared::{NewStaff, Staff, StaffPatch};

use super::AppState;
use crate::error::AppResult;

pub async fn list(State(state): State<AppState>) -> Json<Vec<Staff>> {
    Json(state.staff.list())
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<NewStaff>,
) -> AppResult<impl IntoResponse> {
    let member = state.staff.create(req)?;
    Ok((StatusCode::CREATED, Json(member)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(patch): Json<StaffPatch>,
) -> AppResult<Json<Staff>> {
    Ok(Json(state.staff.update(id, patch)?))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<serde_json::Value>> {
    state.staff.delete(id)?;
    Ok(Json(json!({ "ok": true })))
}
