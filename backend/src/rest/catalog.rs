use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use shared::{NewService, ServiceItem, ServicePatch};

use super::AppState;
use crate::error::AppResult;

pub async fn list(State(state): State<AppState>) -> Json<Vec<ServiceItem>> {
    Json(state.catalog.list())
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<NewService>,
) -> AppResult<impl IntoResponse> {
    let item = state.catalog.create(req)?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(patch): Json<ServicePatch>,
) -> AppResult<Json<ServiceItem>> {
    Ok(Json(state.catalog.update(id, patch)?))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<ServiceItem>> {
    Ok(Json(state.catalog.delete(id)?))
}
