use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use shared::{AuthResponse, LoginRequest, NewUser, RegisterRequest, UserPatch, UserPublic};

use super::AppState;
use crate::auth::CurrentUser;
use crate::error::AppResult;

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let resp = state.accounts.register(req)?;
    Ok((StatusCode::CREATED, Json(resp)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    Ok(Json(state.accounts.login(req)?))
}

pub async fn me(State(state): State<AppState>, user: CurrentUser) -> AppResult<Json<UserPublic>> {
    Ok(Json(state.accounts.me(&user)?))
}

pub async fn list_users(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<UserPublic>>> {
    user.require_role(&["admin", "supervisor"])?;
    Ok(Json(state.accounts.list_users()))
}

pub async fn create_user(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<NewUser>,
) -> AppResult<impl IntoResponse> {
    user.require_role(&["admin"])?;
    let created = state.accounts.create_user(req)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_user(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<u64>,
    Json(patch): Json<UserPatch>,
) -> AppResult<Json<UserPublic>> {
    user.require_role(&["admin"])?;
    Ok(Json(state.accounts.update_user(id, patch)?))
}

pub async fn delete_user(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<u64>,
) -> AppResult<Json<serde_json::Value>> {
    user.require_role(&["admin"])?;
    let deleted = state.accounts.delete_user(id)?;
    Ok(Json(json!({ "ok": true, "deleted": deleted })))
}
