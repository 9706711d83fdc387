use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use shared::{BulkExpenses, BulkExpensesResult, Expense, NewExpense};

use super::AppState;
use crate::error::AppResult;

pub async fn list(State(state): State<AppState>) -> Json<Vec<Expense>> {
    Json(state.expenses.list())
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<NewExpense>,
) -> AppResult<impl IntoResponse> {
    let item = state.expenses.create(req)?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn bulk(
    State(state): State<AppState>,
    Json(req): Json<BulkExpenses>,
) -> AppResult<Json<BulkExpensesResult>> {
    Ok(Json(state.expenses.bulk(req.items)?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(patch): Json<NewExpense>,
) -> AppResult<Json<Expense>> {
    Ok(Json(state.expenses.update(id, patch)?))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<serde_json::Value>> {
    let removed = state.expenses.delete(id)?;
    Ok(Json(json!({ "ok": true, "removed": removed })))
}
