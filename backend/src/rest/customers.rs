use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use shared::{Customer, CustomerKpis, CustomerPatch, NewCustomer, TopCustomer};

use super::AppState;
use crate::error::AppResult;

#[derive(Debug, Deserialize)]
pub struct CustomerListQuery {
    pub q: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct TopQuery {
    pub by: Option<String>,
    pub limit: Option<i64>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<CustomerListQuery>,
) -> Json<Vec<Customer>> {
    Json(state.customers.list(query.q.as_deref(), query.limit))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<Customer>> {
    Ok(Json(state.customers.get(id)?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<NewCustomer>,
) -> AppResult<impl IntoResponse> {
    let record = state.customers.create(req)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(patch): Json<CustomerPatch>,
) -> AppResult<Json<Customer>> {
    Ok(Json(state.customers.update(id, patch)?))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<serde_json::Value>> {
    state.customers.delete(id)?;
    Ok(Json(json!({ "ok": true })))
}

pub async fn kpis(State(state): State<AppState>) -> Json<CustomerKpis> {
    Json(state.customers.kpis())
}

pub async fn top(
    State(state): State<AppState>,
    Query(query): Query<TopQuery>,
) -> Json<Vec<TopCustomer>> {
    Json(state.customers.top(query.by.as_deref(), query.limit))
}
