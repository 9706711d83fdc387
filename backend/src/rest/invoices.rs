use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use shared::{FromAppointmentRequest, Invoice, InvoicePatch, NewInvoice};

use super::AppState;
use crate::domain::invoices::InvoiceFilter;
use crate::error::AppResult;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceListQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub customer_id: Option<i64>,
    pub therapist_id: Option<i64>,
    pub mode: Option<String>,
    pub payment: Option<String>,
    pub appointment_id: Option<u64>,
    pub q: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<InvoiceListQuery>,
) -> Json<Vec<Invoice>> {
    let filter = InvoiceFilter {
        from: query.from,
        to: query.to,
        customer_id: query.customer_id,
        therapist_id: query.therapist_id,
        mode: query.mode,
        payment: query.payment,
        appointment_id: query.appointment_id,
        q: query.q,
    };
    Json(state.invoices.list(&filter))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<Invoice>> {
    Ok(Json(state.invoices.get(id)?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<NewInvoice>,
) -> AppResult<impl IntoResponse> {
    let record = state.invoices.create(req)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(patch): Json<InvoicePatch>,
) -> AppResult<Json<Invoice>> {
    Ok(Json(state.invoices.update(id, patch)?))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<serde_json::Value>> {
    let deleted = state.invoices.delete(id)?;
    Ok(Json(json!({ "ok": true, "deleted": deleted })))
}

/// 201 when a draft is created, 200 when the appointment already has one.
pub async fn from_appointment(
    State(state): State<AppState>,
    Json(req): Json<FromAppointmentRequest>,
) -> AppResult<Response> {
    let (record, created) = state.invoices.from_appointment(req)?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(record)).into_response())
}
