use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use shared::{Appointment, AppointmentPatch, NewAppointment};
use tracing::info;

use super::AppState;
use crate::error::AppResult;

pub async fn list(State(state): State<AppState>) -> Json<Vec<Appointment>> {
    Json(state.appointments.list())
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<NewAppointment>,
) -> AppResult<impl IntoResponse> {
    let appt = state.appointments.create(req)?;
    Ok((StatusCode::CREATED, Json(appt)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(patch): Json<AppointmentPatch>,
) -> AppResult<Json<Appointment>> {
    Ok(Json(state.appointments.update(id, patch)?))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<serde_json::Value>> {
    let removed = state.appointments.delete(id)?;
    Ok(Json(json!({ "ok": true, "removed": removed })))
}

/// 201 with a fresh session, or 200 with the one already running.
pub async fn start(State(state): State<AppState>, Path(id): Path<u64>) -> AppResult<Response> {
    info!("POST /api/appointments/{id}/start");
    let started = state.appointments.start(id)?;
    let status = if started.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(started.session)).into_response())
}
