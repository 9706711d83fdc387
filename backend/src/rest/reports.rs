use axum::extract::State;
use axum::Json;
use shared::CustomerReportRow;

use super::AppState;

pub async fn customers(State(state): State<AppState>) -> Json<Vec<CustomerReportRow>> {
    Json(state.reports.customers())
}
