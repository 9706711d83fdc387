use axum::extract::State;
use axum::Json;
use shared::{Settings, SettingsPatch};

use super::AppState;
use crate::error::AppResult;

pub async fn get_settings(State(state): State<AppState>) -> Json<Settings> {
    Json(state.settings.get())
}

/// PUT and PATCH behave the same: merge the provided fields.
pub async fn update_settings(
    State(state): State<AppState>,
    Json(patch): Json<SettingsPatch>,
) -> AppResult<Json<Settings>> {
    Ok(Json(state.settings.update(patch)?))
}
