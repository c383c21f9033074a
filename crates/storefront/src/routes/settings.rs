//! Public settings route handler.

use std::collections::BTreeMap;

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::db::SettingsRepository;
use crate::db::settings::PUBLIC_SETTING_KEYS;
use crate::error::{Result, ResultExt};
use crate::state::AppState;

/// Settings map response, shared with the admin endpoint.
#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub settings: BTreeMap<String, String>,
}

/// Read the settings shoppers are allowed to see.
///
/// GET /_api/settings
#[instrument(skip(state))]
pub async fn public(State(state): State<AppState>) -> Result<Json<SettingsResponse>> {
    let settings = SettingsRepository::new(state.pool())
        .get_many(PUBLIC_SETTING_KEYS)
        .await
        .context("Failed to fetch settings")?;

    Ok(Json(SettingsResponse { settings }))
}
