//! Admin settings management.

use std::collections::BTreeMap;

use axum::{Json, body::Bytes, extract::State};
use serde::Deserialize;
use tracing::instrument;

use crate::db::SettingsRepository;
use crate::error::{Result, ResultExt, add_breadcrumb};
use crate::middleware::RequireAdmin;
use crate::routes::settings::SettingsResponse;
use crate::state::AppState;
use crate::validation::{ValidationError, parse_json};

use super::products::SuccessBody;

/// Body of `POST /_api/admin/settings/update`.
#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub settings: BTreeMap<String, String>,
}

impl UpdateSettingsRequest {
    /// # Errors
    ///
    /// Returns `ValidationError::Field` if any key is empty.
    pub fn validate(self) -> std::result::Result<BTreeMap<String, String>, ValidationError> {
        if self.settings.keys().any(|k| k.trim().is_empty()) {
            return Err(ValidationError::field(
                "settings",
                "keys must not be empty",
            ));
        }
        Ok(self.settings)
    }
}

/// Read every setting.
///
/// GET /_api/admin/settings
#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<Json<SettingsResponse>> {
    let settings = SettingsRepository::new(state.pool())
        .all()
        .await
        .context("Failed to fetch settings")?;

    Ok(Json(SettingsResponse { settings }))
}

/// Upsert settings atomically.
///
/// POST /_api/admin/settings/update
#[instrument(skip(state, admin, body), fields(admin_id = %admin.id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    body: Bytes,
) -> Result<Json<SuccessBody>> {
    const CONTEXT: &str = "Failed to update settings";

    let settings = parse_json::<UpdateSettingsRequest>(&body)
        .and_then(UpdateSettingsRequest::validate)
        .context(CONTEXT)?;

    SettingsRepository::new(state.pool())
        .upsert_many(&settings)
        .await
        .context(CONTEXT)?;

    let keys = settings.keys().cloned().collect::<Vec<_>>().join(",");
    add_breadcrumb("admin", "Settings updated", &[("keys", keys.as_str())]);
    tracing::info!(count = settings.len(), "Settings updated");

    Ok(Json(SuccessBody { success: true }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_map_is_valid() {
        let request: UpdateSettingsRequest = parse_json(br#"{"settings": {}}"#).unwrap();
        assert!(request.validate().unwrap().is_empty());
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let request: UpdateSettingsRequest =
            parse_json(br#"{"settings": {"": "x", "whatsappNumber": "919876543210"}}"#).unwrap();
        assert_eq!(
            request.validate().unwrap_err().to_string(),
            "settings: keys must not be empty"
        );
    }

    #[test]
    fn test_non_string_value_is_body_error() {
        let err = parse_json::<UpdateSettingsRequest>(br#"{"settings": {"whatsappNumber": 91}}"#)
            .unwrap_err();
        assert!(matches!(err, ValidationError::Body(_)));
    }
}
