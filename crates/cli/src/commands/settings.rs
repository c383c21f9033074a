//! Site settings commands.
//!
//! # Usage
//!
//! ```bash
//! champ-cli settings set whatsappNumber 919876543210
//! ```

use std::collections::BTreeMap;

use champ_storefront::db::SettingsRepository;

/// Insert or replace one setting.
///
/// # Errors
///
/// Returns an error for an empty key or if the database write fails.
pub async fn set(key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
    let settings = single_setting(key, value)?;

    let pool = super::connect().await?;
    SettingsRepository::new(&pool).upsert_many(&settings).await?;

    tracing::info!("Setting saved: {} = {}", key.trim(), value);
    Ok(())
}

fn single_setting(key: &str, value: &str) -> Result<BTreeMap<String, String>, String> {
    let key = key.trim();
    if key.is_empty() {
        return Err("Setting key must not be empty".to_owned());
    }
    Ok(BTreeMap::from([(key.to_owned(), value.to_owned())]))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_trimmed() {
        let settings = single_setting(" whatsappNumber ", "919876543210").unwrap();
        assert_eq!(
            settings.get("whatsappNumber").map(String::as_str),
            Some("919876543210")
        );
    }

    #[test]
    fn test_blank_key_is_rejected() {
        assert!(single_setting("   ", "x").is_err());
    }
}
