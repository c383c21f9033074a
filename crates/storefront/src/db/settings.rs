//! Site settings repository.
//!
//! Settings are a flat `key -> value` table edited from the admin panel.

use std::collections::BTreeMap;

use sqlx::PgPool;

use super::RepositoryError;

/// Settings shoppers may read without logging in.
pub const PUBLIC_SETTING_KEYS: &[&str] = &[WHATSAPP_NUMBER];

/// Contact number used for the product "buy" link.
pub const WHATSAPP_NUMBER: &str = "whatsappNumber";

#[derive(sqlx::FromRow)]
struct SettingRow {
    key: String,
    value: String,
}

/// Repository for settings database operations.
pub struct SettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepository<'a> {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get every setting.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn all(&self) -> Result<BTreeMap<String, String>, RepositoryError> {
        let rows = sqlx::query_as::<_, SettingRow>("SELECT key, value FROM settings")
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| (r.key, r.value)).collect())
    }

    /// Get the settings named in `keys`. Missing keys are left out.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_many(&self, keys: &[&str]) -> Result<BTreeMap<String, String>, RepositoryError> {
        let rows =
            sqlx::query_as::<_, SettingRow>("SELECT key, value FROM settings WHERE key = ANY($1)")
                .bind(keys)
                .fetch_all(self.pool)
                .await?;

        Ok(rows.into_iter().map(|r| (r.key, r.value)).collect())
    }

    /// Get a single setting.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM settings WHERE key = $1")
            .bind(key)
            .fetch_optional(self.pool)
            .await?;

        Ok(value)
    }

    /// Insert or overwrite every pair in one transaction.
    ///
    /// Either all keys are written or none are.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any write fails; the
    /// transaction is rolled back.
    pub async fn upsert_many(
        &self,
        settings: &BTreeMap<String, String>,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        for (key, value) in settings {
            sqlx::query(
                r"
                INSERT INTO settings (key, value, updated_at)
                VALUES ($1, $2, NOW())
                ON CONFLICT (key) DO UPDATE
                SET value = EXCLUDED.value, updated_at = NOW()
                ",
            )
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
