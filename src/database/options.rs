use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::warn;

use crate::database::manager::DatabaseError;

/// Option row name for this service's configuration record
pub const SETTINGS_OPTION: &str = "product_purge_settings";

/// Persisted deletion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Maximum number of products deleted per request
    pub limit: i64,
}

impl Settings {
    /// Enforce the lower bound on values written out of band. The settings
    /// endpoint rejects these outright; anything already stored is clamped.
    pub fn clamped(self) -> Self {
        if self.limit < 1 {
            warn!("Stored deletion limit {} is below 1, clamping", self.limit);
            Self { limit: 1 }
        } else {
            self
        }
    }
}

/// Read the stored settings, if a configuration record exists.
/// A malformed stored value is treated as absent.
pub async fn get_settings(pool: &PgPool) -> Result<Option<Settings>, DatabaseError> {
    let value = sqlx::query_scalar::<_, serde_json::Value>(
        "SELECT value FROM options WHERE name = $1",
    )
    .bind(SETTINGS_OPTION)
    .fetch_optional(pool)
    .await?;

    match value {
        Some(v) => match serde_json::from_value::<Settings>(v) {
            Ok(settings) => Ok(Some(settings.clamped())),
            Err(e) => {
                warn!("Ignoring malformed settings option: {}", e);
                Ok(None)
            }
        },
        None => Ok(None),
    }
}

/// Create or replace the configuration record
pub async fn save_settings(pool: &PgPool, settings: &Settings) -> Result<(), DatabaseError> {
    let value = serde_json::to_value(settings)
        .map_err(|e| DatabaseError::QueryError(format!("settings serialization: {}", e)))?;

    sqlx::query(
        "INSERT INTO options (name, value) VALUES ($1, $2)
         ON CONFLICT (name) DO UPDATE SET value = EXCLUDED.value",
    )
    .bind(SETTINGS_OPTION)
    .bind(value)
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_round_trip() {
        let settings = Settings { limit: 25 };
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value, serde_json::json!({"limit": 25}));

        let back: Settings = serde_json::from_value(value).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn clamps_non_positive_limit() {
        assert_eq!(Settings { limit: 0 }.clamped().limit, 1);
        assert_eq!(Settings { limit: -5 }.clamped().limit, 1);
        assert_eq!(Settings { limit: 25 }.clamped().limit, 25);
    }
}
