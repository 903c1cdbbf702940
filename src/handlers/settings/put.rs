// handlers/settings/put.rs - PUT /api/settings
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::{options, DatabaseManager};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SettingsPayload {
    pub limit: i64,
}

/// PUT /api/settings - Persist the deletion limit
pub async fn put(Json(payload): Json<SettingsPayload>) -> Result<Json<Value>, ApiError> {
    if payload.limit < 1 {
        return Err(ApiError::bad_request("limit must be at least 1"));
    }

    let pool = DatabaseManager::pool().await?;
    let settings = options::Settings {
        limit: payload.limit,
    };
    options::save_settings(&pool, &settings).await?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "limit": settings.limit
        }
    })))
}
