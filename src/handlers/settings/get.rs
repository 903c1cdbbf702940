// handlers/settings/get.rs - GET /api/settings
use axum::response::Json;
use serde_json::{json, Value};

use crate::config::config;
use crate::database::{options, DatabaseManager};
use crate::error::ApiError;

/// GET /api/settings - Current deletion settings plus the public URL of the
/// delete endpoint (for operators wiring up a caller).
pub async fn get() -> Result<Json<Value>, ApiError> {
    let pool = DatabaseManager::pool().await?;

    let limit = match options::get_settings(&pool).await? {
        Some(settings) => settings.limit,
        None => config().deletion.default_limit,
    };

    let endpoint_url = format!(
        "{}/product-delete/v1/delete-products",
        config().public_base_url()
    );

    Ok(Json(json!({
        "success": true,
        "data": {
            "limit": limit,
            "endpoint_url": endpoint_url
        }
    })))
}
