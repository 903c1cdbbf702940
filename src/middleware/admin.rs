use axum::{
    extract::Request,
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::config::config;
use crate::error::ApiError;

/// Admin gate for the settings endpoints.
///
/// Compares the bearer token against the configured admin token. When no
/// token is configured the settings surface is disabled entirely.
pub async fn require_admin(
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let expected = config()
        .security
        .admin_token
        .as_deref()
        .ok_or_else(|| ApiError::service_unavailable("Admin token is not configured"))?;

    let provided = extract_bearer_token(&headers)
        .ok_or_else(|| ApiError::unauthorized("Missing or malformed Authorization header"))?;

    if provided != expected {
        return Err(ApiError::unauthorized("Invalid admin token"));
    }

    Ok(next.run(request).await)
}

/// Extract a bearer token from the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
