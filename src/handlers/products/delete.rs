// handlers/products/delete.rs - POST /product-delete/v1/delete-products
use axum::{extract::Query, response::Json};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::config;
use crate::database::{options, products, DatabaseManager};
use crate::error::ApiError;
use crate::storage;

#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    /// Cap on how many products this request removes. Falls back to the
    /// stored settings, then to the configured default.
    pub limit: Option<i64>,
}

/// Outcome report for one bulk-delete request
#[derive(Debug, Serialize)]
pub struct DeleteReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub requested_limit: i64,
    pub deleted_count: usize,
    pub deleted_ids: Vec<i64>,
    pub failed_ids: Vec<i64>,
}

/// POST /product-delete/v1/delete-products
///
/// Selects the oldest products up to the effective limit, deletes each one's
/// thumbnail and gallery attachments, then deletes the product record itself.
/// Always answers 200; per-record failures are reported in `failed_ids` and
/// never abort the batch.
pub async fn delete_products(
    Query(query): Query<DeleteParams>,
    body: Option<Json<DeleteParams>>,
) -> Result<Json<DeleteReport>, ApiError> {
    // Query parameter wins over the body field when both are present
    let requested = query.limit.or(body.and_then(|Json(b)| b.limit));
    if matches!(requested, Some(l) if l < 1) {
        return Err(ApiError::bad_request("limit must be at least 1"));
    }

    let pool = DatabaseManager::pool().await?;

    let stored = match requested {
        Some(_) => None,
        None => options::get_settings(&pool).await?.map(|s| s.limit),
    };
    let limit = effective_limit(requested, stored, config().deletion.default_limit);

    let selected = products::select_product_ids(&pool, limit).await?;
    if selected.is_empty() {
        return Ok(Json(DeleteReport {
            success: true,
            message: Some("No products found to delete".to_string()),
            requested_limit: limit,
            deleted_count: 0,
            deleted_ids: vec![],
            failed_ids: vec![],
        }));
    }

    let mut deleted_ids = Vec::new();
    let mut failed_ids = Vec::new();

    for product_id in selected {
        // Attachment cleanup failures never block the record delete
        match products::media_refs(&pool, product_id).await {
            Ok(refs) => {
                if let Some(thumbnail_id) = refs.thumbnail_id {
                    delete_attachment(&pool, thumbnail_id).await;
                }
                for gallery_id in refs.gallery_ids {
                    delete_attachment(&pool, gallery_id).await;
                }
            }
            Err(e) => {
                warn!("Failed to read media refs for product {}: {}", product_id, e);
            }
        }

        match products::delete_record(&pool, product_id).await {
            Ok(true) => deleted_ids.push(product_id),
            Ok(false) => {
                // Row vanished between select and delete (e.g. a concurrent call)
                warn!("Product {} was already gone", product_id);
                failed_ids.push(product_id);
            }
            Err(e) => {
                warn!("Failed to delete product {}: {}", product_id, e);
                failed_ids.push(product_id);
            }
        }
    }

    info!(
        "Deleted {} of {} selected products ({} failed)",
        deleted_ids.len(),
        deleted_ids.len() + failed_ids.len(),
        failed_ids.len()
    );

    Ok(Json(DeleteReport {
        success: true,
        message: None,
        requested_limit: limit,
        deleted_count: deleted_ids.len(),
        deleted_ids,
        failed_ids,
    }))
}

/// Delete an attachment record and its stored media file.
/// Failures are logged; the caller proceeds either way.
async fn delete_attachment(pool: &PgPool, attachment_id: i64) {
    match products::attachment_file_path(pool, attachment_id).await {
        Ok(Some(file_path)) => {
            storage::remove_media_file(&config().deletion.uploads_dir, &file_path).await;
        }
        Ok(None) => {}
        Err(e) => {
            warn!("Failed to look up file for attachment {}: {}", attachment_id, e);
        }
    }

    match products::delete_record(pool, attachment_id).await {
        Ok(_) => {}
        Err(e) => {
            warn!("Failed to delete attachment {}: {}", attachment_id, e);
        }
    }
}

/// Resolve the limit for a request: explicit parameter, then the stored
/// configuration record, then the hard default.
fn effective_limit(requested: Option<i64>, stored: Option<i64>, default: i64) -> i64 {
    requested.or(stored).unwrap_or(default)
}
