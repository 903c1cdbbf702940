use sqlx::PgPool;

use crate::database::manager::DatabaseError;

/// Media attachment references carried by a product record
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MediaRefs {
    pub thumbnail_id: Option<i64>,
    pub gallery_ids: Vec<i64>,
}

/// Select up to `limit` product identifiers, oldest first
pub async fn select_product_ids(pool: &PgPool, limit: i64) -> Result<Vec<i64>, DatabaseError> {
    let ids = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM records
         WHERE record_type = 'product'
         ORDER BY id ASC
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(ids)
}

/// Read the thumbnail and gallery metadata for a product
pub async fn media_refs(pool: &PgPool, product_id: i64) -> Result<MediaRefs, DatabaseError> {
    let rows = sqlx::query_as::<_, (String, String)>(
        "SELECT meta_key, meta_value FROM record_meta
         WHERE record_id = $1 AND meta_key IN ('thumbnail_id', 'gallery_ids')",
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;

    let mut refs = MediaRefs::default();
    for (key, value) in rows {
        match key.as_str() {
            "thumbnail_id" => refs.thumbnail_id = value.trim().parse().ok(),
            "gallery_ids" => refs.gallery_ids = parse_gallery_ids(&value),
            _ => {}
        }
    }

    Ok(refs)
}

/// Look up the stored media file path for an attachment, if any
pub async fn attachment_file_path(
    pool: &PgPool,
    attachment_id: i64,
) -> Result<Option<String>, DatabaseError> {
    let path = sqlx::query_scalar::<_, String>(
        "SELECT meta_value FROM record_meta
         WHERE record_id = $1 AND meta_key = 'file_path'",
    )
    .bind(attachment_id)
    .fetch_optional(pool)
    .await?;

    Ok(path)
}

/// Permanently delete a record and its metadata rows.
/// Returns false when no record row existed (already gone).
pub async fn delete_record(pool: &PgPool, id: i64) -> Result<bool, DatabaseError> {
    sqlx::query("DELETE FROM record_meta WHERE record_id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    let result = sqlx::query("DELETE FROM records WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Parse a comma-delimited gallery list ("12,15,23") into attachment ids.
/// Blank and non-numeric tokens are skipped.
pub fn parse_gallery_ids(raw: &str) -> Vec<i64> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect()
}
