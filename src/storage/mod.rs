use std::path::{Path, PathBuf};

use tracing::warn;

/// Remove an attachment's media file from the uploads directory.
///
/// Relative paths are resolved against `uploads_dir`; a path that escapes the
/// uploads directory is refused. A file that is already gone is a no-op.
/// Returns whether the file is absent afterwards.
pub async fn remove_media_file(uploads_dir: &str, file_path: &str) -> bool {
    let full_path = match resolve_media_path(uploads_dir, file_path) {
        Some(p) => p,
        None => {
            warn!("Refusing to remove media file outside uploads dir: {}", file_path);
            return false;
        }
    };

    match tokio::fs::remove_file(&full_path).await {
        Ok(()) => true,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
        Err(e) => {
            warn!("Failed to remove media file {}: {}", full_path.display(), e);
            false
        }
    }
}

/// Resolve a stored file path against the uploads directory.
/// Rejects absolute paths and any parent-directory traversal.
fn resolve_media_path(uploads_dir: &str, file_path: &str) -> Option<PathBuf> {
    let relative = Path::new(file_path);
    if relative.is_absolute() {
        return None;
    }
    if relative
        .components()
        .any(|c| matches!(c, std::path::Component::ParentDir))
    {
        return None;
    }
    Some(Path::new(uploads_dir).join(relative))
}
