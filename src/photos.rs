use std::path::{Path, PathBuf};

use bytes::Bytes;
use thiserror::Error;

/// URL prefix under which stored photos are served. Record `photo` fields
/// hold references of the form `/uploads/<filename>`.
pub const PHOTO_URL_PREFIX: &str = "/uploads/";

#[derive(Debug, Error)]
pub enum PhotoStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Photo not found: {0}")]
    NotFound(String),
}

/// Local filesystem storage for uploaded employee photos.
///
/// Filenames are prefixed with the upload timestamp so a re-uploaded file of
/// the same name never collides with an existing one.
pub struct PhotoStore {
    base_path: PathBuf,
}

impl PhotoStore {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Result<Self, std::io::Error> {
        let base_path = base_path.as_ref().to_path_buf();
        std::fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    /// Write uploaded bytes under a fresh unique filename and return the
    /// `/uploads/...` reference to store on the employee record.
    pub async fn store(
        &self,
        data: Bytes,
        original_name: &str,
    ) -> Result<String, PhotoStoreError> {
        let base_name = sanitize_name(original_name);
        let millis = chrono::Utc::now().timestamp_millis();

        let mut filename = format!("{millis}-{base_name}");
        let mut attempt = 0u32;
        while self.base_path.join(&filename).exists() {
            attempt += 1;
            filename = format!("{millis}-{attempt}-{base_name}");
        }

        tokio::fs::write(self.base_path.join(&filename), &data).await?;
        Ok(format!("{PHOTO_URL_PREFIX}{filename}"))
    }

    /// Best-effort removal of a previously stored photo. An empty reference,
    /// a reference outside the upload area, or an already-absent file is a
    /// no-op; deletion failures are logged and swallowed so they never fail
    /// the record operation that triggered the cleanup.
    pub async fn remove(&self, reference: &str) {
        let Some(path) = self.resolve(reference) else {
            return;
        };
        if !path.exists() {
            return;
        }
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!(reference = %reference, error = %e, "Failed to remove photo file");
        }
    }

    /// Read a stored photo's bytes for serving.
    pub async fn read(&self, filename: &str) -> Result<Bytes, PhotoStoreError> {
        if !is_safe_filename(filename) {
            return Err(PhotoStoreError::NotFound(filename.to_string()));
        }
        let path = self.base_path.join(filename);
        if !path.exists() {
            return Err(PhotoStoreError::NotFound(filename.to_string()));
        }
        let data = tokio::fs::read(&path).await?;
        Ok(Bytes::from(data))
    }

    /// Map a `/uploads/<filename>` reference back to its on-disk path.
    fn resolve(&self, reference: &str) -> Option<PathBuf> {
        let filename = reference.strip_prefix(PHOTO_URL_PREFIX)?;
        if !is_safe_filename(filename) {
            return None;
        }
        Some(self.base_path.join(filename))
    }
}

/// Keep only the final path component of the client-supplied filename so
/// separators and parent references never reach the upload directory.
fn sanitize_name(original_name: &str) -> String {
    let name = original_name.rsplit(['/', '\\']).next().unwrap_or_default();
    if name.is_empty() || name == "." || name == ".." {
        "photo".to_string()
    } else {
        name.to_string()
    }
}

fn is_safe_filename(filename: &str) -> bool {
    !filename.is_empty()
        && !filename.contains('/')
        && !filename.contains('\\')
        && filename != "."
        && filename != ".."
}
