//! Upload storage - Writes uploaded images to disk and hands out public references.
//!
//! A reference is the public path of a stored file (`<prefix>/<name>`). Only references
//! carrying this store's prefix are ever resolved back to a path, so removing an external
//! URL is a no-op rather than an error.

use crate::errors::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

const MAX_NAME_LEN: usize = 96;

/// Directory-backed store for uploaded images.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
    public_prefix: String,
}

impl UploadStore {
    /// Creates a store rooted at `root`, serving files under `public_prefix`.
    ///
    /// # Errors
    /// Returns `Error::Config` when the prefix is not an absolute URL path such as `/uploads`.
    pub fn new(root: impl Into<PathBuf>, public_prefix: &str) -> Result<Self> {
        let trimmed = public_prefix.trim_end_matches('/');
        if !trimmed.starts_with('/') || trimmed.len() < 2 {
            return Err(Error::Config {
                message: format!("Upload prefix must look like '/uploads', got '{public_prefix}'"),
            });
        }
        Ok(Self {
            root: root.into(),
            public_prefix: trimmed.to_string(),
        })
    }

    /// Directory files are written to.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// URL prefix the directory is served under.
    #[must_use]
    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    /// Creates the upload directory if it is missing.
    pub async fn ensure_root(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Stores one uploaded image and returns its public reference.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The content type is not `image/*`
    /// - The file cannot be written
    pub async fn save(&self, original_name: &str, content_type: &str, bytes: &[u8]) -> Result<String> {
        if !content_type.starts_with("image/") {
            return Err(Error::UnsupportedUpload {
                content_type: content_type.to_string(),
            });
        }

        self.ensure_root().await?;
        let stored_name = format!("{}-{}", Uuid::new_v4().simple(), sanitize_file_name(original_name));
        tokio::fs::write(self.root.join(&stored_name), bytes).await?;

        let reference = format!("{}/{stored_name}", self.public_prefix);
        info!("Stored upload '{}' ({} bytes) as {}", original_name, bytes.len(), reference);
        Ok(reference)
    }

    /// Resolves a reference produced by [`save`](Self::save) to its file path.
    #[must_use]
    pub fn local_path(&self, reference: &str) -> Option<PathBuf> {
        let name = reference
            .strip_prefix(self.public_prefix.as_str())?
            .strip_prefix('/')?;
        let is_plain_name = !name.is_empty()
            && !name.contains(['/', '\\'])
            && name != "."
            && name != "..";
        is_plain_name.then(|| self.root.join(name))
    }

    /// Deletes the file behind `reference`.
    ///
    /// Returns `Ok(false)` when the reference is not a local upload or the file is already gone.
    pub async fn remove(&self, reference: &str) -> Result<bool> {
        let Some(path) = self.local_path(reference) else {
            debug!("Not a local upload, leaving it alone: {}", reference);
            return Ok(false);
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!("Removed upload {}", reference);
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Best-effort removal of several references; failures are logged, not returned.
    pub async fn remove_all<'a, I>(&self, references: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        for reference in references {
            if let Err(e) = self.remove(reference).await {
                warn!("Failed to remove upload {}: {}", reference, e);
            }
        }
    }
}

/// Keeps the last path component of a client file name and replaces anything unusual.
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_NAME_LEN)
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}
