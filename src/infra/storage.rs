//! Avatar storage - where uploaded doctor pictures end up.
//!
//! [`DiskStorage`] writes files under the configured upload directory,
//! which the router serves back under `/uploads`.

use std::path::PathBuf;

use async_trait::async_trait;
use axum::body::Bytes;
use uuid::Uuid;

use crate::config::{Config, UPLOADS_ROUTE};
use crate::domain::Avatar;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// A file received from a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// File extension derived from the mime type, falling back to the
    /// original file name.
    pub fn extension(&self) -> String {
        match self.content_type.as_str() {
            "image/png" => "png".to_string(),
            "image/jpeg" | "image/jpg" => "jpg".to_string(),
            "image/webp" => "webp".to_string(),
            _ => self
                .file_name
                .as_deref()
                .and_then(|name| name.rsplit_once('.'))
                .map(|(_, ext)| ext.to_ascii_lowercase())
                .unwrap_or_else(|| "bin".to_string()),
        }
    }
}

/// Object storage collaborator for avatars.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AvatarStorage: Send + Sync {
    /// Store the file and return its public reference.
    async fn upload(&self, file: UploadedFile) -> AppResult<Avatar>;

    /// Delete a stored avatar. Removing one that is already gone succeeds.
    async fn remove(&self, public_id: &str) -> AppResult<()>;
}

/// Stores avatars on the local filesystem.
pub struct DiskStorage {
    root: PathBuf,
    public_base_url: String,
}

impl DiskStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.upload_dir, &config.public_base_url)
    }
}

#[async_trait]
impl AvatarStorage for DiskStorage {
    async fn upload(&self, file: UploadedFile) -> AppResult<Avatar> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::Upload(format!("create {}: {}", self.root.display(), e)))?;

        let public_id = format!("{}.{}", Uuid::new_v4(), file.extension());
        let path = self.root.join(&public_id);

        tokio::fs::write(&path, &file.bytes)
            .await
            .map_err(|e| AppError::Upload(format!("write {}: {}", path.display(), e)))?;

        tracing::debug!(public_id = %public_id, size = file.bytes.len(), "Avatar stored");

        Ok(Avatar {
            url: format!("{}{}/{}", self.public_base_url, UPLOADS_ROUTE, public_id),
            public_id,
        })
    }

    async fn remove(&self, public_id: &str) -> AppResult<()> {
        let path = self.root.join(public_id);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Upload(format!("remove {}: {}", path.display(), e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png() -> UploadedFile {
        UploadedFile {
            file_name: Some("portrait.PNG".into()),
            content_type: "image/png".into(),
            bytes: Bytes::from_static(b"\x89PNG\r\n\x1a\n"),
        }
    }

    #[test]
    fn test_extension_from_mime_or_name() {
        assert_eq!(png().extension(), "png");

        let file = UploadedFile {
            file_name: Some("scan.TIFF".into()),
            content_type: "application/octet-stream".into(),
            bytes: Bytes::new(),
        };
        assert_eq!(file.extension(), "tiff");

        let file = UploadedFile {
            file_name: None,
            content_type: "application/octet-stream".into(),
            bytes: Bytes::new(),
        };
        assert_eq!(file.extension(), "bin");
    }

    #[tokio::test]
    async fn test_disk_storage_writes_file() {
        let root = std::env::temp_dir().join(format!("avatars-{}", Uuid::new_v4()));
        let storage = DiskStorage::new(&root, "http://localhost:4000/");

        let avatar = storage.upload(png()).await.unwrap();

        assert!(avatar.public_id.ends_with(".png"));
        assert_eq!(
            avatar.url,
            format!("http://localhost:4000/uploads/{}", avatar.public_id)
        );
        let written = tokio::fs::read(root.join(&avatar.public_id)).await.unwrap();
        assert_eq!(written, b"\x89PNG\r\n\x1a\n");

        storage.remove(&avatar.public_id).await.unwrap();
        assert!(!root.join(&avatar.public_id).exists());
        storage.remove(&avatar.public_id).await.unwrap();

        tokio::fs::remove_dir_all(&root).await.unwrap();
    }
}
