//! On-disk storage for uploaded images and multipart form parsing.
//!
//! Files land in `{root}/{kind}/{millis}-{random}{.ext}`; the returned path
//! is relative to the root so it can be stored in the database and served
//! under `/uploads`.

use std::collections::HashMap;
use std::path::PathBuf;

use axum::body::Bytes;
use axum::extract::Multipart;
use rand::Rng;
use stay_core::upload::{randomized_filename, UploadKind, RANDOM_SUFFIX_BOUND};

use crate::error::{AppError, AppResult};

/// A file part pulled out of a multipart body.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Text fields plus at most one file from a multipart body.
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub file: Option<UploadedFile>,
}

impl MultipartForm {
    /// Consume a multipart body, keeping the file found under `file_field`.
    ///
    /// Empty file parts (a form submitted without choosing a file) are
    /// treated as absent. Other file parts are ignored.
    pub async fn read(mut multipart: Multipart, file_field: &str) -> AppResult<Self> {
        let mut form = MultipartForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();
            if name == file_field {
                let file_name = field.file_name().unwrap_or("").to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if !data.is_empty() {
                    form.file = Some(UploadedFile {
                        file_name,
                        content_type,
                        data,
                    });
                }
            } else if field.file_name().is_none() {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.fields.insert(name, text);
            }
        }

        Ok(form)
    }

    /// Text field value, if present.
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    /// First present value among several accepted field names.
    pub fn text_any(&self, names: &[&str]) -> Option<String> {
        names.iter().find_map(|n| self.text(n))
    }
}

/// Writes and removes uploaded files under a root directory.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Check `file` against the policy for `kind` and write it to disk.
    ///
    /// Returns the stored path relative to the root, e.g.
    /// `avatars/1717171717171-123456789.png`.
    pub async fn save(&self, kind: UploadKind, file: &UploadedFile) -> AppResult<String> {
        kind.check(file.content_type.as_deref(), file.data.len())?;

        let dir = self.root.join(kind.dir_name());
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

        let suffix = rand::rng().random_range(0..RANDOM_SUFFIX_BOUND);
        let stored = randomized_filename(
            &file.file_name,
            chrono::Utc::now().timestamp_millis(),
            suffix,
        );
        tokio::fs::write(dir.join(&stored), &file.data)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

        let relative = format!("{}/{stored}", kind.dir_name());
        tracing::debug!(path = %relative, bytes = file.data.len(), "Stored upload");
        Ok(relative)
    }

    /// Pass `result` through, deleting the freshly stored file when it is an
    /// error so a failed write leaves nothing behind.
    pub async fn discard_on_error<T>(
        &self,
        stored: Option<&str>,
        result: AppResult<T>,
    ) -> AppResult<T> {
        if result.is_err() {
            if let Some(path) = stored {
                self.remove(path).await;
            }
        }
        result
    }

    /// Delete a previously stored file. Failures are logged, never returned.
    pub async fn remove(&self, relative: &str) {
        match tokio::fs::remove_file(self.root.join(relative)).await {
            Ok(()) => tracing::debug!(path = %relative, "Removed upload"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %relative, error = %e, "Failed to remove upload"),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use stay_core::error::CoreError;
    use stay_core::upload::MAX_AVATAR_BYTES;

    use super::*;

    fn file(name: &str, mime: &str, data: &[u8]) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            content_type: Some(mime.to_string()),
            data: Bytes::copy_from_slice(data),
        }
    }

    #[tokio::test]
    async fn test_save_writes_under_kind_directory() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = UploadStore::new(tmp.path());

        let relative = store
            .save(UploadKind::Promotion, &file("summer.PNG", "image/png", b"png-bytes"))
            .await
            .expect("save should succeed");

        assert!(relative.starts_with("promotions/"));
        assert!(relative.ends_with(".png"));
        let written = tokio::fs::read(tmp.path().join(&relative)).await.expect("file exists");
        assert_eq!(written, b"png-bytes");
    }

    #[tokio::test]
    async fn test_two_saves_do_not_collide() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = UploadStore::new(tmp.path());
        let upload = file("room.jpg", "image/jpeg", b"x");

        let a = store.save(UploadKind::Nomer, &upload).await.expect("first save");
        let b = store.save(UploadKind::Nomer, &upload).await.expect("second save");
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_avatar_policy_is_enforced_before_writing() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = UploadStore::new(tmp.path());

        let gif = file("me.gif", "image/gif", b"gif");
        assert_matches!(
            store.save(UploadKind::Avatar, &gif).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );

        let huge = UploadedFile {
            data: Bytes::from(vec![0u8; MAX_AVATAR_BYTES + 1]),
            ..file("me.png", "image/png", b"")
        };
        assert_matches!(
            store.save(UploadKind::Avatar, &huge).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );

        assert!(
            !tmp.path().join("avatars").exists(),
            "rejected uploads must not create files"
        );
    }

    #[tokio::test]
    async fn test_remove_is_best_effort() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = UploadStore::new(tmp.path());
        let relative = store
            .save(UploadKind::Avatar, &file("me.jpg", "image/jpeg", b"jpg"))
            .await
            .expect("save");

        store.remove(&relative).await;
        assert!(!tmp.path().join(&relative).exists());

        // Removing twice must not panic or error.
        store.remove(&relative).await;
    }

    #[tokio::test]
    async fn test_discard_on_error_keeps_file_on_success() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = UploadStore::new(tmp.path());
        let relative = store
            .save(UploadKind::Nomer, &file("room.png", "image/png", b"png"))
            .await
            .expect("save");

        let ok: AppResult<u8> = store.discard_on_error(Some(&relative), Ok(1)).await;
        assert_eq!(ok.expect("passes through"), 1);
        assert!(tmp.path().join(&relative).exists());

        let failed: AppResult<u8> = store
            .discard_on_error(Some(&relative), Err(AppError::BadRequest("nope".into())))
            .await;
        assert_matches!(failed, Err(AppError::BadRequest(_)));
        assert!(!tmp.path().join(&relative).exists());
    }
}
