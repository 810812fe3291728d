//! Media upload endpoints.
//!
//! Size and count limits are enforced locally before any bytes leave the
//! machine, so an oversized file fails fast instead of burning bandwidth.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use tracing::instrument;

use crate::api::wire::{WireMultiUpload, WireUpload};
use crate::api::{ApiClient, ApiError};
use crate::types::UploadKind;

/// Largest single file the backend accepts.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Most files accepted in one multi-upload.
pub const MAX_UPLOAD_FILES: usize = 5;

/// Typed wrapper over the `/upload` endpoints.
#[derive(Clone)]
pub struct UploadService {
    api: ApiClient,
}

impl UploadService {
    pub(crate) const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    async fn file_part(path: &Path) -> Result<Part, ApiError> {
        let size = tokio::fs::metadata(path).await?.len();
        if size > MAX_UPLOAD_BYTES {
            return Err(ApiError::FileTooLarge {
                size,
                max: MAX_UPLOAD_BYTES,
            });
        }
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_owned(), |name| name.to_string_lossy().into_owned());
        Ok(Part::bytes(bytes).file_name(file_name))
    }

    /// Upload a single file, returning its served URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::FileTooLarge`] before any network traffic when
    /// the file exceeds [`MAX_UPLOAD_BYTES`], or [`ApiError::Io`] if it
    /// cannot be read.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn upload_file(&self, path: &Path, kind: UploadKind) -> Result<String, ApiError> {
        let form = Form::new()
            .part("file", Self::file_part(path).await?)
            .text("type", kind.as_str());
        let response: WireUpload = self.api.upload("/upload", form).await?;
        Ok(response.url)
    }

    /// Upload up to [`MAX_UPLOAD_FILES`] files in one request, returning
    /// their served URLs in order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::TooManyFiles`] or [`ApiError::FileTooLarge`]
    /// before any network traffic when a limit is exceeded.
    #[instrument(skip(self, paths), fields(count = paths.len()))]
    pub async fn upload_files(
        &self,
        paths: &[&Path],
        kind: UploadKind,
    ) -> Result<Vec<String>, ApiError> {
        if paths.len() > MAX_UPLOAD_FILES {
            return Err(ApiError::TooManyFiles {
                count: paths.len(),
                max: MAX_UPLOAD_FILES,
            });
        }

        let mut form = Form::new().text("type", kind.as_str());
        for path in paths {
            form = form.part("files", Self::file_part(path).await?);
        }
        let response: WireMultiUpload = self.api.upload("/upload/multiple", form).await?;
        Ok(response.urls)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::config::ClientConfig;
    use crate::session::SessionStore;

    fn service() -> UploadService {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::new(
            "http://127.0.0.1:9".parse().unwrap(),
            dir.path().join("session.json"),
        );
        let session = SessionStore::open(&config.session_file);
        UploadService::new(ApiClient::new(&config, session).unwrap())
    }

    fn oversized_file(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("huge.mp4");
        let file = std::fs::File::create(&path).unwrap();
        // A sparse file is enough; only the metadata length is checked.
        file.set_len(MAX_UPLOAD_BYTES + 1).unwrap();
        path
    }

    #[tokio::test]
    async fn test_oversized_file_is_rejected_locally() {
        let dir = tempfile::tempdir().unwrap();
        let path = oversized_file(&dir);

        // Port 9 is unroutable; reaching the network would error differently.
        let error = service()
            .upload_file(&path, UploadKind::Video)
            .await
            .unwrap_err();
        match error {
            ApiError::FileTooLarge { size, max } => {
                assert_eq!(size, MAX_UPLOAD_BYTES + 1);
                assert_eq!(max, MAX_UPLOAD_BYTES);
            }
            other => panic!("expected FileTooLarge, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_too_many_files_are_rejected_locally() {
        let paths: Vec<PathBuf> = (0..=MAX_UPLOAD_FILES)
            .map(|i| PathBuf::from(format!("img-{i}.jpg")))
            .collect();
        let refs: Vec<&Path> = paths.iter().map(PathBuf::as_path).collect();

        // The count check fires before the paths are even opened.
        let error = service()
            .upload_files(&refs, UploadKind::Image)
            .await
            .unwrap_err();
        match error {
            ApiError::TooManyFiles { count, max } => {
                assert_eq!(count, MAX_UPLOAD_FILES + 1);
                assert_eq!(max, MAX_UPLOAD_FILES);
            }
            other => panic!("expected TooManyFiles, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_multi_upload_rejects_an_oversized_member() {
        let dir = tempfile::tempdir().unwrap();
        let small = dir.path().join("ok.jpg");
        std::fs::write(&small, b"jpeg-ish").unwrap();
        let huge = oversized_file(&dir);

        let error = service()
            .upload_files(&[small.as_path(), huge.as_path()], UploadKind::Image)
            .await
            .unwrap_err();
        assert!(matches!(error, ApiError::FileTooLarge { .. }));
    }
}
