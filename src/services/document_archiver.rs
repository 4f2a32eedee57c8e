//! Document archiver - business capability layer
//!
//! download → stage → upload → delete stage, one document at a time.
//! The staged file never outlives a call to `archive`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::StreamExt;
use reqwest::{StatusCode, Url};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::session_bridge::HttpIdentity;
use crate::error::{AppError, AppResult};
use crate::infrastructure::BlobStore;

#[derive(Debug, thiserror::Error)]
#[error("HTTP {0}")]
struct HttpStatus(StatusCode);

/// Uniquely named local file, removed on every exit path
struct StagedFile {
    path: PathBuf,
    blob_name: String,
    removed: bool,
}

impl StagedFile {
    fn new(dir: &Path, extension: &str) -> Self {
        let blob_name = format!("{}.{}", Uuid::new_v4().simple(), extension);
        Self {
            path: dir.join(&blob_name),
            blob_name,
            removed: false,
        }
    }

    async fn remove(&mut self) {
        match fs::remove_file(&self.path).await {
            Ok(()) => debug!("removed staged file {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("failed to remove staged file {}: {}", self.path.display(), e),
        }
        self.removed = true;
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        // Cancellation or panic mid-archive
        if !self.removed {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

/// Document archiver
///
/// Responsibilities:
/// - fetch one document under a bridged HTTP identity
/// - put it in durable storage under a collision-resistant name
/// - leave nothing behind in the staging directory
pub struct DocumentArchiver {
    store: Arc<dyn BlobStore>,
    staging_dir: PathBuf,
}

impl DocumentArchiver {
    pub fn new(store: Arc<dyn BlobStore>, staging_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            staging_dir: staging_dir.into(),
        }
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Archive the document at `locator`; returns the durable access URL.
    ///
    /// No retry: a failed download means the document is unavailable.
    pub async fn archive(
        &self,
        locator: &Url,
        identity: &HttpIdentity,
        context: &str,
    ) -> AppResult<String> {
        fs::create_dir_all(&self.staging_dir)
            .await
            .map_err(|e| AppError::io(self.staging_dir.display().to_string(), e))?;

        let mut staged = StagedFile::new(&self.staging_dir, "pdf");
        let result = self.download_and_upload(&staged, locator, identity).await;
        staged.remove().await;

        match &result {
            Ok(url) => info!("{} 📄 document archived: {}", context, url),
            Err(e) => warn!("{} document {} not archived: {}", context, locator, e),
        }
        result
    }

    async fn download_and_upload(
        &self,
        staged: &StagedFile,
        locator: &Url,
        identity: &HttpIdentity,
    ) -> AppResult<String> {
        self.download(&staged.path, locator, identity).await?;

        let bytes = fs::read(&staged.path)
            .await
            .map_err(|e| AppError::io(staged.path.display().to_string(), e))?;

        if self.store.exists(&staged.blob_name).await? {
            self.store.delete(&staged.blob_name).await?;
        }
        self.store.put(&staged.blob_name, bytes, true).await
    }

    async fn download(&self, path: &Path, locator: &Url, identity: &HttpIdentity) -> AppResult<()> {
        let response = identity
            .client()
            .get(locator.clone())
            .send()
            .await
            .map_err(|e| AppError::transport(locator.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::transport(locator.as_str(), HttpStatus(status)));
        }

        let io_err = |e| AppError::io(path.display().to_string(), e);
        let mut file = fs::File::create(path).await.map_err(io_err)?;
        let mut stream = response.bytes_stream();
        let mut written = 0usize;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| AppError::transport(locator.as_str(), e))?;
            file.write_all(&chunk).await.map_err(io_err)?;
            written += chunk.len();
        }
        file.flush().await.map_err(io_err)?;

        debug!("downloaded {} bytes from {}", written, locator);
        Ok(())
    }
}
