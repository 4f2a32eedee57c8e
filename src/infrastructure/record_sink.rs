//! Record sink
//!
//! Only knows how to append one finished `CaseRecord`; never reads back.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::CaseRecord;

#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn insert_one(&self, record: &CaseRecord) -> AppResult<()>;

    /// Explicit teardown at run end
    async fn close(&self) -> AppResult<()> {
        Ok(())
    }
}

/// One JSON document per line
pub struct JsonlSink {
    path: PathBuf,
    written: AtomicUsize,
}

impl JsonlSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            written: AtomicUsize::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordSink for JsonlSink {
    async fn insert_one(&self, record: &CaseRecord) -> AppResult<()> {
        let mut line = serde_json::to_string(record).map_err(|e| {
            AppError::io(self.path.display().to_string(), std::io::Error::other(e))
        })?;
        line.push('\n');

        debug!(
            "appending record cnr={:?} to {}",
            record.details.cnr_number,
            self.path.display()
        );

        let io_err = |e| AppError::io(self.path.display().to_string(), e);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(io_err)?;
        file.write_all(line.as_bytes()).await.map_err(io_err)?;
        file.flush().await.map_err(io_err)?;

        self.written.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn close(&self) -> AppResult<()> {
        info!(
            "record sink closed: {} records in {}",
            self.written.load(Ordering::SeqCst),
            self.path.display()
        );
        Ok(())
    }
}
