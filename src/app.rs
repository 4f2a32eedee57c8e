//! Application lifetime
//!
//! Builds every service handle from `Config`, hands them to the orchestrator
//! and tears them down explicitly when the run ends.

use std::sync::Arc;

use anyhow::{Context, Result};
use chromiumoxide::Browser;
use reqwest::Url;
use tracing::{info, warn};

use crate::browser;
use crate::config::Config;
use crate::infrastructure::{AzureBlobStore, ChromeSession, JsonlSink, RecordSink, TesseractOcr};
use crate::orchestrator::{RunOrchestrator, RunStats};
use crate::services::DocumentArchiver;

/// Application main structure
pub struct App {
    config: Config,
    portal: Url,
    browser: Browser,
    session: ChromeSession,
    ocr: TesseractOcr,
    archiver: DocumentArchiver,
    sink: JsonlSink,
}

impl App {
    pub async fn initialize(config: Config) -> Result<Self> {
        let portal = config.portal_base()?;

        let store = AzureBlobStore::new(&config.blob_container_url, config.blob_sas_token.clone())
            .context("blob storage is not configured")?;
        let archiver = DocumentArchiver::new(Arc::new(store), config.staging_dir.clone());
        let ocr = TesseractOcr::new(config.tesseract_cmd.clone(), config.tesseract_psm);
        let sink = JsonlSink::new(config.records_path.clone());

        let (browser, page) = browser::acquire(&config).await?;
        let session = ChromeSession::new(page, config.timeouts.navigation())
            .with_poll_interval(config.timeouts.poll());

        info!(
            "records → {}, documents staged in {}",
            sink.path().display(),
            archiver.staging_dir().display()
        );

        Ok(Self {
            config,
            portal,
            browser,
            session,
            ocr,
            archiver,
            sink,
        })
    }

    pub async fn run(&self) -> RunStats {
        RunOrchestrator::new(
            &self.session,
            &self.ocr,
            &self.sink,
            &self.archiver,
            &self.config,
            self.portal.clone(),
        )
        .run()
        .await
    }

    /// Close the sink; close the browser only if this process launched it
    pub async fn shutdown(mut self) -> Result<()> {
        self.sink.close().await?;

        if self.config.browser_debug_port.is_none() {
            if let Err(e) = self.browser.close().await {
                warn!("browser did not close cleanly: {}", e);
            }
            let _ = self.browser.wait().await;
        }
        Ok(())
    }
}
