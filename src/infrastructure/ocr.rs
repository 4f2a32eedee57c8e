//! OCR engine
//!
//! `recognize_text(image) -> text`. Production uses the tesseract CLI.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::error::{AppError, AppResult};

#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize_text(&self, image: &[u8]) -> AppResult<String>;
}

/// Pipes the image through `tesseract stdin stdout`
pub struct TesseractOcr {
    command: String,
    psm: Option<u8>,
}

impl TesseractOcr {
    pub fn new(command: impl Into<String>, psm: Option<u8>) -> Self {
        Self {
            command: command.into(),
            psm,
        }
    }

    fn args(&self) -> Vec<String> {
        let mut args = vec!["stdin".to_string(), "stdout".to_string()];
        if let Some(psm) = self.psm {
            args.push("--psm".to_string());
            args.push(psm.to_string());
        }
        args
    }
}

#[async_trait]
impl OcrEngine for TesseractOcr {
    async fn recognize_text(&self, image: &[u8]) -> AppResult<String> {
        let ocr_failed = |e: std::io::Error| AppError::Ocr {
            source: Box::new(e),
        };

        let mut child = Command::new(&self.command)
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(ocr_failed)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(image).await.map_err(ocr_failed)?;
        }

        let output = child.wait_with_output().await.map_err(ocr_failed)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AppError::Ocr {
                source: format!("{} exited with {}: {}", self.command, output.status, stderr)
                    .into(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).to_string();
        debug!("OCR raw output: {:?}", text);
        Ok(text)
    }
}

/// OCR output reduced to the characters a CAPTCHA can contain
pub fn normalize_captcha(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}
