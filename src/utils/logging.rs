//! Logging
//!
//! Subscriber setup plus the banner helpers used by the orchestrator.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::models::SearchContext;

pub const LOG_FILE_NAME: &str = "scraper.log";

/// Stdout plus `<log_dir>/scraper.log`; `RUST_LOG` overrides the default `info`
pub fn init(log_dir: &Path) -> Result<()> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("cannot create log directory {}", log_dir.display()))?;
    let log_path = log_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("cannot open log file {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init()
        .context("tracing subscriber already installed")?;

    Ok(())
}

pub fn log_startup(total_passes: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 scraper started - {} search passes planned", total_passes);
    info!(
        "started at {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
}

pub fn log_pass_start(pass_num: usize, total: usize, search: &SearchContext) {
    info!("\n{}", "=".repeat(60));
    info!("📦 pass {}/{}: {}", pass_num, total, search);
    info!("{}", "=".repeat(60));
}

/// Truncate long text for log lines
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
