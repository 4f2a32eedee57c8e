//! Run orchestrator - orchestration layer
//!
//! Walks the (case type × role) plan one pass at a time. A pass may fail or
//! even panic; the run always moves on to the next one.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::path::Path;

use futures::FutureExt;
use reqwest::Url;
use tracing::{debug, error, info, warn};

use super::search_controller::{PassStats, SearchController};
use crate::config::Config;
use crate::infrastructure::{NavigableSession, OcrEngine, RecordSink};
use crate::services::DocumentArchiver;
use crate::utils::logging;

/// Totals over the whole run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub passes: usize,
    pub aborted: usize,
    pub cases_visited: usize,
    pub records_persisted: usize,
    pub documents_archived: usize,
}

impl RunStats {
    fn absorb(&mut self, pass: &PassStats) {
        self.cases_visited += pass.cases_visited;
        self.records_persisted += pass.records_persisted;
        self.documents_archived += pass.documents_archived;
    }
}

/// Run orchestrator
///
/// - holds the service handles for the run's lifetime
/// - only schedules passes and counts; no portal knowledge
pub struct RunOrchestrator<'a, S: NavigableSession> {
    session: &'a S,
    ocr: &'a dyn OcrEngine,
    sink: &'a dyn RecordSink,
    archiver: &'a DocumentArchiver,
    config: &'a Config,
    portal: Url,
}

impl<'a, S: NavigableSession> RunOrchestrator<'a, S> {
    pub fn new(
        session: &'a S,
        ocr: &'a dyn OcrEngine,
        sink: &'a dyn RecordSink,
        archiver: &'a DocumentArchiver,
        config: &'a Config,
        portal: Url,
    ) -> Self {
        Self {
            session,
            ocr,
            sink,
            archiver,
            config,
            portal,
        }
    }

    pub async fn run(&self) -> RunStats {
        let plan = self.config.search_contexts();
        let total = plan.len();
        let mut stats = RunStats::default();

        logging::log_startup(total);

        let controller = SearchController::new(
            self.session,
            self.ocr,
            self.sink,
            self.archiver,
            self.config,
            &self.portal,
        );

        for (index, search) in plan.iter().enumerate() {
            logging::log_pass_start(index + 1, total, search);
            stats.passes += 1;

            let outcome = AssertUnwindSafe(controller.run_pass(search))
                .catch_unwind()
                .await;

            match outcome {
                Ok(Ok(pass)) => {
                    info!(
                        "[{}] ✓ pass done: {}/{} cases, {} persisted, {} documents",
                        search,
                        pass.cases_visited,
                        pass.reported_total,
                        pass.records_persisted,
                        pass.documents_archived
                    );
                    stats.absorb(&pass);
                }
                Ok(Err(e)) => {
                    error!("[{}] ❌ pass aborted: {}", search, e);
                    stats.aborted += 1;
                }
                Err(panic) => {
                    error!("[{}] ❌ pass panicked: {}", search, panic_message(&*panic));
                    stats.aborted += 1;
                }
            }

            remove_captcha(&self.config.captcha_path).await;
        }

        log_final_stats(&stats);
        stats
    }
}

/// The screenshot never outlives its pass
async fn remove_captcha(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!("removed {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("could not remove {}: {}", path.display(), e),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

fn log_final_stats(stats: &RunStats) {
    info!("\n{}", "=".repeat(60));
    info!("📊 run finished");
    info!(
        "finished at {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ passes completed: {}/{}", stats.passes - stats.aborted, stats.passes);
    info!("❌ passes aborted: {}", stats.aborted);
    info!("📄 cases visited: {}", stats.cases_visited);
    info!("💾 records persisted: {}", stats.records_persisted);
    info!("☁️ documents archived: {}", stats.documents_archived);
    info!("{}", "=".repeat(60));
}
