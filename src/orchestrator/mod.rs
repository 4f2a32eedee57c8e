//! Orchestration layer
//!
//! ```text
//! run_orchestrator   (Vec<SearchContext>)
//!     ↓
//! search_controller  (one pass: form, CAPTCHA, result list)
//!     ↓
//! workflow::CaseExtractor (one case)
//!     ↓
//! services (bridge / archiver / panels)
//!     ↓
//! infrastructure (session, OCR, blob store, sink)
//! ```
//!
//! Only this layer knows about passes; nothing below it iterates cases.

pub mod run_orchestrator;
pub mod search_controller;

pub use run_orchestrator::{RunOrchestrator, RunStats};
pub use search_controller::{PassStats, SearchController, SubmitOutcome};
