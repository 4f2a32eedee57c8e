//! # eCourts archiver
//!
//! Extracts case records and their order documents from the eCourts
//! case-status portal and archives them durably.
//!
//! ## Layers
//!
//! ### ① Infrastructure
//! - `infrastructure/` - owns scarce resources, exposes capabilities only
//! - `NavigableSession` / `ChromeSession` - the single browser page
//! - `OcrEngine`, `BlobStore`, `RecordSink` - external collaborators
//!
//! ### ② Services
//! - `services/` - what can be done to one row, panel or document
//! - session bridge, document archiver, panel navigator
//!
//! ### ③ Workflow
//! - `workflow/` - what "one case" means
//! - `CaseExtractor` - every section of an open detail page
//!
//! ### ④ Orchestration
//! - `orchestrator/search_controller` - one (case type × role) pass
//! - `orchestrator/run_orchestrator` - the whole plan, pass by pass

pub mod app;
pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod portal;
pub mod services;
pub mod utils;
pub mod workflow;

pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{CaseRecord, SearchContext};
pub use orchestrator::{RunOrchestrator, RunStats};
