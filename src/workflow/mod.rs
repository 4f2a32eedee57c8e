//! Workflow layer
//!
//! What happens to one case once its detail page is open.

pub mod case_ctx;
pub mod case_extractor;
pub mod sections;

pub use case_ctx::CaseCtx;
pub use case_extractor::CaseExtractor;
