//! Business capability layer
//!
//! Each service describes one thing the pipeline can do to a single row,
//! panel or document. None of them iterate cases.

pub mod document_archiver;
pub mod labels;
pub mod panel_navigator;
pub mod session_bridge;

pub use document_archiver::DocumentArchiver;
pub use panel_navigator::{PanelNavigator, PanelSpec};
pub use session_bridge::{bridge, HttpIdentity};
