//! Browser acquisition
//!
//! Attach over the debug port when one is configured, launch headless otherwise.

mod connection;
mod headless;

use anyhow::Result;
use chromiumoxide::{Browser, Page};

use crate::config::Config;

pub use connection::attach_to_browser;
pub use headless::launch_headless_browser;

pub async fn acquire(config: &Config) -> Result<(Browser, Page)> {
    match config.browser_debug_port {
        Some(port) => attach_to_browser(port, &config.portal_url).await,
        None => {
            launch_headless_browser(config.chrome_executable.as_deref(), &config.portal_url).await
        }
    }
}
