use std::path::Path;

use anyhow::Result;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

/// Launch a headless browser and open `start_url`
pub async fn launch_headless_browser(
    executable: Option<&str>,
    start_url: &str,
) -> Result<(Browser, Page)> {
    info!("🚀 launching headless browser...");

    let mut builder = BrowserConfig::builder().new_headless_mode().args(vec![
        "--disable-gpu",
        "--no-sandbox",
        "--disable-dev-shm-usage",
    ]);
    if let Some(path) = executable {
        debug!("browser executable: {}", path);
        builder = builder.chrome_executable(Path::new(path));
    }
    let config = builder.build().map_err(|e| {
        error!("invalid browser configuration: {}", e);
        anyhow::anyhow!("invalid browser configuration: {}", e)
    })?;

    let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
        error!("browser launch failed: {}", e);
        anyhow::anyhow!("browser launch failed: {}", e)
    })?;

    // Drain CDP events in the background
    tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            // Undecodable events are not fatal
            if let Err(e) = event {
                debug!("cdp handler: {}", e);
            }
        }
    });

    sleep(tokio::time::Duration::from_millis(300)).await;

    let page = browser.new_page(start_url).await.map_err(|e| {
        error!("could not open {}: {}", start_url, e);
        anyhow::anyhow!("could not open {}: {}", start_url, e)
    })?;

    info!("✅ headless browser on {}", start_url);
    Ok((browser, page))
}
