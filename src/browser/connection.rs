use anyhow::Result;
use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

/// Attach to a running browser through its remote-debugging port
///
/// Reuses an open tab already on the portal host, otherwise opens a new one.
pub async fn attach_to_browser(port: u16, start_url: &str) -> Result<(Browser, Page)> {
    let browser_url = format!("http://localhost:{}", port);
    info!("connecting to browser at {}", browser_url);

    let (browser, mut handler) = Browser::connect(&browser_url).await.map_err(|e| {
        error!("browser connection failed: {}", e);
        e
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

    // Let the target list settle
    sleep(tokio::time::Duration::from_millis(300)).await;

    let host = reqwest::Url::parse(start_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string));

    let pages = browser.pages().await?;
    debug!("browser has {} open pages", pages.len());

    if let Some(host) = host {
        for page in pages.iter() {
            if let Ok(Some(url)) = page.url().await {
                if url.contains(&host) {
                    info!("✓ reusing open tab {}", url);
                    return Ok((browser, page.clone()));
                }
            }
        }
    }

    let page = browser.new_page(start_url).await.map_err(|e| {
        error!("could not open {}: {}", start_url, e);
        e
    })?;
    info!("opened {}", start_url);

    Ok((browser, page))
}
