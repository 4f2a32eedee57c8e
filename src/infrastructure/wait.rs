//! Bounded polling
//!
//! Every suspension point in the pipeline goes through here, so a stuck
//! condition can never hang the run.

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};

/// Poll `probe` until it yields `Some`, or give up after `timeout`.
///
/// The probe runs at least once, even with a zero timeout.
pub async fn poll_until<T, F, Fut>(timeout: Duration, interval: Duration, mut probe: F) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(value) = probe().await {
            return Some(value);
        }
        let now = Instant::now();
        if now >= deadline {
            return None;
        }
        sleep(interval.min(deadline - now)).await;
    }
}
