//! Navigable session - infrastructure layer
//!
//! The capability surface the pipeline needs from an interactive browser
//! session. Element handles are ephemeral: any navigation (opening a case,
//! going back) may invalidate them, so callers re-query after every
//! navigation instead of caching handles.

use std::fmt::Display;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use super::wait::poll_until;
use crate::error::{SessionError, SessionResult};

/// A DOM condition to wait for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Present(String),
    Visible(String),
    Clickable(String),
    /// Absent or hidden
    Invisible(String),
}

impl Condition {
    pub fn selector(&self) -> &str {
        match self {
            Condition::Present(s)
            | Condition::Visible(s)
            | Condition::Clickable(s)
            | Condition::Invisible(s) => s,
        }
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::Present(s) => write!(f, "presence of {s}"),
            Condition::Visible(s) => write!(f, "visibility of {s}"),
            Condition::Clickable(s) => write!(f, "clickability of {s}"),
            Condition::Invisible(s) => write!(f, "invisibility of {s}"),
        }
    }
}

/// Name/value pair held by the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
}

#[async_trait]
pub trait NavigableSession: Send + Sync {
    /// Driver-specific element handle
    type Element: Send + Sync;

    async fn open(&self, url: &str) -> SessionResult<()>;

    async fn find_all(&self, selector: &str) -> SessionResult<Vec<Self::Element>>;

    async fn find_all_within(
        &self,
        parent: &Self::Element,
        selector: &str,
    ) -> SessionResult<Vec<Self::Element>>;

    async fn text(&self, element: &Self::Element) -> SessionResult<String>;

    async fn attribute(&self, element: &Self::Element, name: &str) -> SessionResult<Option<String>>;

    /// Script-driven click; works on elements hidden behind overlays
    async fn click(&self, element: &Self::Element) -> SessionResult<()>;

    async fn scroll_into_view(&self, element: &Self::Element) -> SessionResult<()>;

    /// Pick a `<select>` option by its visible text. `Ok(false)` if no such option (yet).
    async fn select_by_text(&self, element: &Self::Element, text: &str) -> SessionResult<bool>;

    /// Replace an input's value
    async fn fill(&self, element: &Self::Element, text: &str) -> SessionResult<()>;

    async fn execute_script(&self, code: &str) -> SessionResult<JsonValue>;

    /// PNG bytes of the element
    async fn screenshot(&self, element: &Self::Element) -> SessionResult<Vec<u8>>;

    async fn cookies(&self) -> SessionResult<Vec<SessionCookie>>;

    async fn back(&self) -> SessionResult<()>;

    /// Evaluate a condition once
    async fn check(&self, condition: &Condition) -> SessionResult<bool>;

    fn poll_interval(&self) -> Duration {
        Duration::from_millis(250)
    }

    async fn find_one(&self, selector: &str) -> SessionResult<Self::Element> {
        self.find_all(selector)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| SessionError::NotFound {
                selector: selector.to_string(),
            })
    }

    async fn find_within(
        &self,
        parent: &Self::Element,
        selector: &str,
    ) -> SessionResult<Self::Element> {
        self.find_all_within(parent, selector)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| SessionError::NotFound {
                selector: selector.to_string(),
            })
    }

    /// Wait, bounded by `timeout`, for `condition` to hold.
    ///
    /// Probe errors count as "not yet": a page mid-navigation routinely fails queries.
    async fn wait_until(&self, condition: &Condition, timeout: Duration) -> SessionResult<()> {
        let reached = poll_until(timeout, self.poll_interval(), || async move {
            matches!(self.check(condition).await, Ok(true)).then_some(())
        })
        .await;

        reached.ok_or_else(|| SessionError::Timeout {
            condition: condition.to_string(),
            timeout,
        })
    }

    /// Wait for `selector` to be present and return the first match
    async fn wait_for(&self, selector: &str, timeout: Duration) -> SessionResult<Self::Element> {
        self.wait_until(&Condition::Present(selector.to_string()), timeout)
            .await?;
        self.find_one(selector).await
    }

    /// Trimmed text of every element inside `parent` matching `selector`
    async fn texts_within(
        &self,
        parent: &Self::Element,
        selector: &str,
    ) -> SessionResult<Vec<String>> {
        let mut texts = Vec::new();
        for element in self.find_all_within(parent, selector).await? {
            texts.push(self.text(&element).await?.trim().to_string());
        }
        Ok(texts)
    }
}
