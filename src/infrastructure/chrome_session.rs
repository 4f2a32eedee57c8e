//! Chrome session - infrastructure layer
//!
//! Holds the single `Page` and exposes it as a `NavigableSession`.
//! Clicks, selections and input go through injected JavaScript, the same way
//! the portal's own handlers are triggered.

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::element::Element;
use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::debug;

use super::session::{Condition, NavigableSession, SessionCookie};
use crate::error::{SessionError, SessionResult};

/// Chrome-backed navigable session
///
/// Responsibilities:
/// - sole owner of the `Page`
/// - knows nothing about cases, orders or panels
pub struct ChromeSession {
    page: Page,
    navigation_timeout: Duration,
    poll_interval: Duration,
}

impl ChromeSession {
    pub fn new(page: Page, navigation_timeout: Duration) -> Self {
        Self {
            page,
            navigation_timeout,
            poll_interval: Duration::from_millis(250),
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Evaluate an expression; `undefined` comes back as `null`
    pub async fn eval(&self, js_code: impl Into<String>) -> SessionResult<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await?;
        Ok(result.value().cloned().unwrap_or(JsonValue::Null))
    }

    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> SessionResult<T> {
        let value = self.eval(js_code).await?;
        serde_json::from_value(value).map_err(SessionError::driver)
    }

    /// Run `function() { ... }` with `this` bound to the element
    async fn call_on(&self, element: &Element, function: &str) -> SessionResult<JsonValue> {
        let returns = element.call_js_fn(function, false).await?;
        Ok(returns.result.value.unwrap_or(JsonValue::Null))
    }

    async fn settle_navigation(&self) {
        // Ajax-driven back navigations never fire a load event
        if tokio::time::timeout(self.navigation_timeout, self.page.wait_for_navigation())
            .await
            .is_err()
        {
            debug!("navigation did not settle within {:?}", self.navigation_timeout);
        }
    }
}

#[async_trait]
impl NavigableSession for ChromeSession {
    type Element = Element;

    async fn open(&self, url: &str) -> SessionResult<()> {
        debug!("opening {}", url);
        self.page.goto(url).await?;
        self.settle_navigation().await;
        Ok(())
    }

    async fn find_all(&self, selector: &str) -> SessionResult<Vec<Element>> {
        Ok(self.page.find_elements(selector).await?)
    }

    async fn find_all_within(&self, parent: &Element, selector: &str) -> SessionResult<Vec<Element>> {
        Ok(parent.find_elements(selector).await?)
    }

    async fn text(&self, element: &Element) -> SessionResult<String> {
        Ok(element.inner_text().await?.unwrap_or_default())
    }

    async fn attribute(&self, element: &Element, name: &str) -> SessionResult<Option<String>> {
        Ok(element.attribute(name).await?)
    }

    async fn click(&self, element: &Element) -> SessionResult<()> {
        self.call_on(element, "function() { this.click(); }").await?;
        Ok(())
    }

    async fn scroll_into_view(&self, element: &Element) -> SessionResult<()> {
        self.call_on(element, "function() { this.scrollIntoView(true); }")
            .await?;
        Ok(())
    }

    async fn select_by_text(&self, element: &Element, text: &str) -> SessionResult<bool> {
        let selected = self.call_on(element, &select_option_script(text)).await?;
        Ok(selected.as_bool().unwrap_or(false))
    }

    async fn fill(&self, element: &Element, text: &str) -> SessionResult<()> {
        self.call_on(element, &fill_script(text)).await?;
        Ok(())
    }

    async fn execute_script(&self, code: &str) -> SessionResult<JsonValue> {
        self.eval(code).await
    }

    async fn screenshot(&self, element: &Element) -> SessionResult<Vec<u8>> {
        Ok(element.screenshot(CaptureScreenshotFormat::Png).await?)
    }

    async fn cookies(&self) -> SessionResult<Vec<SessionCookie>> {
        let cookies = self.page.get_cookies().await?;
        Ok(cookies
            .into_iter()
            .map(|c| SessionCookie {
                name: c.name,
                value: c.value,
            })
            .collect())
    }

    async fn back(&self) -> SessionResult<()> {
        self.eval("window.history.back()").await?;
        self.settle_navigation().await;
        Ok(())
    }

    async fn check(&self, condition: &Condition) -> SessionResult<bool> {
        self.eval_as(condition_script(condition)).await
    }

    fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}

fn js_string(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

fn select_option_script(text: &str) -> String {
    format!(
        r#"function() {{
            const wanted = {};
            const option = Array.from(this.options).find(o => o.text.trim() === wanted);
            if (!option) return false;
            this.value = option.value;
            this.dispatchEvent(new Event('change', {{ bubbles: true }}));
            return true;
        }}"#,
        js_string(text)
    )
}

fn fill_script(text: &str) -> String {
    format!(
        r#"function() {{
            this.value = {};
            this.dispatchEvent(new Event('input', {{ bubbles: true }}));
            this.dispatchEvent(new Event('change', {{ bubbles: true }}));
        }}"#,
        js_string(text)
    )
}

fn condition_script(condition: &Condition) -> String {
    let mode = match condition {
        Condition::Present(_) => "present",
        Condition::Visible(_) => "visible",
        Condition::Clickable(_) => "clickable",
        Condition::Invisible(_) => "invisible",
    };
    format!(
        r#"(() => {{
            const el = document.querySelector({});
            const mode = "{}";
            if (!el) return mode === "invisible";
            if (mode === "present") return true;
            const style = window.getComputedStyle(el);
            const shown = style.display !== "none"
                && style.visibility !== "hidden"
                && el.getClientRects().length > 0;
            if (mode === "invisible") return !shown;
            if (mode === "visible") return shown;
            return shown && !el.disabled;
        }})()"#,
        js_string(condition.selector()),
        mode
    )
}
