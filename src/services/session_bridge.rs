//! Session bridge - business capability layer
//!
//! Carries the interactive session's cookies over to a plain HTTP client so
//! binary documents can be fetched out of band under the same identity.

use std::sync::Arc;

use reqwest::cookie::Jar;
use reqwest::{Client, Url};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::infrastructure::{NavigableSession, SessionCookie};

/// Plain HTTP client seeded with the session's cookies
#[derive(Clone)]
pub struct HttpIdentity {
    client: Client,
    cookie_count: usize,
}

impl HttpIdentity {
    /// Cookies are scoped to the portal host, whatever their original domain/path
    pub fn from_cookies(cookies: &[SessionCookie], portal: &Url) -> AppResult<Self> {
        if cookies.is_empty() {
            return Err(AppError::SessionAuth {
                reason: format!("session holds no cookies for {}", portal),
            });
        }

        let jar = Arc::new(Jar::default());
        for cookie in cookies {
            jar.add_cookie_str(&format!("{}={}; Path=/", cookie.name, cookie.value), portal);
        }

        let client = Client::builder()
            .cookie_provider(jar)
            .build()
            .map_err(|e| AppError::transport(portal.as_str(), e))?;

        Ok(Self {
            client,
            cookie_count: cookies.len(),
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn cookie_count(&self) -> usize {
        self.cookie_count
    }
}

/// Read the session's cookies and build an `HttpIdentity`. No side effects on the session.
pub async fn bridge<S: NavigableSession>(session: &S, portal: &Url) -> AppResult<HttpIdentity> {
    let cookies = session.cookies().await?;
    debug!("bridging {} session cookies", cookies.len());
    HttpIdentity::from_cookies(&cookies, portal)
}
