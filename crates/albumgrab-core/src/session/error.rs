//! Error type for browsing-session operations.

use super::WaitState;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// An expected element did not reach the wanted state in time.
    #[error("timed out after {waited:?} waiting for `{selector}` to be {state}")]
    Timeout {
        selector: String,
        state: WaitState,
        waited: Duration,
    },
    /// The selector matched nothing (or fewer elements than the handle's index).
    #[error("no element matches `{selector}` at index {index}")]
    ElementNotFound { selector: String, index: usize },
    /// libcurl reported a transport failure (DNS, connect, TLS, timeout).
    #[error("transport: {0}")]
    Transport(#[from] curl::Error),
    /// A GET kept redirecting past the hop limit.
    #[error("more than {limit} redirects fetching {url}")]
    TooManyRedirects { url: String, limit: usize },
    /// The browser or DevTools connection failed.
    #[error("browser: {0:#}")]
    Browser(anyhow::Error),
}

impl SessionError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, SessionError::Timeout { .. })
    }
}
