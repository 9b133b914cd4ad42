//! Browsing-session capability surface used by login, the walker and the fetcher.
//!
//! The core never talks to a browser directly; it only depends on these traits.
//! [`ChromeSession`] is the production implementation, tests drive the same code
//! through a scripted fake.

mod chrome;
mod error;
mod http;

pub use chrome::{ChromeSession, LaunchSettings};
pub use error::SessionError;
pub use http::{curl_get, get_with_cookies, HttpResponse, MAX_REDIRECTS};

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// Handle to one DOM element: the `index`-th match of `selector` in document order.
///
/// Holds no browser state, so it stays valid across calls as long as the page
/// keeps the same structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRef {
    pub selector: String,
    pub index: usize,
}

impl ElementRef {
    pub fn new(selector: impl Into<String>, index: usize) -> Self {
        Self {
            selector: selector.into(),
            index,
        }
    }
}

/// Element state a wait can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitState {
    /// Present in the DOM and rendered.
    Visible,
    /// Missing from the DOM or not rendered.
    Hidden,
}

impl fmt::Display for WaitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitState::Visible => write!(f, "visible"),
            WaitState::Hidden => write!(f, "hidden"),
        }
    }
}

/// HTTP GET scoped to the session's authentication state (cookies).
pub trait AuthenticatedHttp {
    /// Issues a GET carrying the session's cookies plus `headers`.
    /// Non-2xx statuses are returned as a response, not as an error.
    fn http_get(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<HttpResponse, SessionError>;
}

/// One interactive page in an authenticated browsing context.
pub trait BrowsingSession: AuthenticatedHttp {
    /// Loads `url` in the page and waits for the navigation to finish.
    fn navigate(&self, url: &str) -> Result<(), SessionError>;

    /// URL of the page currently displayed.
    fn current_url(&self) -> Result<String, SessionError>;

    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Result<Vec<ElementRef>, SessionError>;

    /// Attribute value, `None` when the element does not carry it.
    fn attribute(&self, element: &ElementRef, name: &str) -> Result<Option<String>, SessionError>;

    fn click(&self, element: &ElementRef) -> Result<(), SessionError>;

    /// Types `text` into the first element matching `selector`.
    fn fill(&self, selector: &str, text: &str) -> Result<(), SessionError>;

    /// Sends an Enter key press to the first element matching `selector`.
    fn press_enter(&self, selector: &str) -> Result<(), SessionError>;

    /// Blocks until the first element matching `selector` reaches `state`,
    /// failing with [`SessionError::Timeout`] after `timeout`.
    fn wait_for(
        &self,
        selector: &str,
        state: WaitState,
        timeout: Duration,
    ) -> Result<(), SessionError>;

    /// Fixed settling delay (animations, lazy loaders).
    fn settle(&self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}
