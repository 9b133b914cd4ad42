//! [`BrowsingSession`] backed by a Chrome/Chromium instance over DevTools.
//!
//! Page interaction goes through `headless_chrome`. The authenticated GET asks
//! the browser for the cookies it would send to each URL on the redirect chain
//! (CDP `Network.getCookies`) and replays them with libcurl alongside the
//! browser's own user agent.

use super::{
    get_with_cookies, AuthenticatedHttp, BrowsingSession, ElementRef, HttpResponse, SessionError,
    WaitState,
};
use headless_chrome::protocol::cdp::Network;
use headless_chrome::{Browser, Element, LaunchOptions, Tab};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Browser launch parameters.
#[derive(Debug, Clone)]
pub struct LaunchSettings {
    pub headless: bool,
    pub window_size: (u32, u32),
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            headless: false,
            window_size: (1280, 900),
        }
    }
}

pub struct ChromeSession {
    // Keeps the browser process alive for as long as the tab is used.
    _browser: Browser,
    tab: Arc<Tab>,
    user_agent: Option<String>,
}

impl ChromeSession {
    /// Launches a browser and opens a fresh tab.
    pub fn launch(settings: &LaunchSettings) -> Result<Self, SessionError> {
        let browser = Browser::new(LaunchOptions {
            headless: settings.headless,
            window_size: Some(settings.window_size),
            // Long viewer waits must not trip the DevTools idle watchdog.
            idle_browser_timeout: Duration::from_secs(600),
            ..Default::default()
        })
        .map_err(SessionError::Browser)?;
        let tab = browser.new_tab().map_err(SessionError::Browser)?;

        let user_agent = tab
            .evaluate("navigator.userAgent", false)
            .ok()
            .and_then(|obj| obj.value)
            .and_then(|v| v.as_str().map(str::to_string));
        tracing::debug!(?user_agent, headless = settings.headless, "browser launched");

        Ok(Self {
            _browser: browser,
            tab,
            user_agent,
        })
    }

    fn element(&self, element: &ElementRef) -> Result<Element<'_>, SessionError> {
        let found = self
            .tab
            .find_elements(&element.selector)
            .map_err(|_| SessionError::ElementNotFound {
                selector: element.selector.clone(),
                index: element.index,
            })?;
        found
            .into_iter()
            .nth(element.index)
            .ok_or_else(|| SessionError::ElementNotFound {
                selector: element.selector.clone(),
                index: element.index,
            })
    }

    fn first(&self, selector: &str) -> Result<Element<'_>, SessionError> {
        self.element(&ElementRef::new(selector, 0))
    }

    fn eval_bool(&self, expression: &str) -> Result<bool, SessionError> {
        let obj = self
            .tab
            .evaluate(expression, false)
            .map_err(SessionError::Browser)?;
        Ok(obj.value.and_then(|v| v.as_bool()).unwrap_or(false))
    }

    /// `Cookie` header value the browser would send to `url`.
    fn cookie_header(&self, url: &str) -> Result<Option<String>, SessionError> {
        let cookies = self
            .tab
            .call_method(Network::GetCookies {
                urls: Some(vec![url.to_string()]),
            })
            .map_err(SessionError::Browser)?
            .cookies;
        if cookies.is_empty() {
            return Ok(None);
        }
        let header = cookies
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ");
        Ok(Some(header))
    }
}

/// JS predicate for "first match of `selector` is in `state`".
fn state_expression(selector: &str, state: WaitState) -> String {
    // serde_json yields a correctly escaped JS string literal.
    let sel = serde_json::to_string(selector).unwrap_or_else(|_| "\"\"".to_string());
    let visible = format!(
        "(() => {{ const e = document.querySelector({sel}); if (!e) return false; \
         const s = window.getComputedStyle(e); \
         return s.display !== 'none' && s.visibility !== 'hidden' && e.getClientRects().length > 0; }})()"
    );
    match state {
        WaitState::Visible => visible,
        WaitState::Hidden => format!("!{visible}"),
    }
}

impl AuthenticatedHttp for ChromeSession {
    fn http_get(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<HttpResponse, SessionError> {
        let mut all = headers.clone();
        if let Some(ua) = &self.user_agent {
            all.entry("User-Agent".to_string()).or_insert_with(|| ua.clone());
        }
        get_with_cookies(url, &all, |hop| self.cookie_header(hop))
    }
}

impl BrowsingSession for ChromeSession {
    fn navigate(&self, url: &str) -> Result<(), SessionError> {
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(SessionError::Browser)?;
        Ok(())
    }

    fn current_url(&self) -> Result<String, SessionError> {
        Ok(self.tab.get_url())
    }

    fn query_all(&self, selector: &str) -> Result<Vec<ElementRef>, SessionError> {
        let sel = serde_json::to_string(selector).unwrap_or_else(|_| "\"\"".to_string());
        let obj = self
            .tab
            .evaluate(&format!("document.querySelectorAll({sel}).length"), false)
            .map_err(SessionError::Browser)?;
        let count = obj.value.and_then(|v| v.as_u64()).unwrap_or(0) as usize;
        Ok((0..count).map(|i| ElementRef::new(selector, i)).collect())
    }

    fn attribute(&self, element: &ElementRef, name: &str) -> Result<Option<String>, SessionError> {
        self.element(element)?
            .get_attribute_value(name)
            .map_err(SessionError::Browser)
    }

    fn click(&self, element: &ElementRef) -> Result<(), SessionError> {
        self.element(element)?.click().map_err(SessionError::Browser)?;
        Ok(())
    }

    fn fill(&self, selector: &str, text: &str) -> Result<(), SessionError> {
        self.first(selector)?
            .type_into(text)
            .map_err(SessionError::Browser)?;
        Ok(())
    }

    fn press_enter(&self, selector: &str) -> Result<(), SessionError> {
        self.first(selector)?
            .focus()
            .map_err(SessionError::Browser)?;
        self.tab
            .press_key("Enter")
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(SessionError::Browser)?;
        Ok(())
    }

    fn wait_for(
        &self,
        selector: &str,
        state: WaitState,
        timeout: Duration,
    ) -> Result<(), SessionError> {
        let expression = state_expression(selector, state);
        let start = Instant::now();
        loop {
            if self.eval_bool(&expression)? {
                return Ok(());
            }
            if start.elapsed() >= timeout {
                return Err(SessionError::Timeout {
                    selector: selector.to_string(),
                    state,
                    waited: start.elapsed(),
                });
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }
}
