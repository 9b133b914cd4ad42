//! Scripted [`BrowsingSession`] for walker and login tests.
//!
//! Models the default selectors: a password gate, a grid of thumbnails, and a
//! viewer showing one `<img>` with candidate attributes. HTTP answers come from
//! a map keyed by absolute URL; anything missing is a 404.

use albumgrab_core::config::SelectorConfig;
use albumgrab_core::session::{
    AuthenticatedHttp, BrowsingSession, ElementRef, HttpResponse, SessionError, WaitState,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

pub const ALBUM_URL: &str = "https://site.example/album/42";
pub const PASSWORD: &str = "open-sesame";

/// How a thumbnail's viewer misbehaves, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Normal,
    /// The viewer image never becomes visible.
    ViewerTimeout,
    /// Clicking the thumbnail panics inside the session.
    PanicOnClick,
    /// Reading the thumbnail's id attribute fails.
    UnreadableId,
}

#[derive(Debug, Clone)]
pub struct FakeThumb {
    pub id: Option<String>,
    pub src: Option<String>,
    pub data_origin: Option<String>,
    pub data_src: Option<String>,
    pub behavior: Behavior,
}

impl FakeThumb {
    /// Thumbnail whose viewer `src` is `src`.
    pub fn with_src(src: &str) -> Self {
        Self {
            id: None,
            src: Some(src.to_string()),
            data_origin: None,
            data_src: None,
            behavior: Behavior::Normal,
        }
    }

    /// Thumbnail with no usable candidate at all.
    pub fn unresolvable() -> Self {
        Self {
            id: None,
            src: None,
            data_origin: None,
            data_src: None,
            behavior: Behavior::Normal,
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }
}

#[derive(Debug, Default)]
pub struct State {
    pub navigated: Vec<String>,
    pub filled: Option<String>,
    pub logged_in: bool,
    pub open: Option<usize>,
    pub thumb_clicks: Vec<usize>,
    pub close_clicks: usize,
    pub requests: Vec<(String, HashMap<String, String>)>,
}

pub struct FakeSession {
    pub selectors: SelectorConfig,
    pub page_url: String,
    pub gate_present: bool,
    pub thumbs: Vec<FakeThumb>,
    pub responses: HashMap<String, HttpResponse>,
    pub state: RefCell<State>,
}

impl FakeSession {
    /// Session already past the password gate.
    pub fn logged_in(thumbs: Vec<FakeThumb>) -> Self {
        let session = Self::at_gate(thumbs);
        session.state.borrow_mut().logged_in = true;
        session
    }

    /// Session sitting on the password gate.
    pub fn at_gate(thumbs: Vec<FakeThumb>) -> Self {
        Self {
            selectors: SelectorConfig::default(),
            page_url: ALBUM_URL.to_string(),
            gate_present: true,
            thumbs,
            responses: HashMap::new(),
            state: RefCell::new(State::default()),
        }
    }

    pub fn respond(mut self, url: &str, status: u32, body: &[u8]) -> Self {
        self.responses.insert(
            url.to_string(),
            HttpResponse {
                status,
                body: body.to_vec(),
            },
        );
        self
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.state
            .borrow()
            .requests
            .iter()
            .map(|(u, _)| u.clone())
            .collect()
    }

    fn timeout(selector: &str, state: WaitState, waited: Duration) -> SessionError {
        SessionError::Timeout {
            selector: selector.to_string(),
            state,
            waited,
        }
    }

    fn not_found(element: &ElementRef) -> SessionError {
        SessionError::ElementNotFound {
            selector: element.selector.clone(),
            index: element.index,
        }
    }
}

impl AuthenticatedHttp for FakeSession {
    fn http_get(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<HttpResponse, SessionError> {
        self.state
            .borrow_mut()
            .requests
            .push((url.to_string(), headers.clone()));
        Ok(self.responses.get(url).cloned().unwrap_or(HttpResponse {
            status: 404,
            body: Vec::new(),
        }))
    }
}

impl BrowsingSession for FakeSession {
    fn navigate(&self, url: &str) -> Result<(), SessionError> {
        self.state.borrow_mut().navigated.push(url.to_string());
        Ok(())
    }

    fn current_url(&self) -> Result<String, SessionError> {
        Ok(self.page_url.clone())
    }

    fn query_all(&self, selector: &str) -> Result<Vec<ElementRef>, SessionError> {
        let state = self.state.borrow();
        let count = if selector == self.selectors.thumbnail && state.logged_in {
            self.thumbs.len()
        } else if selector == self.selectors.viewer_image && state.open.is_some() {
            1
        } else {
            0
        };
        Ok((0..count).map(|i| ElementRef::new(selector, i)).collect())
    }

    fn attribute(&self, element: &ElementRef, name: &str) -> Result<Option<String>, SessionError> {
        let state = self.state.borrow();
        if element.selector == self.selectors.thumbnail {
            let thumb = self
                .thumbs
                .get(element.index)
                .ok_or_else(|| Self::not_found(element))?;
            if name == self.selectors.thumbnail_id_attribute
                && thumb.behavior == Behavior::UnreadableId
            {
                return Err(Self::not_found(element));
            }
            return Ok(if name == self.selectors.thumbnail_id_attribute {
                thumb.id.clone()
            } else {
                None
            });
        }
        if element.selector == self.selectors.viewer_image {
            let thumb = state
                .open
                .and_then(|i| self.thumbs.get(i))
                .ok_or_else(|| Self::not_found(element))?;
            return Ok(match name {
                "src" => thumb.src.clone(),
                "data-origin" => thumb.data_origin.clone(),
                "data-src" => thumb.data_src.clone(),
                _ => None,
            });
        }
        Err(Self::not_found(element))
    }

    fn click(&self, element: &ElementRef) -> Result<(), SessionError> {
        let mut state = self.state.borrow_mut();
        if element.selector == self.selectors.thumbnail {
            let thumb = self
                .thumbs
                .get(element.index)
                .ok_or_else(|| Self::not_found(element))?;
            state.thumb_clicks.push(element.index);
            if thumb.behavior == Behavior::PanicOnClick {
                drop(state);
                panic!("renderer crashed on thumbnail {}", element.index);
            }
            state.open = Some(element.index);
            return Ok(());
        }
        if element.selector == self.selectors.viewer_close {
            state.close_clicks += 1;
            if state.open.take().is_none() {
                return Err(Self::not_found(element));
            }
            return Ok(());
        }
        Err(Self::not_found(element))
    }

    fn fill(&self, selector: &str, text: &str) -> Result<(), SessionError> {
        if selector != self.selectors.password_input || !self.gate_present {
            return Err(SessionError::ElementNotFound {
                selector: selector.to_string(),
                index: 0,
            });
        }
        self.state.borrow_mut().filled = Some(text.to_string());
        Ok(())
    }

    fn press_enter(&self, _selector: &str) -> Result<(), SessionError> {
        let mut state = self.state.borrow_mut();
        state.logged_in = state.filled.as_deref() == Some(PASSWORD);
        Ok(())
    }

    fn wait_for(
        &self,
        selector: &str,
        state: WaitState,
        timeout: Duration,
    ) -> Result<(), SessionError> {
        let s = self.state.borrow();
        let reached = match state {
            WaitState::Visible if selector == self.selectors.password_input => self.gate_present,
            WaitState::Visible if selector == self.selectors.thumbnail => {
                s.logged_in && !self.thumbs.is_empty()
            }
            WaitState::Visible if selector == self.selectors.viewer_image => s
                .open
                .and_then(|i| self.thumbs.get(i))
                .is_some_and(|t| t.behavior != Behavior::ViewerTimeout),
            WaitState::Hidden if selector == self.selectors.viewer_close => s.open.is_none(),
            _ => false,
        };
        if reached {
            Ok(())
        } else {
            Err(Self::timeout(selector, state, timeout))
        }
    }
}
