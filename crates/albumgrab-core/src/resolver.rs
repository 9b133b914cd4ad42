//! Turns the attributes of a viewer `<img>` into the one source worth fetching.
//!
//! Pages frequently swap `src` for an inline `data:image` placeholder while an
//! image is lazy-loaded; the real location then lives in `data-origin` or
//! `data-src`. Resolution never validates URLs, the fetcher deals with their shape.

use crate::session::{BrowsingSession, ElementRef, SessionError};

/// Marks an attribute value as an inline placeholder rather than a remote location.
pub const INLINE_IMAGE_MARKER: &str = "data:image";

/// Prefix of an inline payload the fetcher can decode directly.
pub const INLINE_PAYLOAD_PREFIX: &str = "data:image/";

/// Candidate attributes in priority order. All but the last must hold a usable
/// remote value to win; the last one is taken verbatim.
pub const CANDIDATE_ATTRIBUTES: [&str; 3] = ["src", "data-origin", "data-src"];

/// Snapshot of the candidate attributes of one full-size image element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidateSet {
    candidates: Vec<(String, Option<String>)>,
}

impl ImageCandidateSet {
    /// Builds a set for the standard `src` / `data-origin` / `data-src` attributes.
    pub fn new(src: Option<&str>, data_origin: Option<&str>, data_src: Option<&str>) -> Self {
        Self::from_pairs(
            CANDIDATE_ATTRIBUTES
                .iter()
                .zip([src, data_origin, data_src])
                .map(|(name, value)| (name.to_string(), value.map(str::to_string))),
        )
    }

    /// Builds a set from (attribute, value) pairs already in priority order.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, Option<String>)>) -> Self {
        Self {
            candidates: pairs.into_iter().collect(),
        }
    }

    /// Reads every candidate attribute of `element` through the session.
    pub fn capture<S>(session: &S, element: &ElementRef) -> Result<Self, SessionError>
    where
        S: BrowsingSession + ?Sized,
    {
        let mut pairs = Vec::with_capacity(CANDIDATE_ATTRIBUTES.len());
        for name in CANDIDATE_ATTRIBUTES {
            pairs.push((name.to_string(), session.attribute(element, name)?));
        }
        Ok(Self::from_pairs(pairs))
    }

    /// Value of attribute `name`, if captured and present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.candidates
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }
}

/// An inline `data:image/...` payload split at its first comma.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    /// Format identifier, e.g. `image/png;base64`.
    pub header: String,
    /// Encoded data following the comma.
    pub data: String,
}

impl InlineImage {
    /// Parses `data:image/...`; `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        if !value.starts_with(INLINE_PAYLOAD_PREFIX) {
            return None;
        }
        let rest = &value["data:".len()..];
        let (header, data) = rest.split_once(',').unwrap_or((rest, ""));
        Some(Self {
            header: header.to_string(),
            data: data.to_string(),
        })
    }

    /// MIME type part of the header (`image/png` for `image/png;base64`).
    pub fn media_type(&self) -> &str {
        self.header.split(';').next().unwrap_or_default()
    }

    pub fn is_base64(&self) -> bool {
        self.header
            .split(';')
            .skip(1)
            .any(|p| p.trim().eq_ignore_ascii_case("base64"))
    }
}

/// Outcome of resolution, consumed once by the fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedImageSource {
    /// Absolute, protocol-relative or relative URL, as found on the element.
    Url(String),
    /// Inline payload that slipped through as the last candidate.
    Inline(InlineImage),
    /// No candidate held anything usable.
    Unresolved,
}

impl ResolvedImageSource {
    /// Classifies a raw attribute value. Missing or blank values are `Unresolved`.
    pub fn from_value(value: Option<&str>) -> Self {
        let value = match value.map(str::trim) {
            Some(v) if !v.is_empty() => v,
            _ => return ResolvedImageSource::Unresolved,
        };
        match InlineImage::parse(value) {
            Some(inline) => ResolvedImageSource::Inline(inline),
            None => ResolvedImageSource::Url(value.to_string()),
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, ResolvedImageSource::Unresolved)
    }
}

/// A value usable as a remote location: present, non-blank and not an inline placeholder.
fn usable_remote(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.starts_with(INLINE_IMAGE_MARKER))
}

/// Picks the authoritative source: the first usable remote value among all but
/// the last candidate, else the last candidate verbatim.
pub fn resolve(candidates: &ImageCandidateSet) -> ResolvedImageSource {
    let Some(((_, last), rest)) = candidates.candidates.split_last() else {
        return ResolvedImageSource::Unresolved;
    };
    let chosen = rest
        .iter()
        .find_map(|(_, value)| usable_remote(value.as_deref()))
        .or(last.as_deref());
    ResolvedImageSource::from_value(chosen)
}
