//! Download failure taxonomy for one image.

use crate::session::SessionError;
use crate::url_model::UrlError;

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// Resolution produced nothing to fetch.
    #[error("no image source to download")]
    Unresolved,
    /// The resolved reference could not be turned into an http(s) URL.
    #[error(transparent)]
    InvalidUrl(#[from] UrlError),
    /// Inline payload could not be decoded.
    #[error("inline image: {0}")]
    Inline(#[from] InlineError),
    /// The server answered with a non-2xx status.
    #[error("GET {url} returned HTTP {status}")]
    Status { status: u32, url: String },
    /// The response (or inline payload) held no bytes.
    #[error("empty payload from {origin}")]
    EmptyPayload { origin: String },
    /// The request itself failed before a response arrived.
    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: SessionError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum InlineError {
    #[error("unsupported encoding in `data:{header}` (only base64 is handled)")]
    UnsupportedEncoding { header: String },
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
}
