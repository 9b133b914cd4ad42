//! Session-bound image fetch: turns a resolved source into bytes.
//!
//! Remote images are requested through the caller's authenticated session with
//! `Referer` set to the album page. Albums behind a password gate authorize by
//! cookie, so an anonymous client would only get a 403 or the login page.

mod error;
mod inline;

pub use error::{DownloadError, InlineError};
pub use inline::decode_inline;

use crate::resolver::ResolvedImageSource;
use crate::session::AuthenticatedHttp;
use crate::url_model::{extension_from_url, normalize_image_url, DEFAULT_EXTENSION};
use std::collections::HashMap;

/// Downloaded image content, held just long enough to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBytes {
    pub bytes: Vec<u8>,
    /// Extension with leading dot, e.g. `.png`.
    pub extension: String,
    /// Absolute URL fetched; `None` for inline payloads.
    pub url: Option<String>,
}

impl ImageBytes {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Fetches the bytes behind `source`.
///
/// Inline payloads are decoded locally. URLs are normalized (protocol-relative
/// gets `https:`, relative is joined against `current_page_url`) and requested
/// once through `http`; there is no retry.
pub fn fetch<H>(
    source: ResolvedImageSource,
    http: &H,
    current_page_url: &str,
) -> Result<ImageBytes, DownloadError>
where
    H: AuthenticatedHttp + ?Sized,
{
    match source {
        ResolvedImageSource::Unresolved => Err(DownloadError::Unresolved),
        ResolvedImageSource::Inline(inline) => {
            let bytes = decode_inline(&inline)?;
            if bytes.is_empty() {
                return Err(DownloadError::EmptyPayload {
                    origin: format!("inline data:{}", inline.header),
                });
            }
            tracing::debug!(
                media_type = inline.media_type(),
                bytes = bytes.len(),
                "decoded inline image"
            );
            Ok(ImageBytes {
                bytes,
                extension: DEFAULT_EXTENSION.to_string(),
                url: None,
            })
        }
        ResolvedImageSource::Url(raw) => {
            let url = normalize_image_url(&raw, current_page_url)?.to_string();

            let mut headers = HashMap::new();
            headers.insert("Referer".to_string(), current_page_url.to_string());

            let response = http
                .http_get(&url, &headers)
                .map_err(|source| DownloadError::Transport {
                    url: url.clone(),
                    source,
                })?;
            if !response.is_success() {
                return Err(DownloadError::Status {
                    status: response.status,
                    url,
                });
            }
            if response.body.is_empty() {
                return Err(DownloadError::EmptyPayload { origin: url });
            }

            let extension =
                extension_from_url(&url).unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
            Ok(ImageBytes {
                bytes: response.body,
                extension,
                url: Some(url),
            })
        }
    }
}
