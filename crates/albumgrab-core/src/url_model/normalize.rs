//! Resolution of protocol-relative and relative image URLs.

use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum UrlError {
    #[error("cannot parse `{url}`: {source}")]
    Parse {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported scheme `{scheme}` in `{url}`")]
    UnsupportedScheme { url: String, scheme: String },
}

fn has_http_scheme(raw: &str) -> bool {
    let lower = raw.get(..8).unwrap_or(raw).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Turns a resolved image URL into an absolute http(s) URL.
///
/// - `//host/path` gets `https:` prepended.
/// - Anything without an http(s) scheme is joined against `page_url` the way
///   a browser resolves a relative reference against its document.
/// - Absolute http(s) URLs pass through (parsed, so they come out normalized).
pub fn normalize_image_url(raw: &str, page_url: &str) -> Result<Url, UrlError> {
    let raw = raw.trim();
    let parse_err = |source| UrlError::Parse {
        url: raw.to_string(),
        source,
    };

    let joined = if let Some(rest) = raw.strip_prefix("//") {
        Url::parse(&format!("https://{rest}")).map_err(parse_err)?
    } else if has_http_scheme(raw) {
        Url::parse(raw).map_err(parse_err)?
    } else {
        let base = Url::parse(page_url).map_err(|source| UrlError::Parse {
            url: page_url.to_string(),
            source,
        })?;
        base.join(raw).map_err(parse_err)?
    };

    match joined.scheme() {
        "http" | "https" => Ok(joined),
        other => Err(UrlError::UnsupportedScheme {
            url: joined.to_string(),
            scheme: other.to_string(),
        }),
    }
}
