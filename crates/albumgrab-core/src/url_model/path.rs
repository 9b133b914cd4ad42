//! File extension inference from a URL path.

/// Extension used when the URL path carries none, and for inline payloads.
pub const DEFAULT_EXTENSION: &str = ".jpg";

/// Longest suffix still treated as an extension (".jpeg", ".webp", ".avif").
const MAX_EXTENSION_LEN: usize = 5;

/// Extension (with leading dot) of the last path segment of `url`.
///
/// Query and fragment are ignored, so `https://x/photo.png?x=1` gives `.png`.
/// Returns `None` if the URL cannot be parsed or the last segment has no
/// plausible extension.
pub fn extension_from_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.filter(|s| !s.is_empty()).last()?;
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty()
        || ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(format!(".{ext}"))
}
