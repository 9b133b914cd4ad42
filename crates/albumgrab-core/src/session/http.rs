//! Single-shot HTTP GET over libcurl, buffering the body in memory.
//!
//! [`super::ChromeSession`] goes through [`get_with_cookies`], which walks
//! redirects hop by hop and attaches the browser's cookies for each hop's URL.

use super::SessionError;
use std::collections::HashMap;
use std::time::Duration;

/// Status and body of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Redirect hops followed before giving up.
pub const MAX_REDIRECTS: usize = 10;

/// Performs a GET of `url` with `headers` and returns the final response
/// (redirects are followed by curl, `headers` go to every hop). Non-2xx
/// statuses are not errors here.
pub fn curl_get(url: &str, headers: &HashMap<String, String>) -> Result<HttpResponse, SessionError> {
    perform(url, headers, true).map(|(response, _)| response)
}

/// GET that follows redirects itself and asks `cookies_for` for the `Cookie`
/// header of every hop, so cookies scoped to one host never reach another.
pub fn get_with_cookies<F>(
    url: &str,
    headers: &HashMap<String, String>,
    mut cookies_for: F,
) -> Result<HttpResponse, SessionError>
where
    F: FnMut(&str) -> Result<Option<String>, SessionError>,
{
    let mut target = url.to_string();
    for _ in 0..=MAX_REDIRECTS {
        let mut hop_headers = headers.clone();
        hop_headers.remove("Cookie");
        if let Some(cookie) = cookies_for(&target)? {
            hop_headers.insert("Cookie".to_string(), cookie);
        }
        let (response, next) = perform(&target, &hop_headers, false)?;
        match next {
            Some(next) if (300..400).contains(&response.status) => {
                tracing::debug!(from = %target, to = %next, status = response.status, "redirect");
                target = next;
            }
            _ => return Ok(response),
        }
    }
    Err(SessionError::TooManyRedirects {
        url: url.to_string(),
        limit: MAX_REDIRECTS,
    })
}

/// One curl transfer. Returns the response and, when curl does not follow
/// redirects itself, the absolute `Location` target if there is one.
fn perform(
    url: &str,
    headers: &HashMap<String, String>,
    follow: bool,
) -> Result<(HttpResponse, Option<String>), SessionError> {
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(follow)?;
    if follow {
        easy.max_redirections(MAX_REDIRECTS as u32)?;
    }
    easy.connect_timeout(Duration::from_secs(30))?;
    easy.low_speed_limit(1024)?;
    easy.low_speed_time(Duration::from_secs(60))?;
    easy.timeout(Duration::from_secs(300))?;
    // Let curl advertise and decode whatever encodings it was built with.
    easy.accept_encoding("")?;

    let mut list = curl::easy::List::new();
    for (k, v) in headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))?;
    }
    if !headers.is_empty() {
        easy.http_headers(list)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    let next = if follow {
        None
    } else {
        easy.redirect_url()?.map(str::to_string)
    };
    tracing::debug!(url, status, bytes = body.len(), "GET finished");
    Ok((HttpResponse { status, body }, next))
}
