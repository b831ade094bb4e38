//! One-off fetches
//!
//! Convenience for callers that just want the bytes behind a URL without
//! declaring a contract -- a single GET through the default transport.

use bytes::Bytes;
use http::HeaderMap;
use restbind_client::contract::RequestMethod;
use restbind_client::error::Result;
use restbind_client::http::ResolvedRequest;
use restbind_client::transport::{BlockingTransport, Timeouts, Transport};

/// Fetch the raw body bytes behind `url` with a single GET.
///
/// The body is read whether or not the request succeeded; check the logs
/// for non-success statuses. Blocks the calling thread.
pub fn fetch_bytes(url: &str) -> Result<Bytes> {
    let request = ResolvedRequest::new(RequestMethod::Get, url.to_string(), HeaderMap::new(), None);
    let response = BlockingTransport::new().execute(&request, Timeouts::default())?;
    if response.is_failure() {
        log::warn!(
            "fetch of {url} failed, status: {}, message: {}",
            response.status(),
            response.message()
        );
    }
    response.body().bytes()
}

/// Fetch `url` on a background thread and hand the result to `callback`.
pub fn fetch_bytes_in_background<F>(url: &str, callback: F)
where
    F: FnOnce(Result<Bytes>) + Send + 'static,
{
    let url = url.to_string();
    std::thread::spawn(move || callback(fetch_bytes(&url)));
}
