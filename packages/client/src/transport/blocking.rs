//! Default blocking transport over `reqwest`
//!
//! Opens one connection per dispatch, mirroring the engine's
//! one-request-one-response contract. The caller is responsible for keeping
//! this off any UI/event thread.

use super::Timeouts;
use crate::error::{self, Result};
use crate::http::request::ResolvedRequest;
use crate::http::response::{HttpResponse, ResponseBody};

/// Blocking transport executing requests with `reqwest::blocking`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockingTransport;

impl BlockingTransport {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl super::Transport for BlockingTransport {
    fn execute(&self, request: &ResolvedRequest, timeouts: Timeouts) -> Result<HttpResponse> {
        // The connect timeout is a client-level setting in reqwest, so a
        // fresh client is built per call; no connections are reused across
        // dispatches.
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(timeouts.connect)
            .timeout(timeouts.read)
            .build()
            .map_err(error::request)?;

        log::debug!(
            "executing {} request to {}, body length: {}",
            request.method(),
            request.url(),
            request.body().map_or(0, bytes::Bytes::len)
        );

        let mut builder = client
            .request(request.method().to_http(), request.url())
            .headers(request.headers().clone());
        if let Some(body) = request.body() {
            builder = builder.body(body.to_vec());
        }

        let response = builder.send().map_err(|e| {
            let err = if e.is_timeout() {
                error::timeout(e)
            } else {
                error::request(e)
            };
            err.with_url(request.url())
        })?;

        let status = response.status();
        let message = status.canonical_reason().unwrap_or_default().to_string();
        let url = response.url().to_string();

        // Non-2xx responses still carry a readable payload; the wrapper
        // exposes them as failed responses rather than errors.
        Ok(HttpResponse::new(
            status,
            message,
            url,
            ResponseBody::from_reader(Box::new(response)),
        ))
    }
}
