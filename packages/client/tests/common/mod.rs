//! Shared test transport
//!
//! Records every resolved request and replies with a canned status/body;
//! with no canned body it echoes the request URL so callers can check which
//! request produced which response.

#![allow(dead_code)]

use std::sync::Mutex;

use restbind_client::prelude::*;

pub struct RecordedRequest {
    pub method: RequestMethod,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

pub struct MockTransport {
    pub reply_status: StatusCode,
    pub reply_body: Option<Vec<u8>>,
    pub requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn ok_with(body: &[u8]) -> Self {
        Self {
            reply_status: StatusCode::OK,
            reply_body: Some(body.to_vec()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_status(status: StatusCode, body: &[u8]) -> Self {
        Self {
            reply_status: status,
            reply_body: Some(body.to_vec()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Replies 200 with the request URL as the body.
    pub fn echo_url() -> Self {
        Self {
            reply_status: StatusCode::OK,
            reply_body: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded(&self) -> Vec<RecordedRequest> {
        std::mem::take(&mut *self.requests.lock().unwrap())
    }
}

impl Transport for MockTransport {
    fn execute(&self, request: &ResolvedRequest, _timeouts: Timeouts) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: request.method(),
            url: request.url().to_string(),
            headers: request.headers().clone(),
            body: request.body().map(|b| b.to_vec()),
        });

        let body = self
            .reply_body
            .clone()
            .unwrap_or_else(|| request.url().as_bytes().to_vec());
        let message = self
            .reply_status
            .canonical_reason()
            .unwrap_or_default()
            .to_string();

        Ok(HttpResponse::new(
            self.reply_status,
            message,
            request.url().to_string(),
            ResponseBody::from_bytes(body),
        ))
    }
}

/// A transport that always fails as if the host were unreachable.
pub struct UnreachableTransport;

impl Transport for UnreachableTransport {
    fn execute(&self, _request: &ResolvedRequest, _timeouts: Timeouts) -> Result<HttpResponse> {
        Err(restbind_client::error::request(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        )))
    }
}
