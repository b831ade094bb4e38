//! HTTP response wrapper
//!
//! Status and message are captured once when the transport hands the
//! response over; the body is a single-use resource handle. The first
//! terminal read (bytes, text, json or the raw reader) consumes the handle,
//! and dropping the reader releases the underlying connection on every exit
//! path. A second terminal read is an error.

use std::io::Read;
use std::sync::Mutex;

use bytes::Bytes;
use http::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{self, Result};

type BodyReader = Box<dyn Read + Send>;

/// Response of one dispatched request.
#[derive(Debug)]
pub struct HttpResponse {
    status: StatusCode,
    message: String,
    url: String,
    body: ResponseBody,
}

impl HttpResponse {
    /// Wrap a transport response.
    #[must_use]
    pub fn new(status: StatusCode, message: String, url: String, body: ResponseBody) -> Self {
        Self {
            status,
            message,
            url,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// HTTP status message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The URL this response was fetched from.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether the request succeeded at the HTTP level (2xx).
    ///
    /// This does NOT inspect the body.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Whether the request failed at the HTTP level (non-2xx).
    #[must_use]
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The response body handle.
    #[must_use]
    pub fn body(&self) -> &ResponseBody {
        &self.body
    }
}

/// Single-use handle over the response body stream.
///
/// Whether the request succeeded or failed, the handle reads whatever the
/// server sent on the one channel the transport exposes.
pub struct ResponseBody {
    reader: Mutex<Option<BodyReader>>,
}

impl ResponseBody {
    /// Wrap a transport body stream.
    #[must_use]
    pub fn from_reader(reader: BodyReader) -> Self {
        Self {
            reader: Mutex::new(Some(reader)),
        }
    }

    /// A body over in-memory bytes. Used by transports that buffer and by
    /// tests.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        let bytes: Bytes = bytes.into();
        Self::from_reader(Box::new(std::io::Cursor::new(bytes)))
    }

    fn take(&self) -> Result<BodyReader> {
        let mut slot = match self.reader.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        slot.take()
            .ok_or_else(|| error::body("body already consumed"))
    }

    /// Read the full body as bytes, releasing the connection afterwards.
    pub fn bytes(&self) -> Result<Bytes> {
        let mut reader = self.take()?;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).map_err(error::body)?;
        Ok(Bytes::from(buf))
    }

    /// Read the full body as a UTF-8 string, releasing the connection
    /// afterwards.
    pub fn text(&self) -> Result<String> {
        let bytes = self.bytes()?;
        String::from_utf8(bytes.to_vec()).map_err(error::decode)
    }

    /// Read the full body and decode it as JSON, releasing the connection
    /// afterwards.
    ///
    /// A malformed payload is a decode error local to this accessor.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        let bytes = self.bytes()?;
        serde_json::from_slice(&bytes).map_err(error::decode)
    }

    /// Take the raw body stream.
    ///
    /// The caller owns the reader and releases the connection by dropping
    /// it.
    pub fn reader(&self) -> Result<BodyReader> {
        self.take()
    }
}

impl std::fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let consumed = match self.reader.lock() {
            Ok(guard) => guard.is_none(),
            Err(_) => true,
        };
        f.debug_struct("ResponseBody")
            .field("consumed", &consumed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_bytes_once() {
        let body = ResponseBody::from_bytes(&b"payload"[..]);

        assert_eq!(body.bytes().expect("first read").as_ref(), b"payload");
        let err = body.bytes().unwrap_err();
        assert!(err.to_string().contains("already consumed"));
    }

    #[test]
    fn text_and_json_are_terminal_too() {
        let body = ResponseBody::from_bytes(&br#"{"id":7}"#[..]);
        let value: serde_json::Value = body.json().expect("decode");

        assert_eq!(value["id"], 7);
        assert!(body.text().is_err());
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let body = ResponseBody::from_bytes(&b"not json"[..]);
        let err = body.json::<serde_json::Value>().unwrap_err();

        assert!(err.is_decode());
    }

    #[test]
    fn failed_response_body_is_still_readable() {
        let response = HttpResponse::new(
            StatusCode::NOT_FOUND,
            "Not Found".to_string(),
            "http://x.com/missing".to_string(),
            ResponseBody::from_bytes(&b"missing"[..]),
        );

        assert!(response.is_failure());
        assert_eq!(response.body().text().expect("error payload"), "missing");
    }
}
