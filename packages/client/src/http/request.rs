//! Resolved request type
//!
//! A [`ResolvedRequest`] is the output of one build: the full link, the
//! merged header set and the optional body, ready for a transport. The URL
//! is kept as a raw string; query values are concatenated exactly as
//! supplied and any wire-level encoding is the transport's business.

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue};

use crate::contract::RequestMethod;
use crate::error::{self, Result};

/// A fully materialized HTTP request.
#[derive(Debug, Clone)]
pub struct ResolvedRequest {
    method: RequestMethod,
    url: String,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl ResolvedRequest {
    /// Assemble a resolved request from its parts.
    #[must_use]
    pub fn new(
        method: RequestMethod,
        url: String,
        headers: HeaderMap,
        body: Option<Bytes>,
    ) -> Self {
        Self {
            method,
            url,
            headers,
            body,
        }
    }

    /// The request method.
    #[must_use]
    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// The full request link (base URL + resolved relative URL).
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The resolved header set.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The resolved body, when one was bound.
    #[must_use]
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Insert a header unless the request already carries that name.
    ///
    /// Used by the dispatcher to merge client-level defaults under
    /// method-level declarations.
    pub fn insert_header_if_absent(&mut self, name: HeaderName, value: &str) -> Result<()> {
        if self.headers.contains_key(&name) {
            return Ok(());
        }
        let value = HeaderValue::from_str(value)
            .map_err(|e| error::invalid_header(format!("invalid value for header `{name}`: {e}")))?;
        self.headers.insert(name, value);
        Ok(())
    }
}
