//! Transport seam
//!
//! The engine resolves requests; a [`Transport`] executes them. Any HTTP
//! library can sit behind the trait -- the default is
//! [`BlockingTransport`](blocking::BlockingTransport) over
//! `reqwest::blocking`. One `execute` call issues one request and returns
//! one response; retries, pooling and caching are the implementor's own
//! affair and the engine never asks for them.

pub mod blocking;

use std::time::Duration;

use crate::config::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT};
use crate::error::Result;
use crate::http::request::ResolvedRequest;
use crate::http::response::HttpResponse;

pub use blocking::BlockingTransport;

/// Connect/read timeout pair passed through to the transport on every call.
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    pub connect: Duration,
    pub read: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: DEFAULT_CONNECT_TIMEOUT,
            read: DEFAULT_READ_TIMEOUT,
        }
    }
}

/// Executes one resolved request against the network.
///
/// Implementations must send the resolved headers and body verbatim and
/// surface every response that carries a status -- including non-2xx -- as
/// `Ok`. Only failures with no response at all (DNS, refused connection,
/// timeout) are `Err`.
pub trait Transport: Send + Sync + 'static {
    fn execute(&self, request: &ResolvedRequest, timeouts: Timeouts) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn execute(&self, request: &ResolvedRequest, timeouts: Timeouts) -> Result<HttpResponse> {
        (**self).execute(request, timeouts)
    }
}
