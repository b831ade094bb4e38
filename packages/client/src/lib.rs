//! Restbind request-building engine
//!
//! Contract endpoints are declared as data -- request method, relative URL
//! template, fixed headers and positional parameter bindings -- and parsed
//! once into immutable descriptors the first time they are dispatched. Every
//! call then materializes a fresh `(url, headers, body)` request from the
//! cached descriptor and that call's argument values, and hands it to a
//! pluggable [`Transport`](transport::Transport).
//!
//! The public fluent surface lives in the `restbind` package; this crate is
//! the engine underneath it.

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod auth;
pub mod builder;
pub mod config;
pub mod contract;
pub mod error;
pub mod http;
pub mod prelude;
pub mod service;
pub mod transport;

pub use builder::RequestBuilder;
pub use config::{ServerConfig, ServiceConfig};
pub use contract::{
    ArgValue, ContentType, EndpointDecl, MethodDescriptor, ParamBinding, RequestMethod,
};
pub use error::{Error, Result};
pub use crate::http::{form_body, HttpResponse, ResolvedRequest, ResponseBody};
pub use service::{ApiService, ServiceStats, StatsSnapshot};
pub use transport::{BlockingTransport, Timeouts, Transport};
