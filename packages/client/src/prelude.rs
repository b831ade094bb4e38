//! Restbind prelude
//!
//! The essential types for declaring contracts and dispatching calls.

pub use crate::builder::RequestBuilder;
pub use crate::config::{ServerConfig, ServiceConfig};
pub use crate::contract::{
    ArgValue, ContentType, EndpointDecl, MethodDescriptor, ParamBinding, RequestMethod,
};
pub use crate::error::{Error, Result};
pub use crate::http::{form_body, HttpResponse, ResolvedRequest, ResponseBody};
pub use crate::service::{ApiService, ServiceStats, StatsSnapshot};
pub use crate::transport::{BlockingTransport, Timeouts, Transport};

// HTTP standard types from http crate
pub use ::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
