//! Restbind public API
//!
//! Declarative HTTP client: declare endpoint contracts as data, register
//! them on a service, dispatch calls with plain argument values and read
//! typed or raw responses. The request-building engine lives in
//! `restbind_client`; this crate is the surface callers use.
//!
//! # Examples
//! ```no_run
//! use restbind::{Api, EndpointDecl};
//!
//! let api = Api::builder()
//!     .base_url("https://api.example.com")
//!     .endpoint(
//!         "profile",
//!         EndpointDecl::get("app/{name}/profile")
//!             .url_param("name")
//!             .query_param("type"),
//!     )
//!     .build()
//!     .expect("service");
//!
//! let response = api
//!     .dispatch("profile", &["gpscompass".into(), "full".into()])
//!     .expect("request");
//! println!("status: {}", response.status());
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod builder;
pub mod fetch;

pub use builder::ApiBuilder;
pub use fetch::{fetch_bytes, fetch_bytes_in_background};

// Re-export the engine types callers interact with
pub use restbind_client::{
    form_body, ApiService, ArgValue, BlockingTransport, ContentType, EndpointDecl, Error,
    HttpResponse, MethodDescriptor, ParamBinding, RequestBuilder, RequestMethod, ResolvedRequest,
    ResponseBody, Result, ServerConfig, ServiceConfig, ServiceStats, StatsSnapshot, Timeouts,
    Transport,
};

/// Main entry point providing static builder methods.
pub struct Api;

impl Api {
    /// Start building a service.
    ///
    /// Shorthand for `ApiBuilder::new()`.
    #[must_use]
    pub fn builder() -> ApiBuilder {
        ApiBuilder::new()
    }
}
