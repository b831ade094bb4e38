//! Contract registry and dispatcher
//!
//! [`ApiService`] owns the registered endpoint declarations and the
//! per-endpoint builder cache. Descriptors are parsed lazily on first
//! dispatch; the cache guarantees exactly one builder is ever constructed
//! per endpoint, even when many threads race the first call. A declaration
//! that fails to parse leaves nothing in the cache.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use http::header::AUTHORIZATION;
use serde::de::DeserializeOwned;

use crate::builder::RequestBuilder;
use crate::config::ServiceConfig;
use crate::contract::{ArgValue, EndpointDecl, MethodDescriptor};
use crate::error::{self, Result};
use crate::http::response::HttpResponse;
use crate::service::stats::ServiceStats;
use crate::transport::{Timeouts, Transport};

/// A configured, dispatch-ready API client.
///
/// Shared freely across threads: dispatches to different endpoints proceed
/// fully in parallel, and dispatches to the same endpoint share one cached
/// builder.
pub struct ApiService {
    config: ServiceConfig,
    contract: HashMap<String, EndpointDecl>,
    builders: DashMap<String, Arc<RequestBuilder>>,
    transport: Arc<dyn Transport>,
    stats: Arc<ServiceStats>,
}

impl ApiService {
    /// Create a service from a validated config, the endpoint contract and
    /// a transport.
    #[must_use]
    pub fn new(
        config: ServiceConfig,
        endpoints: Vec<(String, EndpointDecl)>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            config,
            contract: endpoints.into_iter().collect(),
            builders: DashMap::new(),
            transport,
            stats: Arc::new(ServiceStats::new()),
        }
    }

    /// The service configuration.
    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Dispatch counters for monitoring.
    #[must_use]
    pub fn stats(&self) -> Arc<ServiceStats> {
        Arc::clone(&self.stats)
    }

    /// Look up the builder for an endpoint, constructing it on first use.
    ///
    /// The map entry is held while constructing, so concurrent first calls
    /// to the same endpoint serialize and exactly one builder is inserted;
    /// a parse failure inserts nothing.
    fn builder_for(&self, endpoint: &str) -> Result<Arc<RequestBuilder>> {
        if let Some(existing) = self.builders.get(endpoint) {
            self.stats.record_cache_hit();
            return Ok(Arc::clone(&existing));
        }

        match self.builders.entry(endpoint.to_string()) {
            Entry::Occupied(entry) => {
                self.stats.record_cache_hit();
                Ok(Arc::clone(entry.get()))
            }
            Entry::Vacant(entry) => {
                let decl = self.contract.get(endpoint).ok_or_else(|| {
                    error::configuration(format!("unknown endpoint `{endpoint}`"))
                })?;
                let descriptor = MethodDescriptor::parse(endpoint, decl)?;
                let builder = Arc::new(RequestBuilder::new(descriptor, decl.bindings().to_vec()));
                self.stats.record_builder_constructed();
                entry.insert(Arc::clone(&builder));
                Ok(builder)
            }
        }
    }

    /// Dispatch one call: resolve the request from `args`, merge the
    /// client-level credential and hand it to the transport.
    ///
    /// Any response with a status -- success or failure -- comes back as
    /// `Ok`; configuration errors and transport failures with no response
    /// are `Err`.
    pub fn dispatch(&self, endpoint: &str, args: &[ArgValue]) -> Result<HttpResponse> {
        let builder = self.builder_for(endpoint)?;
        let mut request = builder.build(self.config.base_url(), args)?;

        // Method-level headers always win over the client-level credential.
        if let Some(credential) = self.config.credential() {
            request.insert_header_if_absent(AUTHORIZATION, credential)?;
        }

        self.stats.record_dispatch();
        tracing::debug!(
            endpoint,
            method = %request.method(),
            url = %request.url(),
            thread = ?std::thread::current().name(),
            "dispatching HTTP request"
        );

        let timeouts = Timeouts {
            connect: self.config.connect_timeout(),
            read: self.config.read_timeout(),
        };

        match self.transport.execute(&request, timeouts) {
            Ok(response) => {
                if response.is_success() {
                    self.stats.record_success();
                } else {
                    self.stats.record_failure();
                }
                Ok(response)
            }
            Err(e) => {
                self.stats.record_transport_error();
                Err(e)
            }
        }
    }

    /// Dispatch a call and decode the JSON response body into `T`.
    ///
    /// A non-2xx response becomes a status error carrying the best-known
    /// status and message; a malformed payload is a decode error.
    pub fn call_json<T: DeserializeOwned>(&self, endpoint: &str, args: &[ArgValue]) -> Result<T> {
        let response = self.dispatch(endpoint, args)?;
        if response.is_failure() {
            tracing::warn!(
                endpoint,
                status = %response.status(),
                message = response.message(),
                "typed call failed"
            );
            let message = if response.message().is_empty() {
                None
            } else {
                Some(response.message().to_string())
            };
            return Err(error::status_code(
                response.url(),
                response.status(),
                message,
            ));
        }
        response.body().json()
    }
}

impl std::fmt::Debug for ApiService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiService")
            .field("config", &self.config)
            .field("endpoints", &self.contract.len())
            .field("cached_builders", &self.builders.len())
            .finish()
    }
}
