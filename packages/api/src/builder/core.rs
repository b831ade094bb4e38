//! Fluent service builder
//!
//! Assembles an [`ApiService`] from a base URL, optional basic-auth
//! credential, timeouts, an optional JSON config overlay and the endpoint
//! contract. Configuration-file values are applied last and override only
//! the fields they carry.

use std::sync::Arc;
use std::time::Duration;

use restbind_client::config::{ServerConfig, ServiceConfig};
use restbind_client::contract::EndpointDecl;
use restbind_client::error::{self, Result};
use restbind_client::service::ApiService;
use restbind_client::transport::{BlockingTransport, Transport};

/// Builder for a configured [`ApiService`].
///
/// # Examples
/// ```no_run
/// use restbind::{Api, EndpointDecl};
///
/// let service = Api::builder()
///     .base_url("https://api.example.com")
///     .basic_auth("user", "secret")
///     .endpoint("profile", EndpointDecl::get("user/{id}/profile").url_param("id"))
///     .build()
///     .expect("service");
///
/// let response = service.dispatch("profile", &[7.into()]).expect("call");
/// ```
#[derive(Default)]
pub struct ApiBuilder {
    base_url: Option<String>,
    credential: Option<String>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    server_config: Option<ServerConfig>,
    endpoints: Vec<(String, EndpointDecl)>,
    transport: Option<Arc<dyn Transport>>,
}

impl ApiBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL all relative endpoint URLs resolve against.
    ///
    /// A trailing `/` is appended when missing.
    #[must_use]
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        self
    }

    /// Set the basic-auth credential from username and password.
    #[must_use]
    pub fn basic_auth(mut self, username: &str, password: &str) -> Self {
        self.credential = Some(restbind_client::auth::encode_basic_credential(
            username, password,
        ));
        self
    }

    /// Set the basic-auth credential from a pre-encoded base64 value.
    #[must_use]
    pub fn basic_credential(mut self, base64_credential: &str) -> Self {
        self.credential = Some(base64_credential.to_string());
        self
    }

    /// Set the connect timeout in milliseconds. Defaults to 15000.
    #[must_use]
    pub fn connect_timeout_millis(mut self, millis: u64) -> Self {
        self.connect_timeout = Some(Duration::from_millis(millis));
        self
    }

    /// Set the read timeout in milliseconds. Defaults to 30000.
    #[must_use]
    pub fn read_timeout_millis(mut self, millis: u64) -> Self {
        self.read_timeout = Some(Duration::from_millis(millis));
        self
    }

    /// Overlay a JSON config source.
    ///
    /// Applied last during [`build`](ApiBuilder::build); fields override the
    /// programmatic settings only when present/positive.
    pub fn config_json(mut self, json: &str) -> Result<Self> {
        self.server_config = Some(ServerConfig::from_json(json)?);
        Ok(self)
    }

    /// Overlay a JSON config file.
    pub fn config_file(mut self, path: impl AsRef<std::path::Path>) -> Result<Self> {
        self.server_config = Some(ServerConfig::from_file(path)?);
        Ok(self)
    }

    /// Register one endpoint declaration under its dispatch name.
    #[must_use]
    pub fn endpoint(mut self, name: &str, decl: EndpointDecl) -> Self {
        self.endpoints.push((name.to_string(), decl));
        self
    }

    /// Replace the default blocking transport.
    #[must_use]
    pub fn transport(mut self, transport: impl Transport) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Validate the configuration and assemble the service.
    pub fn build(self) -> Result<ApiService> {
        let base_url = self
            .base_url
            .or_else(|| {
                self.server_config
                    .as_ref()
                    .and_then(|server| server.base_url.clone())
            })
            .ok_or_else(|| error::configuration("must specify a base URL"))?;

        let mut config = ServiceConfig::new(base_url)?;
        if let Some(ref credential) = self.credential {
            config = config.with_basic_credential(credential);
        }
        if let Some(timeout) = self.connect_timeout {
            config = config.with_connect_timeout(timeout);
        }
        if let Some(timeout) = self.read_timeout {
            config = config.with_read_timeout(timeout);
        }
        if let Some(ref server) = self.server_config {
            config.apply_server_config(server)?;
        }

        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(BlockingTransport::new()));

        tracing::debug!(
            base_url = config.base_url(),
            endpoints = self.endpoints.len(),
            "service configured"
        );

        Ok(ApiService::new(config, self.endpoints, transport))
    }
}

impl std::fmt::Debug for ApiBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiBuilder")
            .field("base_url", &self.base_url)
            .field("has_credential", &self.credential.is_some())
            .field("endpoints", &self.endpoints.len())
            .finish()
    }
}
