//! Client configuration
//!
//! [`ServiceConfig`] is the validated, normalized configuration an
//! [`ApiService`](crate::service::ApiService) runs with. [`ServerConfig`]
//! mirrors the JSON config-file shape and overlays onto a `ServiceConfig`,
//! overriding only the fields it actually carries.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::auth;
use crate::error::{self, Result};

/// Default connect timeout: 15 seconds.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Default read timeout: 30 seconds.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Validated client configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    base_url: String,
    credential: Option<String>,
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl ServiceConfig {
    /// Create a configuration for the given base URL.
    ///
    /// The URL must be absolute; a trailing `/` is appended when missing so
    /// relative URLs can be concatenated directly.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let mut config = Self {
            base_url: String::new(),
            credential: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
        };
        config.set_base_url(base_url)?;
        Ok(config)
    }

    fn set_base_url(&mut self, base_url: impl Into<String>) -> Result<()> {
        let mut base_url = base_url.into();
        if base_url.is_empty() {
            return Err(error::configuration("must specify non-empty base URL"));
        }
        Url::parse(&base_url)
            .map_err(|e| error::configuration(format!("base URL must be absolute: {e}")))?;
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        Ok(())
    }

    /// Set the basic-auth credential from a pre-encoded base64 value.
    #[must_use]
    pub fn with_basic_credential(mut self, base64_credential: &str) -> Self {
        self.credential = Some(format!("Basic {base64_credential}"));
        self
    }

    /// Set the basic-auth credential from username and password.
    #[must_use]
    pub fn with_basic_auth(self, username: &str, password: &str) -> Self {
        let credential = auth::encode_basic_credential(username, password);
        self.with_basic_credential(&credential)
    }

    /// Set the connect timeout.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the read timeout.
    #[must_use]
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Overlay a structured config source.
    ///
    /// Fields override only when present (URL, credentials) or positive
    /// (timeouts).
    pub fn apply_server_config(&mut self, server: &ServerConfig) -> Result<()> {
        if let Some(ref base_url) = server.base_url {
            self.set_base_url(base_url.clone())?;
        }
        if server.basic_auth_username.is_some() || server.basic_auth_password.is_some() {
            let username = server.basic_auth_username.as_deref().unwrap_or_default();
            let password = server.basic_auth_password.as_deref().unwrap_or_default();
            let credential = auth::encode_basic_credential(username, password);
            self.credential = Some(format!("Basic {credential}"));
        }
        if server.connect_timeout_millis > 0 {
            self.connect_timeout = Duration::from_millis(server.connect_timeout_millis);
        }
        if server.read_timeout_millis > 0 {
            self.read_timeout = Duration::from_millis(server.read_timeout_millis);
        }
        Ok(())
    }

    /// The normalized base URL, always ending with `/`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The full `Authorization` value for the client-level credential.
    #[must_use]
    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    /// Connect timeout passed through to the transport.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Read timeout passed through to the transport.
    #[must_use]
    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }
}

/// JSON config-file shape.
///
/// All fields are optional; absent or non-positive values leave the
/// programmatic configuration untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    pub base_url: Option<String>,
    pub basic_auth_username: Option<String>,
    pub basic_auth_password: Option<String>,
    pub connect_timeout_millis: u64,
    pub read_timeout_millis: u64,
}

impl ServerConfig {
    /// Parse a config from its JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(error::decode)
    }

    /// Load a config from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(error::configuration)?;
        Self::from_json(&json)
    }
}
