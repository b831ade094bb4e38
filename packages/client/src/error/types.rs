use std::error::Error as StdError;
use std::fmt;

use http::StatusCode;

/// A Result alias where the Err case is `restbind_client::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents errors that can occur while declaring contracts, building
/// requests, or executing them.
#[derive(Clone)]
pub struct Error {
    pub(crate) inner: Box<Inner>,
}

pub(crate) struct Inner {
    pub(crate) kind: Kind,
    pub(crate) source: Option<Box<dyn StdError + Send + Sync>>,
    pub(crate) url: Option<String>,
}

impl Clone for Inner {
    fn clone(&self) -> Self {
        Inner {
            kind: self.kind.clone(),
            source: None, // Cannot clone trait objects, so we lose the source
            url: self.url.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Kind {
    /// Contract or client configuration rejected before any I/O.
    Config,
    /// Request could not be materialized from its bindings.
    Builder,
    /// Transport-level failure that produced no response at all.
    Request,
    /// Request timed out inside the transport.
    Timeout,
    /// Non-success HTTP status surfaced by a typed call.
    Status(StatusCode, Option<String>),
    /// Response body could not be read.
    Body,
    /// Response body could not be decoded to the requested type.
    Decode,
}

impl Error {
    pub(crate) fn new(kind: Kind) -> Error {
        Error {
            inner: Box::new(Inner {
                kind,
                source: None,
                url: None,
            }),
        }
    }

    #[must_use = "Error builder methods return a new Error and should be used"]
    pub(crate) fn with<E: Into<Box<dyn StdError + Send + Sync>>>(mut self, source: E) -> Error {
        self.inner.source = Some(source.into());
        self
    }

    #[must_use]
    pub(crate) fn with_url(mut self, url: impl Into<String>) -> Self {
        self.inner.url = Some(url.into());
        self
    }

    /// Get the URL associated with this error, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.inner.url.as_deref()
    }

    /// True when the contract declaration or client configuration was at fault.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self.inner.kind, Kind::Config | Kind::Builder)
    }

    /// True when the transport failed without producing a response.
    #[must_use]
    pub fn is_request(&self) -> bool {
        matches!(self.inner.kind, Kind::Request)
    }

    /// True when the transport timed out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self.inner.kind, Kind::Timeout)
    }

    /// True when a typed call observed a non-success status.
    #[must_use]
    pub fn is_status(&self) -> bool {
        matches!(self.inner.kind, Kind::Status(..))
    }

    /// True when the response body failed to decode.
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self.inner.kind, Kind::Decode)
    }

    /// The HTTP status carried by this error, when there is one.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self.inner.kind {
            Kind::Status(code, _) => Some(code),
            _ => None,
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("restbind::Error");

        f.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }

        if let Some(ref url) = self.inner.url {
            f.field("url", url);
        }

        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.kind {
            Kind::Config => f.write_str("configuration error")?,
            Kind::Builder => f.write_str("error building request")?,
            Kind::Request => f.write_str("error sending request")?,
            Kind::Timeout => f.write_str("request timeout")?,
            Kind::Body => f.write_str("response body error")?,
            Kind::Decode => f.write_str("error decoding response body")?,
            Kind::Status(code, message) => {
                let prefix = if code.is_client_error() {
                    "HTTP status client error"
                } else if code.is_server_error() {
                    "HTTP status server error"
                } else {
                    "HTTP status error"
                };
                if let Some(message) = message {
                    write!(f, "{prefix} ({} {message})", code.as_str())?;
                } else {
                    write!(f, "{prefix} ({code})")?;
                }
            }
        }

        if let Some(ref url) = self.inner.url {
            write!(f, " for url ({url})")?;
        }

        if let Some(ref source) = self.inner.source {
            write!(f, ": {source}")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}
