//! Per-endpoint request builder
//!
//! One [`RequestBuilder`] exists per contract endpoint, created on first
//! dispatch and reused for the lifetime of the client. `build` is a pure
//! function from (base URL, argument values) to a fresh
//! [`ResolvedRequest`]: every call starts from the immutable descriptor and
//! folds the declared bindings over this call's arguments, so no state can
//! leak between calls and concurrent builds need no lock.

use std::sync::Arc;

use bytes::Bytes;
use http::HeaderMap;

use crate::contract::descriptor::insert_header;
use crate::contract::{ArgValue, MethodDescriptor, ParamBinding};
use crate::error::{self, Result};
use crate::http::request::ResolvedRequest;

/// In-progress request state threaded through binding application.
struct BuildState {
    headers: HeaderMap,
    relative_url: String,
    query: String,
    body: Option<Bytes>,
}

/// Builds concrete requests for one contract endpoint.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    descriptor: Arc<MethodDescriptor>,
    bindings: Vec<ParamBinding>,
}

impl RequestBuilder {
    /// Create a builder from a parsed descriptor and the endpoint's
    /// parameter bindings.
    #[must_use]
    pub fn new(descriptor: MethodDescriptor, bindings: Vec<ParamBinding>) -> Self {
        Self {
            descriptor: Arc::new(descriptor),
            bindings,
        }
    }

    /// The descriptor this builder materializes requests from.
    #[must_use]
    pub fn descriptor(&self) -> &MethodDescriptor {
        &self.descriptor
    }

    /// Materialize a request from this call's argument values.
    ///
    /// `base_url` must end with `/`; `args` align positionally with the
    /// declared bindings. Bindings are applied in declaration order:
    /// URL-placeholder substitution, header entries, query accumulation and
    /// the body assignment, then the query string is appended once and the
    /// link is formed by concatenation.
    pub fn build(&self, base_url: &str, args: &[ArgValue]) -> Result<ResolvedRequest> {
        if args.len() != self.bindings.len() {
            return Err(error::configuration(format!(
                "endpoint declares {} bound parameters but {} arguments were supplied",
                self.bindings.len(),
                args.len()
            )));
        }

        let mut state = BuildState {
            headers: self.descriptor.fixed_headers().clone(),
            relative_url: self.descriptor.relative_url().to_string(),
            query: String::new(),
            body: None,
        };

        for (binding, value) in self.bindings.iter().zip(args) {
            apply(binding, value, &mut state)?;
        }

        if !state.query.is_empty() {
            state.relative_url.push('?');
            state.relative_url.push_str(&state.query);
        }

        let url = format!("{base_url}{}", state.relative_url);

        Ok(ResolvedRequest::new(
            self.descriptor.request_method(),
            url,
            state.headers,
            state.body,
        ))
    }
}

/// Fold one (binding, argument) pair into the in-progress request state.
fn apply(binding: &ParamBinding, value: &ArgValue, state: &mut BuildState) -> Result<()> {
    match binding {
        ParamBinding::UrlParam { alias } => {
            // url: app/{name}, alias: name, value: gpscompass -> app/gpscompass
            let target = format!("{{{alias}}}");
            let replacement = value.stringify()?;
            while state.relative_url.contains(&target) {
                state.relative_url = state.relative_url.replace(&target, &replacement);
            }
            Ok(())
        }
        ParamBinding::Header { key, literal } => {
            if literal.is_some() {
                return Err(error::configuration(format!(
                    "header binding `{key}` must not carry a literal value; the value comes from the argument"
                )));
            }
            insert_header(&mut state.headers, key, &value.stringify()?)
        }
        ParamBinding::Query { name } => {
            if !state.query.is_empty() {
                state.query.push('&');
            }
            state.query.push_str(name);
            state.query.push('=');
            state.query.push_str(&value.stringify()?);
            Ok(())
        }
        ParamBinding::Body => {
            let bytes = value.as_bytes().ok_or_else(|| {
                error::configuration("body parameter must be bound to a byte sequence")
            })?;
            state.body = Some(bytes.clone());
            Ok(())
        }
    }
}
