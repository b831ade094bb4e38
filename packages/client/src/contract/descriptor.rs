//! Parsed endpoint metadata
//!
//! A [`MethodDescriptor`] is the once-parsed, immutable form of an
//! [`EndpointDecl`]: request method, trimmed relative URL template and the
//! fixed header set. It is constructed the first time an endpoint is
//! dispatched and shared read-only across all later calls.

use std::str::FromStr;

use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderName, HeaderValue};

use super::decl::{EndpointDecl, MethodAnnotation, RequestMethod};
use crate::error::{self, Result};

/// Immutable per-endpoint request metadata.
#[derive(Debug, Clone)]
pub struct MethodDescriptor {
    request_method: RequestMethod,
    relative_url: String,
    fixed_headers: HeaderMap,
}

impl MethodDescriptor {
    /// Parse an endpoint declaration into its descriptor.
    ///
    /// Annotations are processed in declaration order: fixed headers
    /// accumulate with last-wins semantics, and a known content type on the
    /// request-method annotation injects a `Content-Type` header at the
    /// point it appears. Declaring zero or more than one request-method
    /// annotation is a configuration error.
    pub fn parse(endpoint: &str, decl: &EndpointDecl) -> Result<Self> {
        let mut request: Option<(RequestMethod, String)> = None;
        let mut fixed_headers = HeaderMap::new();

        for annotation in &decl.annotations {
            match annotation {
                MethodAnnotation::Header { key, value } => {
                    insert_header(&mut fixed_headers, key, value)?;
                }
                MethodAnnotation::Request {
                    method,
                    relative_url,
                    content_type,
                } => {
                    if request.is_some() {
                        return Err(error::configuration(format!(
                            "can specify only one request method on endpoint `{endpoint}`"
                        )));
                    }
                    request = Some((*method, relative_url.trim_matches('/').to_string()));
                    if let Some(content_type) = content_type {
                        fixed_headers.insert(
                            CONTENT_TYPE,
                            HeaderValue::from_static(content_type.as_str()),
                        );
                    }
                }
            }
        }

        let (request_method, relative_url) = request.ok_or_else(|| {
            error::configuration(format!(
                "missing request method annotation on endpoint `{endpoint}`"
            ))
        })?;

        Ok(Self {
            request_method,
            relative_url,
            fixed_headers,
        })
    }

    /// The declared request method.
    #[must_use]
    pub fn request_method(&self) -> RequestMethod {
        self.request_method
    }

    /// The relative URL template, trimmed of leading/trailing `/`.
    #[must_use]
    pub fn relative_url(&self) -> &str {
        &self.relative_url
    }

    /// The fixed headers sent with every request to this endpoint.
    #[must_use]
    pub fn fixed_headers(&self) -> &HeaderMap {
        &self.fixed_headers
    }
}

/// Insert a string-keyed header, validating name and value.
pub(crate) fn insert_header(headers: &mut HeaderMap, key: &str, value: &str) -> Result<()> {
    let name = HeaderName::from_str(key)
        .map_err(|e| error::invalid_header(format!("invalid header name `{key}`: {e}")))?;
    let value = HeaderValue::from_str(value)
        .map_err(|e| error::invalid_header(format!("invalid value for header `{key}`: {e}")))?;
    headers.insert(name, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::ContentType;

    #[test]
    fn parses_get_declaration() {
        let decl = EndpointDecl::get("/user/{id}/profile/");
        let descriptor = MethodDescriptor::parse("profile", &decl).expect("parse");

        assert_eq!(descriptor.request_method(), RequestMethod::Get);
        assert_eq!(descriptor.relative_url(), "user/{id}/profile");
        assert_eq!(
            descriptor.fixed_headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn missing_request_method_is_rejected() {
        let decl = EndpointDecl::new().header("Accept", "application/json");
        let err = MethodDescriptor::parse("orphan", &decl).unwrap_err();

        assert!(err.is_config());
        assert!(err.to_string().contains("orphan"));
    }

    #[test]
    fn second_request_method_is_rejected() {
        let decl = EndpointDecl::get("a").request(RequestMethod::Post, "b");
        let err = MethodDescriptor::parse("double", &decl).unwrap_err();

        assert!(err.is_config());
        assert!(err.to_string().contains("only one request method"));
    }

    #[test]
    fn later_header_declaration_wins() {
        let decl = EndpointDecl::get("ping")
            .header("X-Env", "staging")
            .header("X-Env", "production");
        let descriptor = MethodDescriptor::parse("ping", &decl).expect("parse");

        assert_eq!(descriptor.fixed_headers().get("X-Env").unwrap(), "production");
        assert_eq!(descriptor.fixed_headers().get_all("X-Env").iter().count(), 1);
    }

    #[test]
    fn form_content_type_injects_header() {
        let decl = EndpointDecl::post("login").content_type(ContentType::FormUrlEncoded);
        let descriptor = MethodDescriptor::parse("login", &decl).expect("parse");

        assert_eq!(
            descriptor.fixed_headers().get(CONTENT_TYPE).unwrap(),
            "application/x-www-form-urlencoded"
        );
    }

    #[test]
    fn explicit_header_after_request_overrides_injected_content_type() {
        let decl = EndpointDecl::get("data").header("Content-Type", "text/plain");
        let descriptor = MethodDescriptor::parse("data", &decl).expect("parse");

        assert_eq!(descriptor.fixed_headers().get(CONTENT_TYPE).unwrap(), "text/plain");
    }

    #[test]
    fn invalid_fixed_header_name_is_rejected() {
        let decl = EndpointDecl::get("ping").header("bad header", "x");
        let err = MethodDescriptor::parse("ping", &decl).unwrap_err();

        assert!(err.is_config());
    }
}
