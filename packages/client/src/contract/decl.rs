//! Endpoint declarations
//!
//! A contract method is declared as data: method-level annotations (request
//! method + relative URL template, fixed headers) and positional parameter
//! bindings. Declarations are parsed into an immutable
//! [`MethodDescriptor`](super::descriptor::MethodDescriptor) on first
//! dispatch and never re-inspected afterwards.

use std::fmt;

use bytes::Bytes;

use crate::error::{self, Result};

/// Request methods an endpoint may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestMethod {
    Get,
    Post,
    Head,
    Options,
    Put,
    Delete,
    Trace,
}

impl RequestMethod {
    /// String form used on the request line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Head => "HEAD",
            RequestMethod::Options => "OPTIONS",
            RequestMethod::Put => "PUT",
            RequestMethod::Delete => "DELETE",
            RequestMethod::Trace => "TRACE",
        }
    }

    /// Convert to the `http` crate method type.
    #[must_use]
    pub fn to_http(self) -> http::Method {
        match self {
            RequestMethod::Get => http::Method::GET,
            RequestMethod::Post => http::Method::POST,
            RequestMethod::Head => http::Method::HEAD,
            RequestMethod::Options => http::Method::OPTIONS,
            RequestMethod::Put => http::Method::PUT,
            RequestMethod::Delete => http::Method::DELETE,
            RequestMethod::Trace => http::Method::TRACE,
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content types the request-method annotation understands.
///
/// A known content type injects a matching `Content-Type` fixed header at
/// descriptor-construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// application/json content type
    Json,
    /// application/x-www-form-urlencoded content type
    FormUrlEncoded,
}

impl ContentType {
    /// Convert content type to its header value representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Json => "application/json",
            ContentType::FormUrlEncoded => "application/x-www-form-urlencoded",
        }
    }
}

/// A method-level annotation on an endpoint declaration.
#[derive(Debug, Clone)]
pub enum MethodAnnotation {
    /// The request-method annotation: method, relative URL template and an
    /// optional content type. Exactly one of these must be present per
    /// endpoint.
    Request {
        method: RequestMethod,
        relative_url: String,
        content_type: Option<ContentType>,
    },
    /// A fixed header carried by every request to this endpoint. Later
    /// declarations for the same key overwrite earlier ones.
    Header { key: String, value: String },
}

/// The declared role of one endpoint parameter.
///
/// Bindings align positionally with the argument slice handed to dispatch;
/// each parameter has exactly one role.
#[derive(Debug, Clone)]
pub enum ParamBinding {
    /// Replace every `{alias}` occurrence in the relative URL with the
    /// stringified argument.
    UrlParam { alias: String },
    /// Insert/overwrite a header whose value comes from the argument. A
    /// `literal` value here is an ambiguous declaration and is rejected when
    /// the request is built -- the value always comes from the argument.
    Header {
        key: String,
        literal: Option<String>,
    },
    /// Append `name=value` to the query string. Values are concatenated
    /// raw, without URL-encoding.
    Query { name: String },
    /// The raw request body. The bound argument must be a byte sequence.
    Body,
}

/// A runtime argument value for a bound parameter.
#[derive(Debug, Clone)]
pub enum ArgValue {
    Text(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Bytes(Bytes),
}

impl ArgValue {
    /// Stringify for URL, header and query bindings.
    ///
    /// Byte arguments have no textual form and may only bind to a body
    /// parameter.
    pub fn stringify(&self) -> Result<String> {
        match self {
            ArgValue::Text(s) => Ok(s.clone()),
            ArgValue::Int(i) => Ok(i.to_string()),
            ArgValue::UInt(u) => Ok(u.to_string()),
            ArgValue::Float(x) => Ok(x.to_string()),
            ArgValue::Bool(b) => Ok(b.to_string()),
            ArgValue::Bytes(_) => Err(error::configuration(
                "byte arguments can only bind to a body parameter",
            )),
        }
    }

    /// The raw bytes of this argument, when it is a byte sequence.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            ArgValue::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Text(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::Text(value)
    }
}

impl From<i32> for ArgValue {
    fn from(value: i32) -> Self {
        ArgValue::Int(i64::from(value))
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Int(value)
    }
}

impl From<u32> for ArgValue {
    fn from(value: u32) -> Self {
        ArgValue::UInt(u64::from(value))
    }
}

impl From<u64> for ArgValue {
    fn from(value: u64) -> Self {
        ArgValue::UInt(value)
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        ArgValue::Float(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Bool(value)
    }
}

impl From<Bytes> for ArgValue {
    fn from(value: Bytes) -> Self {
        ArgValue::Bytes(value)
    }
}

impl From<Vec<u8>> for ArgValue {
    fn from(value: Vec<u8>) -> Self {
        ArgValue::Bytes(Bytes::from(value))
    }
}

/// Declaration of one contract endpoint: its method-level annotations plus
/// the ordered parameter bindings.
///
/// # Examples
/// ```
/// use restbind_client::contract::EndpointDecl;
///
/// let decl = EndpointDecl::get("app/{name}/profile")
///     .header("Accept", "application/json")
///     .url_param("name")
///     .query_param("type");
/// ```
#[derive(Debug, Clone, Default)]
pub struct EndpointDecl {
    pub(crate) annotations: Vec<MethodAnnotation>,
    pub(crate) bindings: Vec<ParamBinding>,
}

impl EndpointDecl {
    /// An empty declaration with no annotations.
    ///
    /// Parsing rejects declarations without a request-method annotation;
    /// start from [`EndpointDecl::get`] and friends unless the annotations
    /// are assembled dynamically.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a request-method annotation.
    ///
    /// The content type defaults to JSON, as the original contract surface
    /// does; override with [`EndpointDecl::content_type`].
    #[must_use]
    pub fn request(mut self, method: RequestMethod, relative_url: &str) -> Self {
        self.annotations.push(MethodAnnotation::Request {
            method,
            relative_url: relative_url.to_string(),
            content_type: Some(ContentType::Json),
        });
        self
    }

    /// Declare a GET endpoint with the given relative URL template.
    #[must_use]
    pub fn get(relative_url: &str) -> Self {
        Self::new().request(RequestMethod::Get, relative_url)
    }

    /// Declare a POST endpoint with the given relative URL template.
    #[must_use]
    pub fn post(relative_url: &str) -> Self {
        Self::new().request(RequestMethod::Post, relative_url)
    }

    /// Declare a HEAD endpoint with the given relative URL template.
    #[must_use]
    pub fn head(relative_url: &str) -> Self {
        Self::new().request(RequestMethod::Head, relative_url)
    }

    /// Declare an OPTIONS endpoint with the given relative URL template.
    #[must_use]
    pub fn options(relative_url: &str) -> Self {
        Self::new().request(RequestMethod::Options, relative_url)
    }

    /// Declare a PUT endpoint with the given relative URL template.
    #[must_use]
    pub fn put(relative_url: &str) -> Self {
        Self::new().request(RequestMethod::Put, relative_url)
    }

    /// Declare a DELETE endpoint with the given relative URL template.
    #[must_use]
    pub fn delete(relative_url: &str) -> Self {
        Self::new().request(RequestMethod::Delete, relative_url)
    }

    /// Declare a TRACE endpoint with the given relative URL template.
    #[must_use]
    pub fn trace(relative_url: &str) -> Self {
        Self::new().request(RequestMethod::Trace, relative_url)
    }

    /// Set the content type on the most recent request-method annotation.
    #[must_use]
    pub fn content_type(mut self, content_type: ContentType) -> Self {
        for annotation in self.annotations.iter_mut().rev() {
            if let MethodAnnotation::Request {
                content_type: slot, ..
            } = annotation
            {
                *slot = Some(content_type);
                break;
            }
        }
        self
    }

    /// Declare a fixed header sent with every request to this endpoint.
    #[must_use]
    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.annotations.push(MethodAnnotation::Header {
            key: key.to_string(),
            value: value.to_string(),
        });
        self
    }

    /// Append an arbitrary parameter binding.
    #[must_use]
    pub fn param(mut self, binding: ParamBinding) -> Self {
        self.bindings.push(binding);
        self
    }

    /// Bind the next parameter to a `{alias}` URL placeholder.
    #[must_use]
    pub fn url_param(self, alias: &str) -> Self {
        self.param(ParamBinding::UrlParam {
            alias: alias.to_string(),
        })
    }

    /// Bind the next parameter to a header entry.
    #[must_use]
    pub fn header_param(self, key: &str) -> Self {
        self.param(ParamBinding::Header {
            key: key.to_string(),
            literal: None,
        })
    }

    /// Bind the next parameter to a query entry.
    #[must_use]
    pub fn query_param(self, name: &str) -> Self {
        self.param(ParamBinding::Query {
            name: name.to_string(),
        })
    }

    /// Bind the next parameter to the request body.
    #[must_use]
    pub fn body_param(self) -> Self {
        self.param(ParamBinding::Body)
    }

    /// The declared parameter bindings, in declaration order.
    #[must_use]
    pub fn bindings(&self) -> &[ParamBinding] {
        &self.bindings
    }
}
