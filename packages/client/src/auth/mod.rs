//! Basic authentication utilities

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use http::HeaderValue;

use crate::error::{self, Result};

/// Encode `username:password` as the base64 credential used by basic auth.
#[must_use]
pub fn encode_basic_credential(username: &str, password: &str) -> String {
    let pair = format!("{username}:{password}");
    BASE64_STANDARD.encode(pair.as_bytes())
}

/// Build the full `Authorization` header value from a base64 credential.
pub fn basic_auth_value(base64_credential: &str) -> Result<HeaderValue> {
    let mut header = HeaderValue::from_str(&format!("Basic {base64_credential}"))
        .map_err(|_| error::invalid_header("invalid characters in basic-auth credential"))?;
    header.set_sensitive(true);
    Ok(header)
}
