//! Request body helpers

use bytes::Bytes;

use crate::error::{self, Result};

/// Encode key/value pairs as an `application/x-www-form-urlencoded` body.
///
/// Pair declarations that form-bound endpoints hand to a body parameter,
/// e.g. `k1=v1&k2=v2` as bytes after the headers.
pub fn form_body<K: AsRef<str>, V: AsRef<str>>(pairs: &[(K, V)]) -> Result<Bytes> {
    let pairs: Vec<(&str, &str)> = pairs
        .iter()
        .map(|(k, v)| (k.as_ref(), v.as_ref()))
        .collect();
    let encoded = serde_urlencoded::to_string(pairs).map_err(error::builder)?;
    Ok(Bytes::from(encoded.into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_pairs() {
        let body = form_body(&[("user", "alice"), ("scope", "read write")]).expect("encode");
        assert_eq!(body.as_ref(), b"user=alice&scope=read+write");
    }
}
