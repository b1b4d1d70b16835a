//! Query section decoding (`key=value&flag&key=other`).

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use url::form_urlencoded;

use crate::error::{ImportError, Result};

/// Decoded query parameters.
///
/// Keys keep the order of their first appearance; repeated keys collect all
/// their values in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: IndexMap<String, Vec<String>, FxBuildHasher>,
}

impl QueryParams {
    /// Decode a raw query (without the leading `?`).
    ///
    /// `;` separators and broken `%` escapes are rejected; empty segments are
    /// skipped and a key without `=` gets an empty value.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut params: IndexMap<String, Vec<String>, FxBuildHasher> = IndexMap::default();

        for segment in raw.split('&') {
            if segment.is_empty() {
                continue;
            }
            if segment.contains(';') {
                return Err(ImportError::malformed_query(
                    raw,
                    "invalid semicolon separator in query",
                ));
            }
            validate_escapes(raw, segment)?;

            for (key, value) in form_urlencoded::parse(segment.as_bytes()) {
                params
                    .entry(key.into_owned())
                    .or_default()
                    .push(value.into_owned());
            }
        }

        Ok(Self { params })
    }

    /// All values given for `key`.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.params.get(key).map(Vec::as_slice)
    }

    /// First value given for `key`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Keys in first-appearance order with their values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.params
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }
}

fn validate_escapes(raw: &str, segment: &str) -> Result<()> {
    let bytes = segment.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                let end = (i + 3).min(bytes.len());
                return Err(ImportError::malformed_query(
                    raw,
                    format!(
                        "invalid URL escape '{}'",
                        String::from_utf8_lossy(&bytes[i..end])
                    ),
                ));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}
