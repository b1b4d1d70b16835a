//! Import address parsing.
//!
//! An import address has the shape
//!
//! ```text
//! [<prefix>://]<path-or-pattern>[?<key>=<value>&...]
//! ```
//!
//! The parser only decomposes; it never interprets the prefix. Markers such
//! as the `+` merge suffix or the `glob-str` string-import form stay part of
//! the prefix token and are handled by the resolver that owns it.

mod query;

pub use query::QueryParams;

use smol_str::SmolStr;

use crate::base::constants::PREFIX_SEPARATOR;
use crate::error::{ImportError, Result};

/// An import address split into its three parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAddress {
    prefix: SmolStr,
    path: String,
    raw_query: String,
    query: QueryParams,
}

impl ParsedAddress {
    /// Parse an import address.
    ///
    /// Addresses without `://` are plain file imports: the prefix is empty,
    /// the whole string is the path and no query is split off.
    pub fn parse(address: &str) -> Result<Self> {
        if address.is_empty() {
            return Err(ImportError::malformed_address(address, "empty import string"));
        }
        if address.chars().any(char::is_control) {
            return Err(ImportError::malformed_address(
                address,
                "invalid control character in import string",
            ));
        }

        let Some((prefix, rest)) = split_prefix(address)? else {
            return Ok(Self {
                prefix: SmolStr::default(),
                path: address.to_string(),
                raw_query: String::new(),
                query: QueryParams::default(),
            });
        };

        let (path, raw_query) = rest.split_once('?').unwrap_or((rest, ""));
        let query = QueryParams::parse(raw_query)?;

        Ok(Self {
            prefix: SmolStr::new(prefix),
            path: path.to_string(),
            raw_query: raw_query.to_string(),
            query,
        })
    }

    /// Resolver prefix (scheme) exactly as written; empty for plain imports.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Path or glob pattern between the prefix and the query.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Undecoded query section (without the leading `?`).
    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    pub fn is_plain(&self) -> bool {
        self.prefix.is_empty()
    }
}

/// Splits `<prefix>://<rest>`.
///
/// Returns `None` when the text before `://` can't be a prefix at all (it
/// contains a separator or other non-scheme characters), so plain paths with
/// an embedded `://` still parse as plain imports.
fn split_prefix(address: &str) -> Result<Option<(&str, &str)>> {
    let Some(idx) = address.find(PREFIX_SEPARATOR) else {
        return Ok(None);
    };
    let prefix = &address[..idx];

    if !prefix
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    {
        return Ok(None);
    }

    match prefix.chars().next() {
        None => Err(ImportError::malformed_address(address, "missing prefix before '://'")),
        Some(first) if !first.is_ascii_alphabetic() => Err(ImportError::malformed_address(
            address,
            format!("prefix '{prefix}' must start with a letter"),
        )),
        Some(_) => Ok(Some((prefix, &address[idx + PREFIX_SEPARATOR.len()..]))),
    }
}
