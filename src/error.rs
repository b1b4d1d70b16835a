//! Error types for import resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the importer.
pub type Result<T> = std::result::Result<T, ImportError>;

/// Errors that abort a single resolution call.
///
/// Nothing is retried or partially returned; the error reaches the evaluator
/// unchanged, also through nested (continuous) resolutions.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The address could not be split into prefix, path and query.
    #[error("malformed import string '{address}': {reason}")]
    MalformedAddress { address: String, reason: String },

    /// The pattern (or exclude pattern) is not a valid glob.
    #[error("malformed glob pattern '{pattern}': {reason}")]
    MalformedPattern { pattern: String, reason: String },

    /// The query section could not be decoded.
    #[error("malformed query parameter(s) '{query}': {reason}")]
    MalformedQuery { query: String, reason: String },

    /// An alias cannot be registered under this name.
    #[error("malformed alias '{alias}': {reason}")]
    MalformedAlias { alias: String, reason: String },

    /// No resolver or alias knows this prefix.
    #[error("unknown prefix '{0}'")]
    UnknownPrefix(String),

    /// The pattern matched nothing, or every match was filtered out.
    #[error("{}", empty_result_message(.pattern, .exclude))]
    EmptyResult {
        pattern: String,
        exclude: Option<String>,
    },

    /// Accepting the import would close a cycle in the import graph.
    #[error(
        "import cycle detected with adding '{to}' to '{from}'. DOT-graph stored in '{}'",
        .graph_file.display()
    )]
    ImportCycle {
        from: String,
        to: String,
        graph_file: PathBuf,
    },

    /// An inline configuration key carries a value it doesn't support.
    #[error("unknown config: {key}={value}, {expected}")]
    UnknownConfigValue {
        key: String,
        value: String,
        expected: &'static str,
    },

    /// No registered resolver accepted the address.
    #[error("no importer can handle given path: '{0}'")]
    NoResolver(String),

    /// A plain import was found neither next to the caller nor in any library root.
    #[error("couldn't open import '{address}': no match locally or in the library paths (searched: {})", .searched.join(", "))]
    NotFound {
        address: String,
        searched: Vec<String>,
    },

    /// Reading or writing a file failed.
    #[error("IO error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

fn empty_result_message(pattern: &str, exclude: &Option<String>) -> String {
    match exclude {
        Some(exclude) => format!(
            "empty result, exclude pattern '{exclude}' removed all matches for the glob pattern '{pattern}'"
        ),
        None => format!("empty result for the glob pattern '{pattern}'"),
    }
}

impl ImportError {
    pub fn malformed_address(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedAddress {
            address: address.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed_pattern(pattern: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedPattern {
            pattern: pattern.into(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed_query(query: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedQuery {
            query: query.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed_alias(alias: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedAlias {
            alias: alias.into(),
            reason: reason.into(),
        }
    }

    pub fn empty_result(pattern: impl Into<String>) -> Self {
        Self::EmptyResult {
            pattern: pattern.into(),
            exclude: None,
        }
    }

    pub fn excluded_everything(pattern: impl Into<String>, exclude: impl Into<String>) -> Self {
        Self::EmptyResult {
            pattern: pattern.into(),
            exclude: Some(exclude.into()),
        }
    }

    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this is a missing plain file, the one failure a missing-file
    /// fallback may replace.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
