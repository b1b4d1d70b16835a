//! Inline configuration carried by `config://` addresses.

use tracing::warn;

use crate::address::QueryParams;
use crate::base::constants::{
    DEFAULT_IMPORT_GRAPH_FILE, QUERY_IGNORE_IMPORT_CYCLES, QUERY_IMPORT_GRAPH, QUERY_LOG_LEVEL,
    QUERY_ON_MISSING_FILE,
};
use crate::error::{ImportError, Result};

/// How much the session reports about its own work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LogLevel {
    /// Only warnings.
    #[default]
    Off,
    /// One event per routed resolution.
    Info,
    /// Parsed addresses, search roots, matched files and rendered output.
    Debug,
}

impl LogLevel {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            _ => None,
        }
    }
}

/// What to hand back when a plain import doesn't exist.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MissingFileFallback {
    /// Fixed content, e.g. `{}`.
    Literal(String),
    /// Another file, resolved like a plain import from the same caller.
    File(String),
}

impl MissingFileFallback {
    /// A value wrapped in matching `'` or `"` is literal content; anything
    /// else names a file.
    pub fn parse(value: &str) -> Option<Self> {
        if value.is_empty() {
            return None;
        }
        for quote in ['\'', '"'] {
            if let Some(inner) = value
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
            {
                return Some(Self::Literal(inner.to_string()));
            }
        }
        Some(Self::File(value.to_string()))
    }
}

/// Where the import graph goes and whether it's written after every import.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GraphOutput {
    pub path: String,
    pub enabled: bool,
}

impl Default for GraphOutput {
    fn default() -> Self {
        Self {
            path: DEFAULT_IMPORT_GRAPH_FILE.to_string(),
            enabled: false,
        }
    }
}

/// Session settings, changeable mid-evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InlineConfig {
    pub log_level: LogLevel,
    pub check_cycles: bool,
    pub import_graph: GraphOutput,
    pub on_missing_file: Option<MissingFileFallback>,
}

impl Default for InlineConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Off,
            check_cycles: true,
            import_graph: GraphOutput::default(),
            on_missing_file: None,
        }
    }
}

impl InlineConfig {
    /// Applies the parameters of a `config://` address.
    ///
    /// Either every recognized key is applied or, on the first invalid
    /// value, none is.
    pub fn apply_query(&mut self, query: &QueryParams) -> Result<()> {
        let mut next = self.clone();

        for (key, values) in query.iter() {
            let value = values.first().map(String::as_str).unwrap_or_default();
            match key {
                QUERY_LOG_LEVEL => {
                    next.log_level = LogLevel::from_name(value).ok_or_else(|| {
                        unknown_value(key, value, "supported are 'logLevel=debug' or 'logLevel=info'")
                    })?;
                }
                QUERY_IMPORT_GRAPH => {
                    if value.is_empty() {
                        return Err(unknown_value(key, value, "expected a file name"));
                    }
                    next.import_graph = GraphOutput {
                        path: value.to_string(),
                        enabled: true,
                    };
                }
                QUERY_IGNORE_IMPORT_CYCLES => {
                    next.check_cycles = match value {
                        "" | "true" => false,
                        "false" => true,
                        _ => {
                            return Err(unknown_value(
                                key,
                                value,
                                "supported are 'ignoreImportCycles', '=true' or '=false'",
                            ));
                        }
                    };
                }
                QUERY_ON_MISSING_FILE => {
                    next.on_missing_file = Some(MissingFileFallback::parse(value).ok_or_else(
                        || unknown_value(key, value, "expected a quoted literal or a file name"),
                    )?);
                }
                _ => warn!("[CONFIG] ignoring unknown config key '{}'", key),
            }
        }

        *self = next;
        Ok(())
    }
}

fn unknown_value(key: &str, value: &str, expected: &'static str) -> ImportError {
    ImportError::UnknownConfigValue {
        key: key.to_string(),
        value: value.to_string(),
        expected,
    }
}
