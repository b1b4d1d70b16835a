//! Pattern prefixes and their aliases.
//!
//! A canonical prefix spells out how its matches are rendered:
//!
//! ```text
//! glob[-str] . <path|file|dir|stem> [+]
//! glob[-str] +
//! ```
//!
//! `-str` selects `importstr`, the group mode picks the key function and a
//! trailing `+` concatenates colliding keys instead of overwriting them.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::base::constants::{CONCAT_SUFFIX, CONFIG_PREFIX, GLOB_PREFIX, GLOB_STR_PREFIX, PREFIX_SEPARATOR};
use crate::error::{ImportError, Result};
use crate::merge::{GroupMode, ImportKind, MergePolicy};

/// Rendering selected by a canonical prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixSpec {
    pub kind: ImportKind,
    /// `None` renders every match joined with `+`.
    pub grouping: Option<(GroupMode, MergePolicy)>,
}

impl PrefixSpec {
    pub fn parse(canonical: &str) -> Option<Self> {
        let (kind, rest) = match canonical.strip_prefix(GLOB_STR_PREFIX) {
            Some(rest) => (ImportKind::Text, rest),
            None => (ImportKind::Content, canonical.strip_prefix(GLOB_PREFIX)?),
        };

        if rest.len() == 1 && rest.ends_with(CONCAT_SUFFIX) {
            return Some(Self { kind, grouping: None });
        }

        let mode = rest.strip_prefix('.')?;
        let (mode, policy) = match mode.strip_suffix(CONCAT_SUFFIX) {
            Some(mode) => (mode, MergePolicy::Concatenate),
            None => (mode, MergePolicy::Overwrite),
        };

        Some(Self {
            kind,
            grouping: Some((GroupMode::from_name(mode)?, policy)),
        })
    }
}

/// Canonical prefixes plus a one-to-one alias binding.
#[derive(Debug, Clone)]
pub struct PrefixTable {
    canonical: &'static [&'static str],
    /// alias → canonical
    aliases: IndexMap<String, String, FxBuildHasher>,
    /// canonical → alias
    bound: IndexMap<String, String, FxBuildHasher>,
}

impl PrefixTable {
    pub fn new(canonical: &'static [&'static str]) -> Self {
        Self {
            canonical,
            aliases: IndexMap::default(),
            bound: IndexMap::default(),
        }
    }

    pub fn is_canonical(&self, prefix: &str) -> bool {
        self.canonical.contains(&prefix)
    }

    /// Canonical prefix for `prefix`, looking through aliases first.
    pub fn canonical(&self, prefix: &str) -> Option<&str> {
        if let Some(canonical) = self.aliases.get(prefix) {
            return Some(canonical.as_str());
        }
        self.canonical.iter().copied().find(|c| *c == prefix)
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.canonical(prefix).is_some()
    }

    pub fn alias_of(&self, canonical: &str) -> Option<&str> {
        self.bound.get(canonical).map(String::as_str)
    }

    /// Binds `alias` to `canonical`.
    ///
    /// A trailing `://` on the alias is accepted and dropped. Rebinding
    /// either side drops its previous partner so the table stays one to one.
    pub fn register(&mut self, alias: &str, canonical: &str) -> Result<()> {
        if !self.is_canonical(canonical) {
            return Err(ImportError::UnknownPrefix(canonical.to_string()));
        }

        let alias = alias.strip_suffix(PREFIX_SEPARATOR).unwrap_or(alias);
        validate_alias(alias)?;
        if self.is_canonical(alias) || alias == CONFIG_PREFIX {
            return Err(ImportError::malformed_alias(
                alias,
                "shadows a built-in prefix",
            ));
        }

        if let Some(previous) = self.aliases.shift_remove(alias) {
            self.bound.shift_remove(&previous);
        }
        if let Some(previous) = self.bound.shift_remove(canonical) {
            self.aliases.shift_remove(&previous);
        }

        self.aliases.insert(alias.to_string(), canonical.to_string());
        self.bound.insert(canonical.to_string(), alias.to_string());
        Ok(())
    }

    /// Canonical prefixes followed by the registered aliases.
    pub fn prefixes(&self) -> Vec<String> {
        self.canonical
            .iter()
            .map(|c| c.to_string())
            .chain(self.aliases.keys().cloned())
            .collect()
    }
}

/// An alias must parse back as a prefix: a letter followed by letters,
/// digits, `+`, `-` or `.`.
fn validate_alias(alias: &str) -> Result<()> {
    let mut chars = alias.chars();
    match chars.next() {
        None => Err(ImportError::malformed_alias(alias, "empty alias")),
        Some(first) if !first.is_ascii_alphabetic() => Err(ImportError::malformed_alias(
            alias,
            "must start with a letter",
        )),
        Some(_) if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) => Err(
            ImportError::malformed_alias(alias, "only letters, digits, '+', '-' and '.' are allowed"),
        ),
        Some(_) => Ok(()),
    }
}
