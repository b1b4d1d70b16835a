//! Resolvers: the units the dispatcher routes addresses to.
//!
//! A resolver claims prefixes through [`Resolver::can_handle`] and turns an
//! address into content for the evaluator. The dispatcher asks resolvers in
//! registration order; the plain-file [`FileResolver`] always comes last and
//! accepts everything.

mod file_resolver;
mod glob_resolver;
mod prefix;

pub use file_resolver::FileResolver;
pub use glob_resolver::GlobResolver;
pub use prefix::{PrefixSpec, PrefixTable};

use crate::error::{ImportError, Result};
use crate::session::Session;

/// Content handed to the evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub content: String,
    /// Location the evaluator caches the content under and resolves relative
    /// imports inside it against.
    pub found_at: String,
}

impl Resolution {
    pub fn new(content: impl Into<String>, found_at: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            found_at: found_at.into(),
        }
    }
}

pub trait Resolver: Send + Sync {
    /// Name used in log events.
    fn name(&self) -> &str;

    /// Whether this resolver owns `prefix` (as parsed, possibly an alias).
    fn can_handle(&self, prefix: &str) -> bool;

    /// Every prefix and alias this resolver accepts.
    fn prefixes(&self) -> Vec<String>;

    /// Resolves `address` as imported from `caller`.
    fn resolve(&self, session: &mut Session, caller: &str, address: &str) -> Result<Resolution>;

    /// Binds `alias` to one of this resolver's canonical prefixes.
    fn register_alias(&mut self, _alias: &str, canonical: &str) -> Result<()> {
        Err(ImportError::UnknownPrefix(canonical.to_string()))
    }

    /// The fallback accepts every address and is always consulted last.
    fn is_fallback(&self) -> bool {
        false
    }
}
