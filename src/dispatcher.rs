//! Entry point for the evaluator.
//!
//! ```text
//! resolve(caller, address)
//!   ├─ config://…         → apply inline config, return `{}`
//!   ├─ cycle check        → ImportCycle (dump written)
//!   ├─ persist graph      (if enabled)
//!   ├─ advance counter
//!   └─ first resolver whose can_handle accepts the prefix
//!        └─ fallback NotFound → missing-file substitute (if configured)
//! ```

use std::sync::Arc;

use tracing::{debug, info};

use crate::address::ParsedAddress;
use crate::base::constants::CONFIG_PREFIX;
use crate::base::{FileSystem, path};
use crate::error::{ImportError, Result};
use crate::resolver::{FileResolver, GlobResolver, Resolution, Resolver};
use crate::session::{LogLevel, MissingFileFallback, Session};

/// Routes import addresses to resolvers and owns the session they share.
pub struct Dispatcher {
    resolvers: Vec<Box<dyn Resolver>>,
    session: Session,
}

impl Dispatcher {
    /// Glob and plain-file resolution without library roots.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self::with_library_roots(fs, Vec::new())
    }

    /// Glob and plain-file resolution sharing `library_roots`.
    pub fn with_library_roots(fs: Arc<dyn FileSystem>, library_roots: Vec<String>) -> Self {
        let resolvers: Vec<Box<dyn Resolver>> = vec![
            Box::new(GlobResolver::new(library_roots.clone())),
            Box::new(FileResolver::new(library_roots)),
        ];
        Self {
            resolvers,
            session: Session::new(fs),
        }
    }

    /// Custom registry, asked in the given order.
    ///
    /// Any fallback in `resolvers` is moved behind the others; a plain
    /// [`FileResolver`] is appended when there is none.
    pub fn with_resolvers(fs: Arc<dyn FileSystem>, resolvers: Vec<Box<dyn Resolver>>) -> Self {
        let (mut ordered, fallbacks): (Vec<_>, Vec<_>) =
            resolvers.into_iter().partition(|r| !r.is_fallback());

        match fallbacks.into_iter().next() {
            Some(fallback) => ordered.push(fallback),
            None => ordered.push(Box::new(FileResolver::default())),
        }

        Self {
            resolvers: ordered,
            session: Session::new(fs),
        }
    }

    /// Resolves `address` as imported from `caller`.
    pub fn resolve(&mut self, caller: &str, address: &str) -> Result<Resolution> {
        let parsed = ParsedAddress::parse(address)?;

        if parsed.prefix() == CONFIG_PREFIX {
            self.session.config_mut().apply_query(parsed.query())?;
            if self.session.logs(LogLevel::Debug) {
                debug!("[DISPATCH] config from '{}': {:?}", caller, self.session.config());
            }
            return Ok(Resolution::new("{}", ""));
        }

        if self.session.config().check_cycles {
            let seq = self.session.sequence();
            if let Err(rejection) = self
                .session
                .graph_mut()
                .try_add_import(caller, &parsed, address, seq)
            {
                return Err(self.session.reject(rejection));
            }
        }

        if self.session.config().import_graph.enabled {
            self.session.persist_graph()?;
        }

        self.session.advance();

        let Some(resolver) = self
            .resolvers
            .iter()
            .find(|r| r.can_handle(parsed.prefix()))
        else {
            return Err(ImportError::NoResolver(address.to_string()));
        };

        if self.session.logs(LogLevel::Info) {
            info!(
                "[DISPATCH] '{}' from '{}' handled by {} (prefix '{}')",
                address,
                caller,
                resolver.name(),
                parsed.prefix()
            );
        }

        match resolver.resolve(&mut self.session, caller, address) {
            Err(err) if err.is_not_found() && resolver.is_fallback() => {
                substitute_missing(&**resolver, &mut self.session, caller, &parsed, err)
            }
            result => result,
        }
    }

    /// Binds `alias` to `canonical` on the first resolver that owns it.
    pub fn register_alias(&mut self, alias: &str, canonical: &str) -> Result<()> {
        let resolver = self
            .resolvers
            .iter_mut()
            .find(|r| !r.is_fallback() && r.can_handle(canonical))
            .ok_or_else(|| ImportError::UnknownPrefix(canonical.to_string()))?;
        resolver.register_alias(alias, canonical)
    }

    /// Writes the import graph to `path` after every routed import.
    pub fn set_import_graph_file(&mut self, path: impl Into<String>) {
        let output = &mut self.session.config_mut().import_graph;
        output.path = path.into();
        output.enabled = true;
    }

    /// Turns off cycle detection, and with it every cycle error.
    pub fn ignore_import_cycles(&mut self) {
        self.session.config_mut().check_cycles = false;
    }

    pub fn set_log_level(&mut self, level: LogLevel) {
        self.session.config_mut().log_level = level;
    }

    pub fn set_missing_file_fallback(&mut self, fallback: Option<MissingFileFallback>) {
        self.session.config_mut().on_missing_file = fallback;
    }

    /// Whether any registered resolver accepts `prefix`.
    pub fn can_handle(&self, prefix: &str) -> bool {
        self.resolvers.iter().any(|r| r.can_handle(prefix))
    }

    /// Prefixes of every resolver, in registry order.
    pub fn prefixes(&self) -> Vec<String> {
        self.resolvers.iter().flat_map(|r| r.prefixes()).collect()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

/// Replaces a missing plain file with the configured fallback, if any.
fn substitute_missing(
    resolver: &dyn Resolver,
    session: &mut Session,
    caller: &str,
    parsed: &ParsedAddress,
    err: ImportError,
) -> Result<Resolution> {
    let Some(fallback) = session.config().on_missing_file.clone() else {
        return Err(err);
    };

    if session.logs(LogLevel::Info) {
        info!("[DISPATCH] '{}' missing, using {:?}", parsed.path(), fallback);
    }

    match fallback {
        MissingFileFallback::Literal(content) => Ok(Resolution::new(
            content,
            path::join(&path::parent(caller), parsed.path()),
        )),
        // A missing substitute is reported as is
        MissingFileFallback::File(file) => resolver.resolve(session, caller, &file),
    }
}
