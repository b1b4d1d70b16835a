use tracing::{debug, warn};

use super::{PrefixSpec, PrefixTable, Resolution, Resolver};
use crate::address::ParsedAddress;
use crate::base::constants::{GLOB_PREFIXES, QUERY_EXCLUDE};
use crate::base::path;
use crate::error::{ImportError, Result};
use crate::glob::GlobSearch;
use crate::graph::{EdgeKind, VertexKind};
use crate::merge::{render_flat, render_grouped};
use crate::session::{LogLevel, Session};

/// Resolves `glob…://` pattern addresses into one rendered import expression.
#[derive(Debug, Clone)]
pub struct GlobResolver {
    library_roots: Vec<String>,
    prefixes: PrefixTable,
    exclude: Option<String>,
}

impl Default for GlobResolver {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl GlobResolver {
    pub fn new(library_roots: Vec<String>) -> Self {
        Self {
            library_roots,
            prefixes: PrefixTable::new(GLOB_PREFIXES),
            exclude: None,
        }
    }

    /// Exclude pattern applied when an address carries none.
    pub fn with_exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude = Some(pattern.into());
        self
    }
}

impl Resolver for GlobResolver {
    fn name(&self) -> &str {
        "GlobResolver"
    }

    fn can_handle(&self, prefix: &str) -> bool {
        self.prefixes.contains(prefix)
    }

    fn prefixes(&self) -> Vec<String> {
        self.prefixes.prefixes()
    }

    fn register_alias(&mut self, alias: &str, canonical: &str) -> Result<()> {
        self.prefixes.register(alias, canonical)
    }

    fn resolve(&self, session: &mut Session, caller: &str, address: &str) -> Result<Resolution> {
        let parsed = ParsedAddress::parse(address)?;
        let canonical = self
            .prefixes
            .canonical(parsed.prefix())
            .ok_or_else(|| ImportError::UnknownPrefix(parsed.prefix().to_string()))?;
        let spec = PrefixSpec::parse(canonical)
            .ok_or_else(|| ImportError::UnknownPrefix(canonical.to_string()))?;

        let caller_dir = path::parent(caller);
        let exclude = parsed
            .query()
            .first(QUERY_EXCLUDE)
            .or(self.exclude.as_deref());

        if session.logs(LogLevel::Debug) {
            debug!(
                "[GLOB] '{}' from '{}': prefix '{}' ({}), pattern '{}', roots {:?} + '{}', exclude {:?}",
                address,
                caller,
                parsed.prefix(),
                canonical,
                parsed.path(),
                self.library_roots,
                caller_dir,
                exclude
            );
        }

        let matches = GlobSearch::new(session.fs(), &self.library_roots)
            .with_exclude(exclude)
            .excluding_caller(caller)
            .resolve(&caller_dir, parsed.path())?;

        // Rendered imports are resolved again relative to the caller
        let files: Vec<String> = matches
            .into_iter()
            .map(|file| match path::relative(&caller_dir, &file) {
                Some(relative) => relative,
                None => {
                    // Reaching `file` from `caller_dir` needs the working
                    // directory's name, which lexical paths don't carry
                    warn!(
                        "[GLOB] '{}' is not reachable from '{}'; rendering it unchanged",
                        file, caller_dir
                    );
                    file
                }
            })
            .collect();

        let seq = session.sequence();
        let check_cycles = session.config().check_cycles;
        let graph = session.graph_mut();
        graph.add_vertex(address, VertexKind::Pattern);
        for file in &files {
            graph.add_vertex(file, VertexKind::PatternMatch);
            if let Err(rejection) = graph.try_add_edge(address, file, seq, EdgeKind::Pattern) {
                // Cycles through pattern edges surface as plain imports of
                // the rendered text
                if check_cycles {
                    warn!(
                        "[GLOB] skipping pattern edge '{}' -> '{}': would close a cycle",
                        rejection.from, rejection.to
                    );
                }
            }
        }

        let content = match spec.grouping {
            None => render_flat(&files, spec.kind),
            Some((mode, policy)) => render_grouped(&files, mode, policy, spec.kind),
        };
        let found_at = found_at(caller, seq);

        if session.logs(LogLevel::Debug) {
            debug!("[GLOB] '{}' rendered {:?} found at '{}'", address, content, found_at);
        }

        Ok(Resolution { content, found_at })
    }
}

/// A location in the caller's directory that is unique per sequence number:
/// `./` repeated `seq + 1` times in front of the caller, after the leading
/// `/` for absolute callers.
fn found_at(caller: &str, seq: u64) -> String {
    let dots = "./".repeat(seq as usize + 1);
    match caller.strip_prefix('/') {
        Some(rest) => format!("/{dots}{rest}"),
        None => format!("{dots}{caller}"),
    }
}
