//! Pattern-based file resolution across ordered search roots.
//!
//! ## Ordering
//!
//! ```text
//! library root 1  → matches sorted hierarchically
//! library root 2  → matches sorted hierarchically
//! ...
//! caller dir      → matches sorted hierarchically   (always last)
//! ```
//!
//! The caller's directory comes last so an overwrite merge lets a local file
//! win over a same-named library file, while a concatenate merge keeps one
//! stable global order.
//!
//! After collection: duplicates keep their first position, the exclude
//! pattern is applied, and the requesting file itself is dropped. An empty
//! result at any of these steps is an error, never an empty success.

use globset::{GlobBuilder, GlobMatcher};
use rustc_hash::FxHashSet;
use tracing::trace;

use crate::base::FileSystem;
use crate::base::path;
use crate::error::{ImportError, Result};

/// Characters that turn a path segment into a pattern segment.
const GLOB_META: &[char] = &['*', '?', '[', '{', '\\'];

/// Compile a glob where `*`/`?` stay within one segment and `**` spans
/// directories.
pub fn compile(pattern: &str) -> Result<GlobMatcher> {
    if pattern.is_empty() {
        return Err(ImportError::malformed_pattern(pattern, "empty pattern"));
    }

    GlobBuilder::new(pattern)
        .literal_separator(true)
        .backslash_escape(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| ImportError::malformed_pattern(pattern, e.kind()))
}

/// One pattern search over the library roots plus a caller directory.
pub struct GlobSearch<'a> {
    fs: &'a dyn FileSystem,
    library_roots: &'a [String],
    exclude: Option<&'a str>,
    caller: Option<String>,
}

impl<'a> GlobSearch<'a> {
    pub fn new(fs: &'a dyn FileSystem, library_roots: &'a [String]) -> Self {
        Self {
            fs,
            library_roots,
            exclude: None,
            caller: None,
        }
    }

    /// Drop every match satisfying `exclude`.
    pub fn with_exclude(mut self, exclude: Option<&'a str>) -> Self {
        self.exclude = exclude;
        self
    }

    /// Drop the requesting file from the matches.
    pub fn excluding_caller(mut self, caller: &str) -> Self {
        self.caller = Some(path::clean(caller));
        self
    }

    /// Resolve `pattern` against every library root, then against `caller_dir`.
    pub fn resolve(&self, caller_dir: &str, pattern: &str) -> Result<Vec<String>> {
        // Validate before touching any root
        compile(pattern)?;
        let exclude = self.exclude.map(compile).transpose()?;

        let mut seen = FxHashSet::default();
        let mut resolved = Vec::new();

        for root in self
            .library_roots
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(caller_dir))
        {
            let mut matches = self.match_root(root, pattern)?;
            matches.sort_by(|a, b| path::hierarchical_cmp(a, b));

            trace!("[GLOB] root '{}' matched {:?}", root, matches);

            for file in matches {
                if seen.insert(file.clone()) {
                    resolved.push(file);
                }
            }
        }

        if resolved.is_empty() {
            return Err(ImportError::empty_result(pattern));
        }

        if let (Some(matcher), Some(raw)) = (exclude, self.exclude) {
            resolved.retain(|file| !matcher.is_match(file));
            if resolved.is_empty() {
                return Err(ImportError::excluded_everything(pattern, raw));
            }
        }

        if let Some(caller) = &self.caller {
            resolved.retain(|file| file != caller);
            if resolved.is_empty() {
                return Err(ImportError::empty_result(pattern));
            }
        }

        Ok(resolved)
    }

    /// Matches of `pattern` joined onto `root`, unsorted.
    fn match_root(&self, root: &str, pattern: &str) -> Result<Vec<String>> {
        let joined = path::join(root, pattern);
        let (base, rest) = split_pattern(&joined);

        let Some(rest) = rest else {
            // No wildcard left: the pattern names exactly one file
            return Ok(if self.fs.is_file(&joined) {
                vec![joined]
            } else {
                Vec::new()
            });
        };

        let matcher = compile(&rest)?;
        let files = self
            .fs
            .list_files(&base, reach(&rest))
            .map_err(|e| ImportError::io(base.clone(), e))?;

        Ok(files
            .into_iter()
            .filter(|file| matcher.is_match(file))
            .map(|file| path::join(&base, &file))
            .collect())
    }
}

/// Splits a cleaned pattern into its literal directory prefix and the
/// pattern part starting at the first segment with a wildcard.
///
/// `vendor/models/*.jsonnet` → (`vendor/models`, `*.jsonnet`); a pattern
/// without wildcards has no pattern part.
fn split_pattern(pattern: &str) -> (String, Option<String>) {
    let segments: Vec<&str> = pattern.split('/').collect();

    let Some(idx) = segments
        .iter()
        .position(|segment| segment.contains(GLOB_META))
    else {
        return (pattern.to_string(), None);
    };

    let base = match segments[..idx].join("/") {
        base if base.is_empty() && path::is_absolute(pattern) => "/".to_string(),
        base if base.is_empty() => ".".to_string(),
        base => base,
    };

    (base, Some(segments[idx..].join("/")))
}

/// How many segments below its base a pattern part can match; `None` when
/// a `**` segment lets it reach any depth.
fn reach(pattern: &str) -> Option<usize> {
    let segments: Vec<&str> = pattern.split('/').collect();
    if segments.iter().any(|segment| segment.contains("**")) {
        return None;
    }
    Some(segments.len())
}
