//! # glob-importer
//!
//! Pattern imports for a declarative configuration language: one import
//! address pulls in every file a glob matches, across ordered library roots
//! and the caller's own directory, merged under a chosen key strategy and
//! guarded against import cycles.
//!
//! ```text
//! import 'glob.stem+://models/*.libsonnet'
//!   → { 'host': (import 'vendor/models/host.libsonnet')+(import 'models/host.libsonnet'), }
//! ```
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! dispatcher → Routing, inline config, missing-file fallback
//!   ↓
//! resolver   → GlobResolver, FileResolver, prefix aliases
//!   ↓
//! session    → Import graph, sequence counter, inline config
//!   ↓
//! graph      → Cycle tracking, DOT output
//! merge      → Grouping and rendering of import expressions
//! glob       → Ordered pattern search over roots
//!   ↓
//! address    → Prefix / path / query parsing
//!   ↓
//! base       → Lexical paths, constants, file-system trait
//! ```

// ============================================================================
// MODULES (dependency order: base → address → glob/merge/graph → session → resolver → dispatcher)
// ============================================================================

/// Foundation: lexical path helpers, constants, file-system collaborator
pub mod base;

/// Error taxonomy shared by every module
pub mod error;

/// Import address parsing
pub mod address;

/// Glob search across ordered roots
pub mod glob;

/// Grouping and rendering of resolved files
pub mod merge;

/// Import graph and cycle detection
pub mod graph;

/// Per-evaluation state: graph, counter, inline config
pub mod session;

/// Resolver trait and the built-in resolvers
pub mod resolver;

/// Request routing
pub mod dispatcher;

pub use address::{ParsedAddress, QueryParams};
pub use base::{FileSystem, MemoryFileSystem, OsFileSystem};
pub use dispatcher::Dispatcher;
pub use error::{ImportError, Result};
pub use graph::{CycleRejection, ImportGraph};
pub use merge::{GroupMode, ImportKind, MergePolicy};
pub use resolver::{FileResolver, GlobResolver, Resolution, Resolver};
pub use session::{InlineConfig, LogLevel, MissingFileFallback, Session};
