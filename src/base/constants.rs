//! Reserved prefixes and defaults shared across the importer.

/// Scheme reserved for inline configuration (`config://set?logLevel=debug`).
pub const CONFIG_PREFIX: &str = "config";

/// Separator between a resolver prefix and the path or pattern.
pub const PREFIX_SEPARATOR: &str = "://";

/// File the import graph is written to unless configured otherwise.
pub const DEFAULT_IMPORT_GRAPH_FILE: &str = "import_graph.gv";

/// Base prefix of every pattern import.
pub const GLOB_PREFIX: &str = "glob";

/// Base prefix of pattern imports rendered as raw text (`importstr`).
pub const GLOB_STR_PREFIX: &str = "glob-str";

/// Suffix selecting the concatenate merge policy.
pub const CONCAT_SUFFIX: char = '+';

/// Canonical pattern prefixes handled by the glob resolver.
pub const GLOB_PREFIXES: &[&str] = &[
    "glob.path",
    "glob.path+",
    "glob-str.path",
    "glob-str.path+",
    "glob.file",
    "glob.file+",
    "glob-str.file",
    "glob-str.file+",
    "glob.dir",
    "glob.dir+",
    "glob-str.dir",
    "glob-str.dir+",
    "glob.stem",
    "glob.stem+",
    "glob-str.stem",
    "glob-str.stem+",
    "glob+",
    "glob-str+",
];

// Query parameter keys
pub const QUERY_EXCLUDE: &str = "exclude";
pub const QUERY_LOG_LEVEL: &str = "logLevel";
pub const QUERY_IMPORT_GRAPH: &str = "importGraph";
pub const QUERY_IGNORE_IMPORT_CYCLES: &str = "ignoreImportCycles";
pub const QUERY_ON_MISSING_FILE: &str = "onMissingFile";
