//! Per-evaluation state shared by every resolution.
//!
//! One [`Session`] lives inside one dispatcher. Nested resolutions triggered
//! while the evaluator processes returned content run against the same
//! session, so they extend the same graph and advance the same counter.

mod config;

pub use config::{GraphOutput, InlineConfig, LogLevel, MissingFileFallback};

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::base::FileSystem;
use crate::error::{ImportError, Result};
use crate::graph::{CycleRejection, ImportGraph};

pub struct Session {
    fs: Arc<dyn FileSystem>,
    graph: ImportGraph,
    counter: u64,
    config: InlineConfig,
}

impl Session {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            graph: ImportGraph::new(),
            counter: 0,
            config: InlineConfig::default(),
        }
    }

    pub fn fs(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    pub fn graph(&self) -> &ImportGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut ImportGraph {
        &mut self.graph
    }

    /// Sequence number of the resolution in progress.
    pub fn sequence(&self) -> u64 {
        self.counter
    }

    /// Moves to the next resolution and returns its sequence number.
    pub fn advance(&mut self) -> u64 {
        self.counter += 1;
        self.counter
    }

    pub fn config(&self) -> &InlineConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut InlineConfig {
        &mut self.config
    }

    /// Whether events at `level` are emitted.
    pub fn logs(&self, level: LogLevel) -> bool {
        level != LogLevel::Off && self.config.log_level >= level
    }

    pub fn graph_file(&self) -> PathBuf {
        PathBuf::from(&self.config.import_graph.path)
    }

    /// Writes the current graph to the configured file.
    pub fn persist_graph(&self) -> Result<()> {
        let path = &self.config.import_graph.path;
        self.fs
            .write(path, self.graph.to_dot().as_bytes())
            .map_err(|e| ImportError::io(path.clone(), e))?;

        if self.logs(LogLevel::Debug) {
            debug!("[SESSION] import graph written to '{}'", path);
        }
        Ok(())
    }

    /// Writes the diagnostic dump of a refused import and builds the error
    /// pointing at it.
    ///
    /// A failed write is only logged; the cycle is the error that matters.
    pub fn reject(&self, rejection: CycleRejection) -> ImportError {
        let path = &self.config.import_graph.path;
        if let Err(e) = self.fs.write(path, rejection.dot.as_bytes()) {
            warn!("[SESSION] couldn't write import graph to '{}': {}", path, e);
        }

        ImportError::ImportCycle {
            from: rejection.from,
            to: rejection.to,
            graph_file: self.graph_file(),
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("graph", &self.graph)
            .field("counter", &self.counter)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
