//! Import graph and cycle tracking.
//!
//! Vertices are import addresses and file paths as text; edges are accepted
//! import relations carrying the session sequence number they were added at.
//!
//! ```text
//! [caller.jsonnet] ──▶ [host.libsonnet] ──▶ [testdata/host.libsonnet]
//!    caller             address as written     alias (caller dir joined)
//! ```
//!
//! Every mutation that can fail is transactional: a rejected edge leaves the
//! graph exactly as it was, newly added vertices included.

mod dot;
#[cfg(feature = "serde")]
mod snapshot;

#[cfg(feature = "serde")]
pub use snapshot::{EdgeSnapshot, GraphSnapshot, VertexSnapshot};

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use tracing::trace;

use crate::address::ParsedAddress;
use crate::base::constants::PREFIX_SEPARATOR;
use crate::base::path;

/// Role of a vertex, used for styling only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexKind {
    /// A file that issued an import.
    Caller,
    /// A plain import address as written.
    Import,
    /// An address joined onto its caller's directory.
    Resolved,
    /// A pattern import address as written.
    Pattern,
    /// A file produced by a pattern.
    PatternMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Plain,
    Pattern,
    /// Only ever rendered into a rejection dump, never stored.
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub seq: u64,
    pub kind: EdgeKind,
}

#[derive(Debug, Clone)]
struct Vertex {
    kind: VertexKind,
    successors: Vec<usize>,
}

/// An edge refused because it would close a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleRejection {
    pub from: String,
    pub to: String,
    /// DOT rendering of the graph with the refused edge drawn in red.
    pub dot: String,
}

#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    vertices: usize,
    edges: usize,
}

/// Directed graph of accepted imports.
#[derive(Debug, Clone, Default)]
pub struct ImportGraph {
    vertices: IndexMap<String, Vertex, FxBuildHasher>,
    edges: IndexMap<(usize, usize), Edge, FxBuildHasher>,
}

impl ImportGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `name` unless present. An existing vertex keeps its first kind.
    pub fn add_vertex(&mut self, name: &str, kind: VertexKind) -> usize {
        if let Some(idx) = self.vertices.get_index_of(name) {
            return idx;
        }
        let (idx, _) = self.vertices.insert_full(
            name.to_string(),
            Vertex {
                kind,
                successors: Vec::new(),
            },
        );
        idx
    }

    /// Adds `from → to` unless it would close a cycle.
    ///
    /// Missing vertices are created as [`VertexKind::Resolved`]. Re-adding an
    /// existing edge is a no-op that keeps the original sequence number.
    pub fn try_add_edge(
        &mut self,
        from: &str,
        to: &str,
        seq: u64,
        kind: EdgeKind,
    ) -> Result<(), CycleRejection> {
        let checkpoint = self.checkpoint();
        let from_idx = self.add_vertex(from, VertexKind::Resolved);
        let to_idx = self.add_vertex(to, VertexKind::Resolved);

        self.commit_edge(from_idx, to_idx, seq, kind)
            .inspect_err(|_| self.rollback(checkpoint))
    }

    /// Records that `caller` imports `address`.
    ///
    /// Two edges are involved: the cleaned caller to the address as written,
    /// then the address as written to its alias (the address joined onto the
    /// caller's directory). The second catches cycles reached through a
    /// different spelling of the same file. Both commit or neither does.
    pub fn try_add_import(
        &mut self,
        caller: &str,
        address: &ParsedAddress,
        raw: &str,
        seq: u64,
    ) -> Result<(), CycleRejection> {
        let checkpoint = self.checkpoint();

        let caller = path::clean(caller);
        let raw_kind = if address.is_plain() {
            VertexKind::Import
        } else {
            VertexKind::Pattern
        };

        let caller_idx = self.add_vertex(&caller, VertexKind::Caller);
        let raw_idx = self.add_vertex(raw, raw_kind);

        let result = self
            .commit_edge(caller_idx, raw_idx, seq, EdgeKind::Plain)
            .and_then(|()| {
                let alias = alias_of(&caller, address);
                if alias == raw {
                    return Ok(());
                }
                let alias_idx = self.add_vertex(&alias, VertexKind::Resolved);
                self.commit_edge(raw_idx, alias_idx, seq, EdgeKind::Plain)
            });

        result.inspect_err(|_| self.rollback(checkpoint))
    }

    /// Whether adding `from → to` would close a cycle.
    ///
    /// A self-edge always does; otherwise it does when `from` is already
    /// reachable from `to`.
    pub fn creates_cycle(&self, from: &str, to: &str) -> bool {
        if from == to {
            return true;
        }
        match (
            self.vertices.get_index_of(from),
            self.vertices.get_index_of(to),
        ) {
            (Some(from), Some(to)) => self.reaches(to, from),
            _ => false,
        }
    }

    pub fn contains_vertex(&self, name: &str) -> bool {
        self.vertices.contains_key(name)
    }

    pub fn vertex_kind(&self, name: &str) -> Option<VertexKind> {
        self.vertices.get(name).map(|v| v.kind)
    }

    pub fn edge(&self, from: &str, to: &str) -> Option<Edge> {
        let from = self.vertices.get_index_of(from)?;
        let to = self.vertices.get_index_of(to)?;
        self.edges.get(&(from, to)).copied()
    }

    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        self.edge(from, to).is_some()
    }

    /// Vertex names in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.vertices.keys().map(String::as_str)
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, Edge)> {
        self.edges
            .iter()
            .filter_map(|(&(from, to), edge)| Some((self.name(from)?, self.name(to)?, *edge)))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Graphviz rendering of the accepted graph.
    pub fn to_dot(&self) -> String {
        dot::render(self, None)
    }

    fn commit_edge(
        &mut self,
        from: usize,
        to: usize,
        seq: u64,
        kind: EdgeKind,
    ) -> Result<(), CycleRejection> {
        if self.edges.contains_key(&(from, to)) {
            return Ok(());
        }

        if from == to || self.reaches(to, from) {
            let rejection = CycleRejection {
                from: self.name(from).unwrap_or_default().to_string(),
                to: self.name(to).unwrap_or_default().to_string(),
                dot: dot::render(self, Some((from, to, seq))),
            };
            trace!(
                "[GRAPH] rejected {} -> {} (seq {})",
                rejection.from, rejection.to, seq
            );
            return Err(rejection);
        }

        self.edges.insert((from, to), Edge { seq, kind });
        if let Some((_, vertex)) = self.vertices.get_index_mut(from) {
            vertex.successors.push(to);
        }
        trace!(
            "[GRAPH] added {} -> {} (seq {})",
            self.name(from).unwrap_or_default(),
            self.name(to).unwrap_or_default(),
            seq
        );
        Ok(())
    }

    /// Depth-first reachability over committed edges.
    fn reaches(&self, start: usize, target: usize) -> bool {
        let mut visited = vec![false; self.vertices.len()];
        let mut stack = vec![start];

        while let Some(current) = stack.pop() {
            if current == target {
                return true;
            }
            if std::mem::replace(&mut visited[current], true) {
                continue;
            }
            if let Some((_, vertex)) = self.vertices.get_index(current) {
                stack.extend(vertex.successors.iter().copied());
            }
        }
        false
    }

    fn name(&self, idx: usize) -> Option<&str> {
        self.vertices.get_index(idx).map(|(name, _)| name.as_str())
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            vertices: self.vertices.len(),
            edges: self.edges.len(),
        }
    }

    /// Drops everything added after `checkpoint`.
    fn rollback(&mut self, checkpoint: Checkpoint) {
        // Successor lists grow in edge order, so the newest edge is always last
        while self.edges.len() > checkpoint.edges {
            let Some(((from, _), _)) = self.edges.pop() else {
                break;
            };
            if let Some((_, vertex)) = self.vertices.get_index_mut(from) {
                vertex.successors.pop();
            }
        }
        self.vertices.truncate(checkpoint.vertices);
    }
}

/// The address joined onto the caller's directory.
///
/// Absolute addresses are their own alias. Pattern addresses keep their
/// prefix so they never collide with a plain file vertex.
fn alias_of(caller: &str, address: &ParsedAddress) -> String {
    let joined = path::join(&path::parent(caller), address.path());
    if address.is_plain() {
        joined
    } else {
        format!("{}{PREFIX_SEPARATOR}{joined}", address.prefix())
    }
}
