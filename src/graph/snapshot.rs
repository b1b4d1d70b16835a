//! Serializable view of the import graph.

use serde::Serialize;

use super::{EdgeKind, ImportGraph, VertexKind};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphSnapshot {
    pub vertices: Vec<VertexSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VertexSnapshot {
    pub name: String,
    pub kind: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EdgeSnapshot {
    pub from: String,
    pub to: String,
    pub seq: u64,
    pub kind: &'static str,
}

fn vertex_kind_name(kind: VertexKind) -> &'static str {
    match kind {
        VertexKind::Caller => "caller",
        VertexKind::Import => "import",
        VertexKind::Resolved => "resolved",
        VertexKind::Pattern => "pattern",
        VertexKind::PatternMatch => "patternMatch",
    }
}

fn edge_kind_name(kind: EdgeKind) -> &'static str {
    match kind {
        EdgeKind::Plain => "plain",
        EdgeKind::Pattern => "pattern",
        EdgeKind::Rejected => "rejected",
    }
}

impl ImportGraph {
    /// Vertices and edges in insertion order.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            vertices: self
                .vertices
                .iter()
                .map(|(name, vertex)| VertexSnapshot {
                    name: name.clone(),
                    kind: vertex_kind_name(vertex.kind),
                })
                .collect(),
            edges: self
                .edges()
                .map(|(from, to, edge)| EdgeSnapshot {
                    from: from.to_string(),
                    to: to.to_string(),
                    seq: edge.seq,
                    kind: edge_kind_name(edge.kind),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.snapshot())
    }
}
