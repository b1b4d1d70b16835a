//! Graphviz DOT output.
//!
//! ```text
//! strict digraph {
//!   "caller.jsonnet" [shape="invhouse"];
//!   "caller.jsonnet" -> "host.libsonnet" [weight=0];
//!   "host.libsonnet" [shape="house"];
//! }
//! ```
//!
//! Each vertex line is followed by that vertex's outgoing edges.

use std::fmt::Write;

use super::{EdgeKind, ImportGraph, VertexKind};

const PATTERN_STYLE: &str = r#"color="grey", fontcolor="grey", shape="rect", style="dashed""#;

fn vertex_attributes(kind: VertexKind) -> Option<&'static str> {
    match kind {
        VertexKind::Caller => Some(r#"shape="invhouse""#),
        VertexKind::Import => Some(r#"shape="house""#),
        VertexKind::Resolved => None,
        VertexKind::Pattern | VertexKind::PatternMatch => Some(PATTERN_STYLE),
    }
}

fn edge_attributes(kind: EdgeKind, seq: u64) -> String {
    match kind {
        EdgeKind::Plain => format!("weight={seq}"),
        EdgeKind::Pattern => format!(r#"color="grey", style="dashed", weight={seq}"#),
        EdgeKind::Rejected => format!(r#"color="red", weight={seq}"#),
    }
}

/// Renders `graph`, drawing `rejected` as an extra red edge after the
/// accepted out-edges of its source.
pub(super) fn render(graph: &ImportGraph, rejected: Option<(usize, usize, u64)>) -> String {
    let mut out = String::from("strict digraph {\n");

    for (idx, (name, vertex)) in graph.vertices.iter().enumerate() {
        match vertex_attributes(vertex.kind) {
            Some(attributes) => {
                let _ = writeln!(out, "  \"{}\" [{}];", escape(name), attributes);
            }
            None => {
                let _ = writeln!(out, "  \"{}\";", escape(name));
            }
        }

        for &to in &vertex.successors {
            if let (Some(edge), Some((to_name, _))) =
                (graph.edges.get(&(idx, to)), graph.vertices.get_index(to))
            {
                write_edge(&mut out, name, to_name, edge_attributes(edge.kind, edge.seq));
            }
        }

        let rejected_here = rejected
            .filter(|&(from, _, _)| from == idx)
            .and_then(|(_, to, seq)| Some((graph.vertices.get_index(to)?.0, seq)));
        if let Some((to_name, seq)) = rejected_here {
            write_edge(&mut out, name, to_name, edge_attributes(EdgeKind::Rejected, seq));
        }
    }

    out.push_str("}\n");
    out
}

fn write_edge(out: &mut String, from: &str, to: &str, attributes: String) {
    let _ = writeln!(out, "  \"{}\" -> \"{}\" [{}];", escape(from), escape(to), attributes);
}

fn escape(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}
