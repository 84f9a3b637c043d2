//! Output formats for a finished graph.
//!
//! - Text: the compact dump format, one block per node with its
//!   successor indices.
//! - DOT: Graphviz input, one `subgraph cluster` per function so a
//!   multi-function document lays out each graph separately.
//! - JSON: serde serialization of the graph structure.

use std::fmt::Write as _;

use crate::cfg::graph::{Graph, NodeKind};

/// Renders the text dump.
///
/// Format: a `function: '<name>'` header, then one block per node in
/// display order with the node's index, its successor indices and its
/// source text. The exit node always comes last and has no successors.
#[must_use]
pub fn to_text(graph: &Graph) -> String {
    let mut out = format!("function: '{}'", graph.name);
    for node in &graph.nodes {
        if node.index == graph.exit {
            continue;
        }
        let text = node
            .text
            .strip_suffix("\r\n")
            .or_else(|| node.text.strip_suffix('\n'))
            .unwrap_or(&node.text);
        let _ = write!(out, "\n-- {} >> ", node.index);
        for edge in &node.successors {
            let _ = write!(out, "{} ", edge.target);
        }
        let _ = write!(out, "--\n{text}\n");
    }
    let exit = &graph.nodes[graph.exit];
    let _ = write!(out, "\n-- {} --\n{}\n", exit.index, exit.text);
    out
}

/// Renders one function as a Graphviz cluster.
///
/// `cluster` disambiguates node identifiers when several graphs share a
/// document; pair with [`dot_document`] for a complete digraph.
#[must_use]
pub fn to_dot(graph: &Graph, cluster: usize) -> String {
    let mut out = format!("    subgraph cluster_{cluster} {{\n");
    let _ = writeln!(out, "        label=\"{}\";", escape(&graph.name));
    for node in &graph.nodes {
        let shape = match node.kind {
            NodeKind::Sequence => "box",
            NodeKind::Condition => "diamond",
            NodeKind::Branch => "ellipse",
        };
        let _ = writeln!(
            out,
            "        n{cluster}_{} [shape={shape}, label=\"{}\"];",
            node.index,
            escape(&node.text)
        );
    }
    for node in &graph.nodes {
        for edge in &node.successors {
            let _ = write!(out, "        n{cluster}_{} -> n{cluster}_{}", node.index, edge.target);
            if let Some(label) = edge.label {
                let _ = write!(out, " [label=\"{}\"]", label.as_str());
            }
            out.push_str(";\n");
        }
    }
    out.push_str("    }\n");
    out
}

/// Wraps per-function clusters into one Graphviz document.
#[must_use]
pub fn dot_document(graphs: &[Graph]) -> String {
    let mut out = String::from("digraph {\n    rankdir=TB;\n    node [fontname=\"monospace\"];\n");
    for (cluster, graph) in graphs.iter().enumerate() {
        out.push_str(&to_dot(graph, cluster));
    }
    out.push_str("}\n");
    out
}

/// Serializes one graph as pretty-printed JSON.
pub fn to_json(graph: &Graph) -> serde_json::Result<String> {
    serde_json::to_string_pretty(graph)
}

/// Escapes a node label for a double-quoted DOT string.
fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "")
}
