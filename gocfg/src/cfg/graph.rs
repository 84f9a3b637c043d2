//! Finished graph structure, node ownership and display indexing.

use serde::Serialize;

use crate::cfg::builder;
use crate::error::{GraphError, Result};
use crate::frontend;

/// What role a basic block plays in the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Straight-line run of merged simple statements.
    Sequence,
    /// Two-way branch point (if condition, loop condition, range header).
    Condition,
    /// Unconditional control transfer (returns, the function exit).
    Branch,
}

/// Label carried by a branch edge; fall-through edges carry none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeLabel {
    /// Condition held.
    True,
    /// Condition failed.
    False,
    /// Collection loop exhausted (or empty from the start).
    Empty,
    /// Collection loop has elements left.
    #[serde(rename = "not empty")]
    NotEmpty,
}

impl EdgeLabel {
    /// Text used by the renderers.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeLabel::True => "true",
            EdgeLabel::False => "false",
            EdgeLabel::Empty => "empty",
            EdgeLabel::NotEmpty => "not empty",
        }
    }
}

/// Directed edge to another node, by display index.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Edge {
    /// Display index of the successor node.
    pub target: usize,
    /// Optional branch label.
    pub label: Option<EdgeLabel>,
}

/// One basic block of the finished graph.
#[derive(Debug, Serialize)]
pub struct Node {
    /// Stable display index; equals the node's position in [`Graph::nodes`].
    pub index: usize,
    /// Block role.
    pub kind: NodeKind,
    /// Verbatim source text merged into this block.
    pub text: String,
    /// Outgoing edges, in wiring order, deduplicated per (target, label).
    pub successors: Vec<Edge>,
}

/// Control-flow graph of a single function, immutable once built.
///
/// Nodes are stored in discovery order; the synthetic exit node is always
/// last. All cross-references are display indices into `nodes`.
#[derive(Debug, Serialize)]
pub struct Graph {
    /// Name of the function this graph was built from.
    pub name: String,
    /// All nodes, display order.
    pub nodes: Vec<Node>,
    /// Index of the function body's entry node.
    pub root: usize,
    /// Index of the synthetic function-exit node.
    pub exit: usize,
}

impl Graph {
    /// Parses Go source and builds the graph of the named function.
    pub fn from_source(source: &str, function_name: &str) -> Result<Self> {
        let function = frontend::find_function(source, function_name)?;
        builder::build(source, &function)
    }

    /// Checks the structural invariants of a finished graph: the exit has
    /// no outgoing edges, every other node has at least one, and every
    /// condition node has exactly two.
    pub fn validate(&self) -> std::result::Result<(), GraphError> {
        for node in &self.nodes {
            if node.index == self.exit {
                continue;
            }
            if node.successors.is_empty() {
                return Err(GraphError::DanglingNode { index: node.index });
            }
            if node.kind == NodeKind::Condition && node.successors.len() != 2 {
                return Err(GraphError::BranchCount {
                    index: node.index,
                    count: node.successors.len(),
                });
            }
        }
        Ok(())
    }
}

/// Handle to an arena node; only valid for the arena that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeId(usize);

#[derive(Debug)]
struct ProtoNode {
    kind: NodeKind,
    text: String,
    /// Display index; `None` while the node is still floating.
    index: Option<usize>,
    edges: Vec<(NodeId, Option<EdgeLabel>)>,
}

/// Node arena used during construction.
///
/// Nodes are allocated floating and receive a dense display index only
/// through [`NodeArena::register`], the first time they are wired into
/// the growing graph. Registration order is display order.
#[derive(Debug, Default)]
pub(crate) struct NodeArena {
    nodes: Vec<ProtoNode>,
    order: Vec<NodeId>,
}

impl NodeArena {
    pub(crate) fn alloc(&mut self, kind: NodeKind, text: String) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ProtoNode {
            kind,
            text,
            index: None,
            edges: Vec::new(),
        });
        id
    }

    pub(crate) fn register(&mut self, id: NodeId) {
        if self.nodes[id.0].index.is_none() {
            self.nodes[id.0].index = Some(self.order.len());
            self.order.push(id);
        }
    }

    /// Adds a directed edge; re-adding an identical (target, label) pair
    /// is a no-op, so an empty loop body looping back to its own
    /// condition never duplicates the edge.
    pub(crate) fn add_edge(&mut self, from: NodeId, to: NodeId, label: Option<EdgeLabel>) {
        let edges = &mut self.nodes[from.0].edges;
        if !edges.iter().any(|&(t, l)| t == to && l == label) {
            edges.push((to, label));
        }
    }

    /// Compacts registered nodes into a finished, validated graph.
    pub(crate) fn finish(mut self, name: String, root: NodeId, exit: NodeId) -> Result<Graph> {
        // Anything reachable from a registered node gets an index too,
        // in discovery order; floating leftovers are dropped.
        let mut i = 0;
        while i < self.order.len() {
            let id = self.order[i];
            let targets: Vec<NodeId> = self.nodes[id.0].edges.iter().map(|e| e.0).collect();
            for target in targets {
                self.register(target);
            }
            i += 1;
        }

        let index_of: Vec<usize> = self
            .nodes
            .iter()
            .map(|n| n.index.unwrap_or(usize::MAX))
            .collect();
        let nodes: Vec<Node> = self
            .order
            .iter()
            .map(|id| {
                let proto = &self.nodes[id.0];
                Node {
                    index: index_of[id.0],
                    kind: proto.kind,
                    text: proto.text.clone(),
                    successors: proto
                        .edges
                        .iter()
                        .map(|&(target, label)| Edge {
                            target: index_of[target.0],
                            label,
                        })
                        .collect(),
                }
            })
            .collect();

        let graph = Graph {
            name,
            nodes,
            root: index_of[root.0],
            exit: index_of[exit.0],
        };
        graph.validate()?;
        Ok(graph)
    }
}
