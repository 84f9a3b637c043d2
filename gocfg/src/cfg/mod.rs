//! Control-flow graph construction for Go function bodies.
//!
//! A function body is lowered into a graph of basic blocks: consecutive
//! simple statements merge into a single node, conditionals and loops
//! become two-way condition nodes with labeled edges, and every path
//! ultimately reaches a single synthetic exit node. Use
//! [`Graph::from_source`] for one named function or [`build_all`] for
//! every function in a file.

mod builder;
mod fragment;
mod graph;
pub mod render;

pub use builder::{build, build_all};
pub use graph::{Edge, EdgeLabel, Graph, Node, NodeKind};
