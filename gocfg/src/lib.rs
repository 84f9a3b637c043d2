//! gocfg — control-flow graphs for Go functions.
//!
//! Parses Go source with tree-sitter, lowers each function body into a
//! typed statement model and builds a control-flow graph per function:
//! straight-line statements merge into single nodes, conditionals and
//! loops become labeled two-way branches, and every path converges on one
//! synthetic exit node. Renderers produce a plain-text dump, Graphviz DOT
//! and JSON.
//!
//! ```no_run
//! use gocfg::cfg::{render, Graph};
//!
//! # fn main() -> gocfg::error::Result<()> {
//! let source = std::fs::read_to_string("main.go")?;
//! let graph = Graph::from_source(&source, "main")?;
//! println!("{}", render::to_text(&graph));
//! # Ok(())
//! # }
//! ```

pub mod cfg;
pub mod entry_point;
pub mod error;
pub mod frontend;

pub use cfg::Graph;
pub use error::{Error, Result};
