//! Error types shared across the crate.

use thiserror::Error;

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while loading or parsing source input.
#[derive(Debug, Error)]
pub enum Error {
    /// The Go grammar could not be loaded into the parser.
    #[error("failed to load Go grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// Tree-sitter could not produce a syntax tree for the input.
    #[error("failed to parse Go source")]
    Parse,

    /// No function with the requested name exists in the file.
    #[error("function '{0}' not found")]
    FunctionNotFound(String),

    /// Graph construction hit a structural invariant violation.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Underlying I/O failure while reading input.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Fatal structural errors raised during graph construction.
///
/// These indicate either a bug in the builder or an input the frontend
/// should have rejected; construction aborts rather than guessing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// A condition node ended up with a branch count other than two.
    #[error("condition node {index} has {count} outgoing edges, expected 2")]
    BranchCount {
        /// Display index of the offending node.
        index: usize,
        /// Number of edges actually stored.
        count: usize,
    },

    /// A node other than the exit has nowhere to go.
    #[error("node {index} has no outgoing edges")]
    DanglingNode {
        /// Display index of the offending node.
        index: usize,
    },

    /// A break statement escaped every loop frame.
    #[error("break statement outside of a loop")]
    StrayBreak,

    /// A continue statement escaped every loop frame.
    #[error("continue statement outside of a loop")]
    StrayContinue,
}
