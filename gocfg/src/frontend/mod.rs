//! Source frontend: parses Go text and exposes the statement model the
//! graph builder consumes.
//!
//! The builder depends only on the statement model; swapping the parser
//! for another source of statement trees requires no changes on the
//! graph side.

mod model;
mod parser;

#[cfg(test)]
mod tests;

pub use model::{Conditional, ElseArm, Function, Span, Stmt};
pub use parser::{find_function, parse_functions};
