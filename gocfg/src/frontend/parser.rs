//! Tree-sitter-go frontend: lowers a parsed Go file into the statement
//! model.
//!
//! Only the statement kinds the graph builder distinguishes are lowered
//! structurally; everything else (switch, select, defer, go, declarations)
//! becomes a simple statement carrying its full source span, which keeps
//! graphs connected without modeling those constructs.

use tree_sitter::{Node, Parser};

use crate::error::{Error, Result};
use crate::frontend::model::{Conditional, ElseArm, Function, Span, Stmt};

/// Parses Go source and returns every function and method declaration,
/// in source order.
pub fn parse_functions(source: &str) -> Result<Vec<Function>> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_go::LANGUAGE.into())?;
    let tree = parser.parse(source, None).ok_or(Error::Parse)?;

    let root = tree.root_node();
    let mut functions = Vec::new();
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        if !matches!(child.kind(), "function_declaration" | "method_declaration") {
            continue;
        }
        let Some(name) = child.child_by_field_name("name") else {
            continue;
        };
        // Declarations without a body (e.g. assembly stubs) have no flow.
        let Some(body) = child.child_by_field_name("body") else {
            continue;
        };
        functions.push(Function {
            name: span_of(name).text(source).to_owned(),
            body: lower_block(body),
        });
    }
    Ok(functions)
}

/// Parses Go source and returns the named function's statement body.
pub fn find_function(source: &str, name: &str) -> Result<Function> {
    parse_functions(source)?
        .into_iter()
        .find(|f| f.name == name)
        .ok_or_else(|| Error::FunctionNotFound(name.to_owned()))
}

fn span_of(node: Node) -> Span {
    Span::new(node.start_byte(), node.end_byte())
}

fn lower_block(block: Node) -> Vec<Stmt> {
    let mut stmts = Vec::new();
    let mut cursor = block.walk();
    for child in block.named_children(&mut cursor) {
        if let Some(stmt) = lower_stmt(child) {
            stmts.push(stmt);
        }
    }
    stmts
}

fn lower_stmt(node: Node) -> Option<Stmt> {
    match node.kind() {
        "comment" | "empty_statement" => None,
        "if_statement" => Some(Stmt::Cond(lower_conditional(node))),
        "for_statement" => Some(lower_for(node)),
        "return_statement" => Some(Stmt::Return(span_of(node))),
        "break_statement" => Some(Stmt::Break),
        "continue_statement" => Some(Stmt::Continue),
        _ => Some(Stmt::Simple(span_of(node))),
    }
}

fn lower_conditional(node: Node) -> Conditional {
    // The condition text runs from the `if` keyword through the condition
    // expression, so an init statement (`if x := f(); x > 0`) is covered.
    let cond = node.child_by_field_name("condition").map_or_else(
        || span_of(node),
        |c| Span::new(node.start_byte(), c.end_byte()),
    );
    let body = node
        .child_by_field_name("consequence")
        .map_or_else(Vec::new, lower_block);
    let or_else = node.child_by_field_name("alternative").and_then(|alt| {
        match alt.kind() {
            "if_statement" => Some(ElseArm::If(Box::new(lower_conditional(alt)))),
            "block" => Some(ElseArm::Block(lower_block(alt))),
            _ => None,
        }
    });
    Conditional {
        cond,
        body,
        or_else,
    }
}

fn lower_for(node: Node) -> Stmt {
    let body = node
        .child_by_field_name("body")
        .map_or_else(Vec::new, lower_block);

    // A for statement carries at most one clause before the body: a full
    // for-clause, a range clause, or a bare condition expression.
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "for_clause" => {
                return Stmt::For {
                    init: child.child_by_field_name("initializer").map(span_of),
                    cond: child.child_by_field_name("condition").map(span_of),
                    post: child.child_by_field_name("update").map(span_of),
                    body,
                };
            }
            "range_clause" => {
                let expr = child
                    .child_by_field_name("right")
                    .map_or_else(|| span_of(child), span_of);
                return Stmt::Range { expr, body };
            }
            "block" | "comment" => {}
            // Bare expression: condition-only loop.
            _ => {
                return Stmt::For {
                    init: None,
                    cond: Some(span_of(child)),
                    post: None,
                    body,
                };
            }
        }
    }

    // No clause at all: loop forever.
    Stmt::For {
        init: None,
        cond: None,
        post: None,
        body,
    }
}
