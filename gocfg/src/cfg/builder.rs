//! Recursive construction of the graph from a statement list.
//!
//! One pass, top to bottom: each statement list becomes a flow fragment,
//! constructs recurse, and deferred exits (break/continue/return) travel
//! upward as tagged data until the binding loop or the function boundary
//! wires them. Finalization attaches the synthetic exit node and checks
//! the structural invariants.

use crate::cfg::fragment::{Exit, ExitKind, Fragment};
use crate::cfg::graph::{EdgeLabel, Graph, NodeArena, NodeId, NodeKind};
use crate::error::{GraphError, Result};
use crate::frontend::{Conditional, ElseArm, Function, Span, Stmt};

/// Node text of a loop condition that is always true.
const FOREVER: &str = "FOREVER";

/// Node text of the synthetic function-exit node.
const EXIT_TEXT: &str = "RETURN";

/// Node text standing in for an empty function body.
const EMPTY_BLOCK: &str = "EMPTY BLOCK";

/// Builds the control-flow graph of one function body.
pub fn build(source: &str, function: &Function) -> Result<Graph> {
    let mut builder = GraphBuilder::new(source);
    let body = builder.build_block(&function.body)?;
    builder.finish(function.name.clone(), body)
}

/// Parses Go source and builds one graph per function, in source order.
pub fn build_all(source: &str) -> Result<Vec<Graph>> {
    crate::frontend::parse_functions(source)?
        .iter()
        .map(|function| build(source, function))
        .collect()
}

/// Targets break/continue resolve against, innermost frame last.
#[derive(Debug, Clone, Copy)]
struct LoopFrame {
    /// Where normal fall-through and `continue` re-enter the loop: the
    /// post-step node if the loop has one, otherwise its condition node.
    post: NodeId,
}

struct GraphBuilder<'a> {
    source: &'a str,
    arena: NodeArena,
    loop_stack: Vec<LoopFrame>,
}

impl<'a> GraphBuilder<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            arena: NodeArena::default(),
            loop_stack: Vec::new(),
        }
    }

    /// Registered node holding the source text of one span.
    fn span_node(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = self.arena.alloc(kind, span.text(self.source).to_owned());
        self.arena.register(id);
        id
    }

    /// Flushes the pending run of simple statements into its own node.
    fn flush(&mut self, pending: &mut Option<Span>, parts: &mut Vec<Fragment>) {
        if let Some(span) = pending.take() {
            let id = self.span_node(NodeKind::Sequence, span);
            parts.push(Fragment::node(id));
        }
    }

    /// Turns an ordered statement list into one fragment.
    ///
    /// Statements after a return/break/continue, or after a construct
    /// none of whose exits fall through, are unreachable and dropped.
    fn build_block(&mut self, stmts: &[Stmt]) -> Result<Fragment> {
        let mut parts: Vec<Fragment> = Vec::new();
        let mut pending: Option<Span> = None;

        for stmt in stmts {
            let fragment = match stmt {
                Stmt::Simple(span) => {
                    pending = Some(pending.map_or(*span, |p| p.join(*span)));
                    None
                }
                Stmt::Cond(cond) => {
                    self.flush(&mut pending, &mut parts);
                    Some(self.conditional(cond)?)
                }
                Stmt::For {
                    init,
                    cond,
                    post,
                    body,
                } => {
                    self.flush(&mut pending, &mut parts);
                    Some(self.counting_loop(*init, *cond, *post, body)?)
                }
                Stmt::Range { expr, body } => {
                    self.flush(&mut pending, &mut parts);
                    Some(self.collection_loop(*expr, body)?)
                }
                Stmt::Return(span) => {
                    // Pending text and the return merge into one node.
                    let merged = pending.take().map_or(*span, |p| p.join(*span));
                    let id = self.span_node(NodeKind::Branch, merged);
                    parts.push(Fragment {
                        entry: Some(id),
                        exits: vec![Exit::new(id, ExitKind::Return)],
                    });
                    return Ok(self.wire_sequence(parts));
                }
                Stmt::Break | Stmt::Continue => {
                    self.flush(&mut pending, &mut parts);
                    let kind = if matches!(stmt, Stmt::Break) {
                        ExitKind::BreakUnresolved
                    } else {
                        ExitKind::Continue
                    };
                    match parts.last_mut() {
                        Some(last) => last.retag_open_exits(kind),
                        None => parts.push(Fragment {
                            entry: None,
                            exits: vec![Exit::sentinel(kind)],
                        }),
                    }
                    return Ok(self.wire_sequence(parts));
                }
            };
            if let Some(fragment) = fragment {
                let falls_through = fragment.exits.iter().any(|x| x.kind.flows_on());
                parts.push(fragment);
                if !falls_through {
                    return Ok(self.wire_sequence(parts));
                }
            }
        }

        self.flush(&mut pending, &mut parts);
        Ok(self.wire_sequence(parts))
    }

    /// Wires adjacent sub-fragments together: every fall-through exit of
    /// an earlier fragment connects to the entry of the next one; all
    /// other exit kinds bypass the wiring and carry through unchanged.
    fn wire_sequence(&mut self, parts: Vec<Fragment>) -> Fragment {
        let mut it = parts.into_iter();
        let Some(first) = it.next() else {
            return Fragment::empty();
        };

        let mut result = Fragment {
            entry: first.entry,
            exits: Vec::new(),
        };
        let mut open: Vec<Exit> = Vec::new();
        split_exits(first.exits, &mut open, &mut result.exits);

        for part in it {
            if let Some(entry) = part.entry {
                for exit in open.drain(..) {
                    // Open exits always carry a node: sentinels are only
                    // ever break/continue, which do not flow on, and they
                    // receive a node at their binding construct.
                    debug_assert!(exit.node.is_some(), "open exit without a node");
                    if let Some(node) = exit.node {
                        self.arena.add_edge(node, entry, exit.label);
                    }
                }
            }
            // An entry-less fragment is empty: flow passes straight
            // through, so the open set stays open.
            split_exits(part.exits, &mut open, &mut result.exits);
        }

        result.exits.append(&mut open);
        result
    }

    /// One condition node, a true arm, and a false arm (else block,
    /// else-if chain, or the condition's own labeled fall-through).
    fn conditional(&mut self, conditional: &Conditional) -> Result<Fragment> {
        let cond = self.span_node(NodeKind::Condition, conditional.cond);
        let body = self.build_block(&conditional.body)?;
        let mut exits = self.attach_branch(cond, body, EdgeLabel::True);

        match &conditional.or_else {
            Some(ElseArm::Block(stmts)) => {
                let arm = self.build_block(stmts)?;
                exits.extend(self.attach_branch(cond, arm, EdgeLabel::False));
            }
            Some(ElseArm::If(inner)) => {
                let arm = self.conditional(inner)?;
                exits.extend(self.attach_branch(cond, arm, EdgeLabel::False));
            }
            None => exits.push(Exit {
                node: Some(cond),
                kind: ExitKind::Normal,
                label: Some(EdgeLabel::False),
            }),
        }

        Ok(Fragment {
            entry: Some(cond),
            exits,
        })
    }

    /// Wires one side of a condition node. A non-empty arm gets a labeled
    /// edge into its entry and keeps its exits; an empty arm turns into
    /// the condition's own exit, with the branch label overriding.
    fn attach_branch(&mut self, cond: NodeId, arm: Fragment, label: EdgeLabel) -> Vec<Exit> {
        match arm.entry {
            Some(entry) => {
                self.arena.add_edge(cond, entry, Some(label));
                arm.exits
            }
            None if arm.exits.is_empty() => vec![Exit {
                node: Some(cond),
                kind: ExitKind::Normal,
                label: Some(label),
            }],
            None => arm
                .exits
                .into_iter()
                .map(|exit| Exit {
                    node: Some(exit.node.unwrap_or(cond)),
                    kind: exit.kind,
                    label: Some(label),
                })
                .collect(),
        }
    }

    /// `for [init]; [cond]; [post] { body }`
    fn counting_loop(
        &mut self,
        init: Option<Span>,
        cond: Option<Span>,
        post: Option<Span>,
        body: &[Stmt],
    ) -> Result<Fragment> {
        let init_node = init.map(|span| self.span_node(NodeKind::Sequence, span));
        let cond_node = {
            let text = cond.map_or_else(|| FOREVER.to_owned(), |s| s.text(self.source).to_owned());
            let id = self.arena.alloc(NodeKind::Condition, text);
            self.arena.register(id);
            id
        };
        if let Some(init_node) = init_node {
            self.arena.add_edge(init_node, cond_node, None);
        }
        let post_node = post.map(|span| {
            let id = self.span_node(NodeKind::Sequence, span);
            self.arena.add_edge(id, cond_node, None);
            id
        });

        self.loop_stack.push(LoopFrame {
            post: post_node.unwrap_or(cond_node),
        });
        let routed = self
            .build_block(body)
            .map(|frag| self.route_body_exits(cond_node, EdgeLabel::True, frag));
        self.loop_stack.pop();
        let mut exits = routed?;

        exits.push(Exit {
            node: Some(cond_node),
            kind: ExitKind::Normal,
            label: Some(EdgeLabel::False),
        });
        Ok(Fragment {
            entry: Some(init_node.unwrap_or(cond_node)),
            exits,
        })
    }

    /// `for ... := range expr { body }` — the range node doubles as the
    /// loop's post step.
    fn collection_loop(&mut self, expr: Span, body: &[Stmt]) -> Result<Fragment> {
        let range_node = self.span_node(NodeKind::Condition, expr);

        self.loop_stack.push(LoopFrame { post: range_node });
        let routed = self
            .build_block(body)
            .map(|frag| self.route_body_exits(range_node, EdgeLabel::NotEmpty, frag));
        self.loop_stack.pop();
        let mut exits = routed?;

        exits.push(Exit {
            node: Some(range_node),
            kind: ExitKind::Normal,
            label: Some(EdgeLabel::Empty),
        });
        Ok(Fragment {
            entry: Some(range_node),
            exits,
        })
    }

    /// Routes a loop body's exits against the innermost frame: normal
    /// fall-through and `continue` re-enter at the post target, an
    /// unresolved break binds here and is re-tagged resolved (never to be
    /// re-resolved further out), returns bubble unchanged. Sentinel exits
    /// (a body that is nothing but break/continue) take the condition's
    /// true side.
    fn route_body_exits(
        &mut self,
        cond: NodeId,
        true_label: EdgeLabel,
        body: Fragment,
    ) -> Vec<Exit> {
        // The caller pushed the frame just before building the body.
        let post = self.loop_stack.last().map_or(cond, |frame| frame.post);

        match body.entry {
            Some(entry) => self.arena.add_edge(cond, entry, Some(true_label)),
            // Empty body: condition loops straight back to the post
            // target (or itself), re-adding this edge deduplicates.
            None if body.exits.is_empty() => self.arena.add_edge(cond, post, Some(true_label)),
            None => {}
        }

        let mut carried = Vec::new();
        for exit in body.exits {
            let node = exit.node.unwrap_or(cond);
            let label = if exit.node.is_none() {
                Some(true_label)
            } else {
                exit.label
            };
            match exit.kind {
                ExitKind::Normal | ExitKind::BreakResolved | ExitKind::Continue => {
                    self.arena.add_edge(node, post, label);
                }
                ExitKind::BreakUnresolved => carried.push(Exit {
                    node: Some(node),
                    kind: ExitKind::BreakResolved,
                    label,
                }),
                ExitKind::Return => carried.push(Exit {
                    node: Some(node),
                    kind: ExitKind::Return,
                    label,
                }),
            }
        }
        carried
    }

    /// Closes the graph: attaches the synthetic exit node to every open
    /// fall-through and every collected return. Break/continue surviving
    /// to this point had no enclosing loop and abort construction.
    fn finish(mut self, name: String, body: Fragment) -> Result<Graph> {
        let exit = self.arena.alloc(NodeKind::Branch, EXIT_TEXT.to_owned());

        let root = match body.entry {
            Some(entry) => entry,
            None => {
                let id = self.arena.alloc(NodeKind::Sequence, EMPTY_BLOCK.to_owned());
                self.arena.register(id);
                self.arena.add_edge(id, exit, None);
                id
            }
        };

        for open in body.exits {
            match open.kind {
                ExitKind::Normal | ExitKind::BreakResolved | ExitKind::Return => {
                    if let Some(node) = open.node {
                        self.arena.add_edge(node, exit, open.label);
                    }
                }
                ExitKind::BreakUnresolved => return Err(GraphError::StrayBreak.into()),
                ExitKind::Continue => return Err(GraphError::StrayContinue.into()),
            }
        }

        // The exit node is registered last so it always displays last.
        self.arena.register(exit);
        self.arena.finish(name, root, exit)
    }
}

fn split_exits(exits: Vec<Exit>, open: &mut Vec<Exit>, carried: &mut Vec<Exit>) {
    for exit in exits {
        if exit.kind.flows_on() {
            open.push(exit);
        } else {
            carried.push(exit);
        }
    }
}
