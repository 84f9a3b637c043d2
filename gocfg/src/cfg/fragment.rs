//! Flow fragments: the compositional unit of graph construction.
//!
//! A fragment is the provisional sub-graph built for one statement or
//! statement list: one entry node plus the set of still-open exits, each
//! tagged with the reason control is still open. Deferred targets
//! (break/continue/return) travel as tagged exits instead of edges until
//! the binding loop or function boundary is known.

use crate::cfg::graph::{EdgeLabel, NodeId};

/// Why a fragment's control path is still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExitKind {
    /// Falls through to whatever comes next.
    Normal,
    /// Returns from the function; binds at finalization.
    Return,
    /// Continues the innermost enclosing loop.
    Continue,
    /// Breaks out of a loop that has not been seen yet.
    BreakUnresolved,
    /// Break already bound to its innermost loop; flows like `Normal`
    /// from here on but must never be re-resolved by an outer frame.
    BreakResolved,
}

impl ExitKind {
    /// Whether this exit participates in ordinary fall-through wiring.
    pub(crate) fn flows_on(self) -> bool {
        matches!(self, ExitKind::Normal | ExitKind::BreakResolved)
    }
}

/// One still-open exit of a fragment.
///
/// `node` is the graph node the eventual edge leaves from; `None` is the
/// sentinel for a break/continue with no sub-fragment before it, in which
/// case the enclosing construct substitutes its own branch point. `label`
/// is the pending edge label applied when the exit is finally wired.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Exit {
    pub(crate) node: Option<NodeId>,
    pub(crate) kind: ExitKind,
    pub(crate) label: Option<EdgeLabel>,
}

impl Exit {
    pub(crate) fn new(node: NodeId, kind: ExitKind) -> Self {
        Self {
            node: Some(node),
            kind,
            label: None,
        }
    }

    pub(crate) fn sentinel(kind: ExitKind) -> Self {
        Self {
            node: None,
            kind,
            label: None,
        }
    }
}

/// Provisional sub-graph: entry node plus open exits.
///
/// An empty statement list yields an empty fragment (no entry, no exits);
/// control passes straight through it.
#[derive(Debug, Default)]
pub(crate) struct Fragment {
    pub(crate) entry: Option<NodeId>,
    pub(crate) exits: Vec<Exit>,
}

impl Fragment {
    pub(crate) fn empty() -> Self {
        Self::default()
    }

    /// Fragment of a single node that falls through normally.
    pub(crate) fn node(id: NodeId) -> Self {
        Self {
            entry: Some(id),
            exits: vec![Exit::new(id, ExitKind::Normal)],
        }
    }

    /// Re-tags every fall-through exit in place; used when a trailing
    /// break or continue captures the preceding sub-fragment's exits.
    pub(crate) fn retag_open_exits(&mut self, kind: ExitKind) {
        for exit in &mut self.exits {
            if exit.kind.flows_on() {
                exit.kind = kind;
            }
        }
    }
}
