//! Statement model: the typed view over one function's body that the
//! graph builder consumes.
//!
//! The builder never inspects raw syntax; it sees ordered statement lists
//! whose elements carry byte spans into the original source. Recovering
//! the text of a contiguous run of simple statements is a single slice
//! from the first span's start to the last span's end.

/// Half-open byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Span {
    /// Creates a span from byte offsets.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Slices the covered text out of the source.
    #[must_use]
    pub fn text(self, source: &str) -> &str {
        &source[self.start..self.end]
    }

    /// Extends this span to cover another one as well.
    #[must_use]
    pub fn join(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// One function declaration with its ordered statement body.
#[derive(Debug, Clone)]
pub struct Function {
    /// Declared function (or method) name.
    pub name: String,
    /// Ordered top-level statements of the body.
    pub body: Vec<Stmt>,
}

/// Discriminated statement kinds.
///
/// Statements the grammar knows but this model does not distinguish
/// (switch, select, defer, go, ...) arrive as [`Stmt::Simple`] carrying
/// their full span; new variants slot in here when they grow dedicated
/// handling.
#[derive(Debug, Clone)]
pub enum Stmt {
    /// Straight-line statement; the span covers its full text.
    Simple(Span),
    /// `if`/`else if`/`else` chain.
    Cond(Conditional),
    /// Counting loop: `for [init]; [cond]; [post] { ... }`.
    For {
        /// Init statement span, if present.
        init: Option<Span>,
        /// Condition expression span; `None` means loop forever.
        cond: Option<Span>,
        /// Post statement span, if present.
        post: Option<Span>,
        /// Loop body.
        body: Vec<Stmt>,
    },
    /// Collection loop: `for ... := range expr { ... }`.
    Range {
        /// Span of the iterated expression.
        expr: Span,
        /// Loop body.
        body: Vec<Stmt>,
    },
    /// `return`; the span covers the whole statement.
    Return(Span),
    /// `break` (labels are not modeled).
    Break,
    /// `continue` (labels are not modeled).
    Continue,
}

/// An `if` statement: condition, body, optional else arm.
#[derive(Debug, Clone)]
pub struct Conditional {
    /// Span of the condition text, from the `if` keyword through the end
    /// of the condition expression (covers init statements).
    pub cond: Span,
    /// True-branch statements.
    pub body: Vec<Stmt>,
    /// Else arm, if any.
    pub or_else: Option<ElseArm>,
}

/// The else side of a conditional.
#[derive(Debug, Clone)]
pub enum ElseArm {
    /// Plain `else { ... }` block.
    Block(Vec<Stmt>),
    /// `else if ...` chain.
    If(Box<Conditional>),
}
