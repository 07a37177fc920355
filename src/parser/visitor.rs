//! Node-completion callbacks.

use crate::parser::ast::SyntaxNode;

/// What the parser does after a visitor saw a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisitControl {
    /// Keep parsing.
    Continue,
    /// Abort the attempt with [`crate::parser::ParseErrorKind::Halted`].
    Halt,
}

/// Receives every node the moment the parser finishes it.
///
/// Nodes arrive in production order: children before their parent, and
/// everything finished before a syntax error is still delivered. Patterns the
/// parser reinterprets from already-finished expressions (`[a] = b`) are not
/// delivered a second time.
pub trait NodeVisitor {
    /// Inspects a finished node. `source` is the text being parsed.
    fn visit(&mut self, node: &SyntaxNode, source: &str) -> VisitControl;
}

/// Visitor that ignores every node.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullVisitor;

impl NodeVisitor for NullVisitor {
    fn visit(&mut self, _node: &SyntaxNode, _source: &str) -> VisitControl {
        VisitControl::Continue
    }
}

impl<F> NodeVisitor for F
where
    F: FnMut(&SyntaxNode, &str) -> VisitControl,
{
    fn visit(&mut self, node: &SyntaxNode, source: &str) -> VisitControl {
        self(node, source)
    }
}
