//! Forbidden-construct classification.
//!
//! [`ConstructClassifier`] is the node visitor carried by every parse attempt.
//! Strict attempts stop at the first flagged node. Loose attempts run to the
//! end and keep the outermost flagged construct around the first flagged
//! region. Repaired nodes are skipped unless they are calls whose argument
//! list is still open when the input ends.

use crate::lexer::{is_js_whitespace, tokenize};
use crate::parser::{LiteralKind, NodeKind, NodeVisitor, ParseMode, SyntaxNode, VisitControl};
use crate::policy::{Detection, is_forbidden};

const ASSIGN_BEFORE: &[char] = &[',', ';', '{', '(', '[', ':'];
const ASSIGN_AFTER: &[char] = &[',', ';', ']', ')', '}'];
const SPREAD_BEFORE: &[char] = &[',', '[', '('];
const SPREAD_AFTER: &[char] = &[',', ']', ')'];

/// Globals whose members are worth stealing or overwriting.
const SENSITIVE_ROOTS: &[&str] = &[
    "document",
    "frames",
    "globalThis",
    "history",
    "indexedDB",
    "localStorage",
    "location",
    "navigator",
    "opener",
    "parent",
    "self",
    "sessionStorage",
    "top",
    "window",
];

/// Per-attempt visitor that records the flagged construct.
#[derive(Debug, Clone)]
pub struct ConstructClassifier {
    mode: ParseMode,
    detection: Option<Detection>,
}

impl ConstructClassifier {
    /// Creates a classifier for one attempt in `mode`.
    pub fn new(mode: ParseMode) -> Self {
        Self {
            mode,
            detection: None,
        }
    }

    /// Returns the retained detection.
    pub fn detection(&self) -> Option<&Detection> {
        self.detection.as_ref()
    }

    /// Consumes the classifier, returning the retained detection.
    pub fn into_detection(self) -> Option<Detection> {
        self.detection
    }

    /// Decides whether a node of a forbidden kind is flagged.
    pub fn flags(&self, node: &SyntaxNode, source: &str) -> bool {
        match (node.kind, self.mode) {
            (NodeKind::AssignmentExpression, ParseMode::Strict) => strict_assignment(node),
            (NodeKind::AssignmentExpression, ParseMode::Loose) => loose_assignment(node, source),
            (NodeKind::WithStatement, ParseMode::Loose) => loose_with(node, source),
            (NodeKind::SpreadElement, ParseMode::Loose) => loose_spread(node, source),
            _ => true,
        }
    }
}

impl NodeVisitor for ConstructClassifier {
    fn visit(&mut self, node: &SyntaxNode, source: &str) -> VisitControl {
        if !is_forbidden(node.kind) {
            return VisitControl::Continue;
        }
        if self.mode == ParseMode::Loose && node.recovered && !judged_when_repaired(node, source) {
            return VisitControl::Continue;
        }
        if !self.flags(node, source) {
            return VisitControl::Continue;
        }

        match self.mode {
            ParseMode::Strict => {
                self.detection = Some(Detection::from_node(node, source));
                VisitControl::Halt
            }
            ParseMode::Loose => {
                let replaces = self
                    .detection
                    .as_ref()
                    .is_none_or(|retained| node.span.contains(retained.span));
                if replaces {
                    self.detection = Some(Detection::from_node(node, source));
                }
                VisitControl::Continue
            }
        }
    }
}

/// Repaired nodes that still count as constructs of the input.
fn judged_when_repaired(node: &SyntaxNode, source: &str) -> bool {
    match node.kind {
        // A `with` header is judged on its own; a missing body does not matter.
        NodeKind::WithStatement => true,
        NodeKind::CallExpression | NodeKind::NewExpression => arguments_left_open(node, source),
        _ => false,
    }
}

/// `true` when the parenthesis after the callee is never closed, as in
/// `';alert(1,'` cut out of `var x='…';`. The rest of the page closes the call.
fn arguments_left_open(node: &SyntaxNode, source: &str) -> bool {
    let Some(callee) = node.callee() else {
        return false;
    };
    let tail = source.get(callee.span.end.as_usize()..).unwrap_or_default();
    let mut depth = 0usize;
    for token in tokenize(tail) {
        match token.text {
            "(" => depth += 1,
            ")" if depth <= 1 => return false,
            ")" => depth -= 1,
            _ => {}
        }
    }
    depth > 0
}

fn is_target_shape(node: &SyntaxNode) -> bool {
    matches!(
        node.kind,
        NodeKind::MemberExpression | NodeKind::ArrayPattern | NodeKind::ObjectPattern
    ) || node.is_identifier("location")
}

fn strict_assignment(node: &SyntaxNode) -> bool {
    let left = node.left().is_some_and(is_target_shape);
    let right = node.right().is_some_and(|right| {
        matches!(
            right.kind,
            NodeKind::FunctionExpression | NodeKind::CallExpression | NodeKind::MemberExpression
        )
    });
    left || right
}

fn loose_assignment(node: &SyntaxNode, source: &str) -> bool {
    if !free_standing(node, source, ASSIGN_BEFORE, ASSIGN_AFTER) {
        return false;
    }
    let (Some(left), Some(right)) = (node.left(), node.right()) else {
        return false;
    };

    let plain_value = matches!(
        right.kind,
        NodeKind::Placeholder
            | NodeKind::AssignmentExpression
            | NodeKind::UnaryExpression
            | NodeKind::Literal(LiteralKind::Number | LiteralKind::Boolean | LiteralKind::Null)
    );
    let overwrites = is_target_shape(left) && !plain_value;

    let runs = match right.kind {
        NodeKind::FunctionExpression | NodeKind::CallExpression => true,
        NodeKind::MemberExpression => reads_sensitive_root(right),
        _ => false,
    };
    overwrites || runs
}

/// Walks a member chain down to its root object.
fn reads_sensitive_root(member: &SyntaxNode) -> bool {
    let mut root = member;
    while let Some(object) = root.object() {
        root = object;
    }
    root.kind == NodeKind::ThisExpression
        || root
            .name
            .as_deref()
            .is_some_and(|name| root.kind == NodeKind::Identifier && SENSITIVE_ROOTS.contains(&name))
}

/// `with(name` with nothing but whitespace between the keyword and `(`.
fn loose_with(node: &SyntaxNode, source: &str) -> bool {
    let Some(object) = node.object() else {
        return false;
    };
    if object.kind != NodeKind::Identifier {
        return false;
    }
    let after_keyword = node
        .text(source)
        .get("with".len()..)
        .unwrap_or_default()
        .trim_start_matches(is_js_whitespace);
    after_keyword.starts_with('(')
}

fn loose_spread(node: &SyntaxNode, source: &str) -> bool {
    if !free_standing(node, source, SPREAD_BEFORE, SPREAD_AFTER) {
        return false;
    }
    node.argument().is_some_and(|argument| {
        matches!(
            argument.kind,
            NodeKind::Identifier
                | NodeKind::ArrayExpression
                | NodeKind::TemplateLiteral
                | NodeKind::Literal(LiteralKind::String)
        )
    })
}

/// Checks the nearest non-whitespace characters around `node`.
fn free_standing(node: &SyntaxNode, source: &str, before: &[char], after: &[char]) -> bool {
    let head = source.get(..node.span.start.as_usize()).unwrap_or_default();
    let tail = source.get(node.span.end.as_usize()..).unwrap_or_default();
    let previous = head.trim_end_matches(is_js_whitespace).chars().next_back();
    let next = tail.trim_start_matches(is_js_whitespace).chars().next();
    previous.is_none_or(|ch| before.contains(&ch)) && next.is_none_or(|ch| after.contains(&ch))
}
