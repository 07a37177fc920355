//! Script injection policy.
//!
//! A string is an injection when some suffix of it parses into a forbidden
//! construct. [`classifier`] decides which nodes count, [`suffix`] drives the
//! parse attempts, and [`json`] applies the loose check to every key and value
//! of a JSON document.

pub mod classifier;
pub mod json;
pub mod suffix;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexer::Span;
use crate::parser::{NodeKind, ParseMode, SyntaxNode};

pub use classifier::ConstructClassifier;
pub use json::check_json_aware;
pub use suffix::{SuffixScanner, is_injection, scan_for_injection};

/// Node kinds that can run attacker logic when a string reaches a script sink.
pub const FORBIDDEN_KINDS: &[NodeKind] = &[
    NodeKind::ArrayPattern,
    NodeKind::ArrowFunctionExpression,
    NodeKind::AssignmentExpression,
    NodeKind::CallExpression,
    NodeKind::ExportAllDeclaration,
    NodeKind::ExportDefaultDeclaration,
    NodeKind::ExportNamedDeclaration,
    NodeKind::ExportSpecifier,
    NodeKind::ForOfStatement,
    NodeKind::ForInStatement,
    NodeKind::FunctionDeclaration,
    NodeKind::FunctionExpression,
    NodeKind::ImportDeclaration,
    NodeKind::ImportDefaultSpecifier,
    NodeKind::ImportNamespaceSpecifier,
    NodeKind::ImportSpecifier,
    NodeKind::NewExpression,
    NodeKind::ObjectPattern,
    NodeKind::SpreadElement,
    NodeKind::TaggedTemplateExpression,
    NodeKind::VariableDeclaration,
    NodeKind::WithStatement,
    NodeKind::YieldExpression,
];

/// Returns `true` when `kind` is in [`FORBIDDEN_KINDS`].
pub fn is_forbidden(kind: NodeKind) -> bool {
    FORBIDDEN_KINDS.contains(&kind)
}

/// Characters and words without which no forbidden construct can be written.
static TRIGGER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"['"=;()\[\]{}.`]|export|import"#).expect("trigger pattern is valid")
});

/// Cheap pre-filter run before any parse attempt.
pub fn has_trigger(input: &str) -> bool {
    TRIGGER.is_match(input)
}

/// A flagged construct.
///
/// `span` is relative to the string handed to the scanner that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    /// Kind of the flagged node.
    pub kind: NodeKind,
    /// Source range of the flagged node.
    pub span: Span,
    /// Source text of the flagged node.
    pub snippet: String,
}

impl Detection {
    /// Captures `node` as parsed from `source`.
    pub fn from_node(node: &SyntaxNode, source: &str) -> Self {
        Self {
            kind: node.kind,
            span: node.span,
            snippet: node.text(source).to_string(),
        }
    }

    /// Moves the span right by `offset` bytes.
    pub fn shifted(mut self, offset: usize) -> Self {
        if offset == 0 {
            return self;
        }
        self.span = self.span.shifted(offset);
        self
    }
}

/// Scans `input` after its first `'`, after its first `"`, then whole.
///
/// Quote-breaking payloads such as `x';alert(1)//` only parse once the text
/// up to the quote is cut away.
pub(crate) fn check_quote_splits(input: &str, scanner: &SuffixScanner) -> Option<Detection> {
    if !has_trigger(input) {
        return None;
    }
    for quote in ['\'', '"'] {
        if let Some(index) = input.find(quote) {
            let offset = index + 1;
            if let Some(detection) = scanner.scan(&input[offset..]) {
                return Some(detection.shifted(offset));
            }
        }
    }
    scanner.scan(input)
}

/// Strict three-way check used by the `js` context.
pub fn has_strict_injection(input: &str) -> bool {
    check_quote_splits(input, &SuffixScanner::new(ParseMode::Strict)).is_some()
}
