use sinkguard::parser::{NodeKind, ParseMode};
use sinkguard::policy::{FORBIDDEN_KINDS, is_forbidden, scan_for_injection};

fn strict_kind(source: &str) -> Option<NodeKind> {
    scan_for_injection(source, ParseMode::Strict, true).map(|detection| detection.kind)
}

#[test]
fn forbidden_set_is_fixed() {
    assert_eq!(FORBIDDEN_KINDS.len(), 23);
    assert!(is_forbidden(NodeKind::CallExpression));
    assert!(is_forbidden(NodeKind::WithStatement));
    assert!(!is_forbidden(NodeKind::MemberExpression));
    assert!(!is_forbidden(NodeKind::BinaryExpression));
}

#[test]
fn unconditional_kinds_are_flagged_in_strict_mode() {
    let cases = [
        ("alert(1)", NodeKind::CallExpression),
        ("new Image", NodeKind::NewExpression),
        ("function f() {}", NodeKind::FunctionDeclaration),
        ("var x", NodeKind::VariableDeclaration),
        ("for (k in o);", NodeKind::ForInStatement),
        ("tag`x`", NodeKind::TaggedTemplateExpression),
        ("import 'm'", NodeKind::ImportDeclaration),
        ("with (o) {}", NodeKind::WithStatement),
    ];
    for (source, kind) in cases {
        assert_eq!(strict_kind(source), Some(kind), "{source}");
    }
}

#[test]
fn strict_assignment_needs_sensitive_shape() {
    assert_eq!(strict_kind("a = 1"), None);
    assert_eq!(strict_kind("a = b"), None);
    assert_eq!(strict_kind("location = 1"), Some(NodeKind::AssignmentExpression));
    assert_eq!(strict_kind("a.b = 1"), Some(NodeKind::AssignmentExpression));
    assert_eq!(strict_kind("a = b.c"), Some(NodeKind::AssignmentExpression));
    assert_eq!(strict_kind("[a] = b"), Some(NodeKind::AssignmentExpression));
}

#[test]
fn nested_payloads_are_found() {
    assert_eq!(strict_kind("`${alert(1)}`"), Some(NodeKind::CallExpression));
    assert_eq!(strict_kind("1 + (2, alert(1))"), Some(NodeKind::CallExpression));
}

#[test]
fn inert_expressions_are_clean() {
    for source in ["1 + 2", "a.b.c", "'string'", "x ? y : z", "typeof a", "[1, 2]", "{}"] {
        assert_eq!(strict_kind(source), None, "{source}");
    }
}
