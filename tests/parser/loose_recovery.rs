use sinkguard::parser::{NodeKind, NullVisitor, ParseMode, ParseOptions, SyntaxNode, parse_program};

/// Test-local helper: a span is empty when it has zero width.
trait SpanExt {
    fn is_empty(&self) -> bool;
}

impl SpanExt for sinkguard::lexer::Span {
    fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

fn loose(source: &str) -> SyntaxNode {
    parse_program(source, ParseMode::Loose, ParseOptions::default(), &mut NullVisitor)
        .expect("loose parsing recovers")
}

fn kinds(node: &SyntaxNode) -> Vec<NodeKind> {
    let mut kinds = Vec::new();
    node.walk(&mut |node| kinds.push(node.kind));
    kinds
}

#[test]
fn junk_never_fails() {
    for source in [
        "foo bar baz",
        "}}} ((( ]]] ,,,",
        "Hello, world!",
        "'unterminated",
        "/unterminated regex",
        "`unterminated ${ template",
        "if while for",
        "=> => =>",
    ] {
        let program = loose(source);
        assert_eq!(program.kind, NodeKind::Program, "{source}");
    }
}

#[test]
fn missing_operand_becomes_placeholder() {
    let program = loose("a +");
    assert!(program.recovered);
    let binary = &program.children[0].children[0];
    assert_eq!(binary.kind, NodeKind::BinaryExpression);
    assert_eq!(binary.children[1].kind, NodeKind::Placeholder);
    assert!(binary.children[1].span.is_empty());
}

#[test]
fn keyword_without_paren_is_skipped_alone() {
    let program = loose("if x");
    let kinds = kinds(&program);
    assert!(kinds.contains(&NodeKind::Invalid));
    assert!(kinds.contains(&NodeKind::Identifier));
    assert!(!kinds.contains(&NodeKind::IfStatement));
}

#[test]
fn unclosed_call_is_still_a_call() {
    let program = loose("x=alert(1");
    let kinds = kinds(&program);
    assert!(kinds.contains(&NodeKind::AssignmentExpression));
    assert!(kinds.contains(&NodeKind::CallExpression));
    assert!(program.recovered);
}

#[test]
fn well_formed_input_is_not_marked_recovered() {
    let program = loose("a.b(c);");
    assert!(!program.recovered);
}
