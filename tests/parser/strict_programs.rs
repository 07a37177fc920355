use sinkguard::parser::{
    LiteralKind, NodeKind, NullVisitor, ParseErrorKind, ParseMode, ParseOptions, SyntaxNode,
    VisitControl, parse_program,
};

fn visited(source: &str) -> Vec<NodeKind> {
    let mut seen = Vec::new();
    let mut visitor = |node: &SyntaxNode, _source: &str| {
        seen.push(node.kind);
        VisitControl::Continue
    };
    parse_program(source, ParseMode::Strict, ParseOptions::default(), &mut visitor)
        .expect("program parses");
    seen
}

fn tree_kinds(source: &str) -> Vec<NodeKind> {
    let program = parse_program(
        source,
        ParseMode::Strict,
        ParseOptions::default(),
        &mut NullVisitor,
    )
    .expect("program parses");
    let mut kinds = Vec::new();
    program.walk(&mut |node| kinds.push(node.kind));
    kinds
}

fn strict_error(source: &str) -> ParseErrorKind {
    parse_program(
        source,
        ParseMode::Strict,
        ParseOptions::default(),
        &mut NullVisitor,
    )
    .expect_err("program must fail")
    .kind
}

#[test]
fn nodes_arrive_children_first() {
    assert_eq!(
        visited("alert(1)"),
        vec![
            NodeKind::Identifier,
            NodeKind::Literal(LiteralKind::Number),
            NodeKind::CallExpression,
            NodeKind::ExpressionStatement,
            NodeKind::Program,
        ]
    );
}

#[test]
fn program_span_covers_source() {
    let source = "  a.b ;  ";
    let program = parse_program(
        source,
        ParseMode::Strict,
        ParseOptions::default(),
        &mut NullVisitor,
    )
    .expect("program parses");
    assert_eq!(program.kind, NodeKind::Program);
    assert_eq!(program.span.end.as_usize(), source.len());
    let member = &program.children[0].children[0];
    assert_eq!(member.kind, NodeKind::MemberExpression);
    assert_eq!(member.text(source), "a.b");
}

#[test]
fn module_forms_parse_anywhere() {
    let kinds = visited("import a, {b as c} from 'm'; export default 1; export * from 'n';");
    for kind in [
        NodeKind::ImportDefaultSpecifier,
        NodeKind::ImportSpecifier,
        NodeKind::ImportDeclaration,
        NodeKind::ExportDefaultDeclaration,
        NodeKind::ExportAllDeclaration,
    ] {
        assert!(kinds.contains(&kind), "missing {kind:?}");
    }
}

#[test]
fn destructuring_assignment_yields_pattern() {
    let kinds = tree_kinds("[a, b] = c");
    assert!(kinds.contains(&NodeKind::AssignmentExpression));
    assert!(kinds.contains(&NodeKind::ArrayPattern));
    assert!(!kinds.contains(&NodeKind::ArrayExpression));
}

#[test]
fn parenthesised_parameters_become_arrow() {
    let kinds = tree_kinds("(a, b) => a");
    assert!(kinds.contains(&NodeKind::ArrowFunctionExpression));
    assert!(!kinds.contains(&NodeKind::SequenceExpression));
}

#[test]
fn statements_of_es2015() {
    let kinds = visited(
        "for (const k of list) { if (k) continue; }\
         function* g() { yield 1; }\
         class A extends B { static m() { return new.target; } }\
         try { x } catch (e) {} finally {}\
         label: while (1) break label;",
    );
    for kind in [
        NodeKind::ForOfStatement,
        NodeKind::ContinueStatement,
        NodeKind::FunctionDeclaration,
        NodeKind::YieldExpression,
        NodeKind::ClassDeclaration,
        NodeKind::MethodDefinition,
        NodeKind::MetaProperty,
        NodeKind::TryStatement,
        NodeKind::CatchClause,
        NodeKind::LabeledStatement,
        NodeKind::BreakStatement,
    ] {
        assert!(kinds.contains(&kind), "missing {kind:?}");
    }
}

#[test]
fn tagged_templates_and_spread() {
    let kinds = visited("tag`a${b}c`; f(...args)");
    assert!(kinds.contains(&NodeKind::TaggedTemplateExpression));
    assert!(kinds.contains(&NodeKind::TemplateLiteral));
    assert!(kinds.contains(&NodeKind::SpreadElement));
}

#[test]
fn strict_mode_rejects_malformed_input() {
    assert_eq!(strict_error("a +"), ParseErrorKind::UnexpectedEndOfInput);
    assert_eq!(strict_error("foo bar"), ParseErrorKind::UnexpectedToken);
    assert_eq!(strict_error("1 = 2"), ParseErrorKind::InvalidAssignmentTarget);
}

#[test]
fn prose_is_not_a_program() {
    assert_eq!(strict_error("Hello, world!"), ParseErrorKind::UnexpectedToken);
}
