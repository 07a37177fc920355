use sinkguard::parser::{
    NodeKind, NullVisitor, ParseErrorKind, ParseMode, ParseOptions, SyntaxNode, VisitControl,
    parse_program,
};

fn deep_parens(depth: usize) -> String {
    format!("{}1{}", "(".repeat(depth), ")".repeat(depth))
}

#[test]
fn nesting_limit_aborts_both_modes() {
    let source = deep_parens(200);
    for mode in [ParseMode::Strict, ParseMode::Loose] {
        let error = parse_program(&source, mode, ParseOptions::default(), &mut NullVisitor)
            .expect_err("nesting limit must trip");
        assert_eq!(error.kind, ParseErrorKind::NestingLimitExceeded);
        assert!(error.is_fatal());
    }
}

#[test]
fn shallow_nesting_parses() {
    let source = deep_parens(20);
    assert!(
        parse_program(
            &source,
            ParseMode::Strict,
            ParseOptions::default(),
            &mut NullVisitor
        )
        .is_ok()
    );
}

#[test]
fn node_budget_is_enforced() {
    let options = ParseOptions {
        max_nodes: 3,
        ..ParseOptions::default()
    };
    let error = parse_program("a+b+c", ParseMode::Loose, options, &mut NullVisitor)
        .expect_err("node budget must trip");
    assert_eq!(error.kind, ParseErrorKind::NodeLimitExceeded);
}

#[test]
fn visitor_can_halt_an_attempt() {
    let mut seen = Vec::new();
    let mut visitor = |node: &SyntaxNode, _source: &str| {
        seen.push(node.kind);
        if node.kind == NodeKind::CallExpression {
            VisitControl::Halt
        } else {
            VisitControl::Continue
        }
    };
    let error = parse_program(
        "f(); g();",
        ParseMode::Strict,
        ParseOptions::default(),
        &mut visitor,
    )
    .expect_err("visitor halts");
    assert_eq!(error.kind, ParseErrorKind::Halted);
    assert_eq!(seen, vec![NodeKind::Identifier, NodeKind::CallExpression]);
}

#[test]
fn options_deserialize_with_defaults() {
    let options: ParseOptions =
        serde_json::from_str(r#"{"max_nesting": 16}"#).expect("valid options");
    assert_eq!(options.max_nesting, 16);
    assert_eq!(options.max_nodes, ParseOptions::default().max_nodes);
}

fn on_small_stack(task: impl FnOnce() + Send + 'static) {
    std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(task)
        .expect("spawn parser thread")
        .join()
        .expect("parser thread finished");
}

#[test]
fn long_left_nested_chains_drop_without_overflow() {
    on_small_stack(|| {
        let unbounded = ParseOptions {
            max_nodes: usize::MAX,
            ..ParseOptions::default()
        };
        for link in ["a.", "a+", "a,"] {
            let source = format!("{}a", link.repeat(100_000));
            let program = parse_program(&source, ParseMode::Strict, unbounded, &mut NullVisitor)
                .expect("chain parses");
            let mut count = 0usize;
            program.walk(&mut |_| count += 1);
            assert!(count > 100_000);
            drop(program);
        }
    });
}

#[test]
fn chain_over_node_budget_fails_cleanly() {
    on_small_stack(|| {
        let source = format!("{}a", "a.".repeat(100_000));
        let error = parse_program(&source, ParseMode::Loose, ParseOptions::default(), &mut NullVisitor)
            .expect_err("node budget must trip");
        assert_eq!(error.kind, ParseErrorKind::NodeLimitExceeded);
    });
}
