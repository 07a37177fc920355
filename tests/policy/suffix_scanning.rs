use sinkguard::parser::{NodeKind, ParseMode};
use sinkguard::policy::{SuffixScanner, has_strict_injection, is_injection, scan_for_injection};

#[test]
fn padding_does_not_hide_payloads() {
    for source in [
        "foo bar;alert(1)",
        "some words here alert(1)",
        "1 2 3 new Image",
        "#@! eval(x)",
    ] {
        assert!(is_injection(source, ParseMode::Strict, false), "{source}");
    }
}

#[test]
fn detection_span_points_into_input() {
    let source = "junk junk;alert(1)";
    let detection = scan_for_injection(source, ParseMode::Strict, false).expect("flagged");
    assert_eq!(detection.kind, NodeKind::CallExpression);
    assert_eq!(detection.span.slice(source), detection.snippet);
}

#[test]
fn quote_breakouts_are_found() {
    assert!(has_strict_injection("abc';alert(1)//"));
    assert!(has_strict_injection("abc\";alert(1)//"));
    assert!(!has_strict_injection("it's a \"quoted\" word"));
}

#[test]
fn trigger_free_input_is_never_parsed() {
    assert!(!has_strict_injection("plain words and numbers 42"));
}

#[test]
fn scanner_reports_mode() {
    assert_eq!(SuffixScanner::new(ParseMode::Loose).mode(), ParseMode::Loose);
}
