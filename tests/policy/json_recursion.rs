use sinkguard::parser::NodeKind;
use sinkguard::policy::check_json_aware;

#[test]
fn deep_values_are_checked() {
    let detection =
        check_json_aware(r#"{"a": {"b": ["ok", "y=alert(1)"]}}"#).expect("flagged");
    assert_eq!(detection.kind, NodeKind::AssignmentExpression);
    assert_eq!(detection.snippet, "y=alert(1)");
}

#[test]
fn keys_are_checked() {
    assert!(check_json_aware(r#"{"ok": 1, "x=alert(1)": 2}"#).is_some());
}

#[test]
fn inert_documents_are_clean() {
    assert!(check_json_aware(r#"{"a": "plain", "b": 1, "c": null, "d": [true, 2.5]}"#).is_none());
    assert!(check_json_aware("null").is_none());
    assert!(check_json_aware("[]").is_none());
}

#[test]
fn malformed_json_is_checked_as_text() {
    assert!(check_json_aware(r#"{"a": x=alert(1)"#).is_some());
    assert!(check_json_aware(r#"{"a": "plain""#).is_none());
}
