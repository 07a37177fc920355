use sinkguard::parser::NodeKind;
use sinkguard::{
    CallbackRegistry, Context, SanitizeOptions, Sanitized, Sanitizer, SanitizerConfig, Verdict,
    is_supported, sanitize,
};

fn only(context: Context) -> SanitizeOptions {
    SanitizeOptions::new([context])
}

#[test]
fn js_context() {
    assert_eq!(sanitize("alert(1)", &only(Context::Js)), Sanitized::Rejected);
    assert_eq!(
        sanitize("Hello, world!", &only(Context::Js)),
        Sanitized::Clean("Hello, world!".to_string())
    );
    assert_eq!(
        sanitize("abc';alert(1)//", &only(Context::Js)).as_str(),
        ""
    );
}

#[test]
fn url_context() {
    assert_eq!(
        sanitize("javascript:alert(1)", &only(Context::Url)),
        Sanitized::Rejected
    );
    assert_eq!(
        sanitize("https://example.com/x", &only(Context::Url)).as_str(),
        "https://example.com/x"
    );
}

#[test]
fn encoded_payloads_are_decoded_first() {
    assert_eq!(
        sanitize("javascript&#58;alert(1)", &only(Context::Url)),
        Sanitized::Rejected
    );
    assert_eq!(
        sanitize("java%0Ascript:alert(1)", &only(Context::Url)),
        Sanitized::Rejected
    );
    assert_eq!(
        sanitize("%61lert%281%29", &only(Context::Js)),
        Sanitized::Rejected
    );
}

#[test]
fn clean_result_is_the_original_input() {
    assert_eq!(
        sanitize("a&amp;b", &only(Context::Js)),
        Sanitized::Clean("a&amp;b".to_string())
    );
}

#[test]
fn js_loose_reports_the_construct() {
    assert_eq!(
        sanitize(r#"{"a":"x=alert(1)"}"#, &only(Context::JsLoose)),
        Sanitized::Injection {
            kind: NodeKind::AssignmentExpression,
            snippet: "x=alert(1)".to_string(),
        }
    );
}

#[test]
fn js_loose_flags_calls_the_page_would_close() {
    for payload in ["';alert(1,'", "\";alert(document.cookie,\"", "alert(1"] {
        match sanitize(payload, &only(Context::JsLoose)) {
            Sanitized::Injection { kind, .. } => {
                assert_eq!(kind, NodeKind::CallExpression, "{payload}")
            }
            other => panic!("{payload} passed as {other:?}"),
        }
    }
}

#[test]
fn callback_context_uses_the_registry() {
    let sanitizer = Sanitizer::new(SanitizerConfig {
        callbacks: CallbackRegistry::new()
            .with_callable("jsonp.receive")
            .expect("valid path"),
        ..SanitizerConfig::default()
    });
    let options = only(Context::Callback);
    assert!(sanitizer.sanitize("jsonp.receive", &options).is_clean());
    assert!(sanitizer.sanitize("jsonp[receive]", &options).is_clean());
    assert_eq!(sanitizer.sanitize("jsonp", &options), Sanitized::Rejected);
    assert_eq!(sanitize("alert", &SanitizeOptions::default()), Sanitized::Rejected);
}

#[test]
fn contexts_run_in_declaration_order() {
    let options = SanitizeOptions::from_names(&["dom", "js", "bogus", "url"]);
    assert_eq!(
        Sanitizer::default().check("javascript:alert(1)", &options),
        Verdict::Flagged {
            context: Context::Url,
            detection: None,
        }
    );
}

#[test]
fn collaborators_are_available() {
    assert!(is_supported());
}

#[test]
fn context_names_from_untrusted_configuration() {
    crate::init_tracing();
    let options = SanitizeOptions::from_names(&["URL", "css", "jsloose"]);
    assert_eq!(
        options.contexts.iter().copied().collect::<Vec<_>>(),
        vec![Context::Url, Context::JsLoose]
    );
    assert_eq!(
        sanitize("javascript:alert(1)", &options),
        Sanitized::Rejected
    );
    assert!(sanitize("plain words", &options).is_clean());
}
