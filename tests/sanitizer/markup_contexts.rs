use sinkguard::markup::{MarkupSanitizer, Removal, SanitizerPolicy};
use sinkguard::{Context, SanitizeOptions, Sanitized, has_injection_in_attribute, sanitize};

fn dom() -> SanitizeOptions {
    SanitizeOptions::new([Context::Dom])
}

#[test]
fn attribute_breakouts() {
    assert!(has_injection_in_attribute("1' onerror='alert(1)"));
    assert!(has_injection_in_attribute("1\" onload=\"alert(1)"));
    assert!(has_injection_in_attribute("x onerror=alert(1)"));
    assert!(!has_injection_in_attribute("plain text"));
    assert!(!has_injection_in_attribute("600"));
}

#[test]
fn attr_context_goes_through_the_adapter() {
    let options = SanitizeOptions::new([Context::Attr]);
    assert_eq!(
        sanitize("1' onerror='alert(1)", &options),
        Sanitized::Rejected
    );
    assert!(sanitize("plain text", &options).is_clean());
}

#[test]
fn harmless_markup_is_clean() {
    assert!(sanitize("<b>bold</b> and <i>italic</i>", &dom()).is_clean());
    assert!(sanitize("Hello, world!", &dom()).is_clean());
}

#[test]
fn active_markup_is_rejected() {
    for markup in [
        "<script>alert(1)</script>",
        "<img src=x onerror=alert(1)>",
        "<svg onload=alert(1)>",
        "<a href=\"https://example.com\">link</a>",
        "<!-- comment -->",
        "{{constructor.constructor('alert(1)')()}}",
    ] {
        assert_eq!(sanitize(markup, &dom()), Sanitized::Rejected, "{markup}");
    }
}

#[test]
fn json_documents_skip_the_markup_check() {
    assert!(sanitize(r#"{"html": "<script>"}"#, &dom()).is_clean());
    assert!(sanitize(r#"["<svg onload=alert(1)>"]"#, &dom()).is_clean());
}

#[test]
fn quoted_markup_is_still_markup() {
    assert_eq!(
        sanitize("\"<img src=x onerror=alert(1)>\"", &dom()),
        Sanitized::Rejected
    );
    assert_eq!(
        sanitize("\"<script>alert(1)</script>\"", &dom()),
        Sanitized::Rejected
    );
    assert!(sanitize("\"plain words\"", &dom()).is_clean());
}

#[test]
fn report_lists_removals() {
    let report = MarkupSanitizer::new(SanitizerPolicy::default())
        .sanitize("<p onclick=\"go()\">text</p><script></script>");
    assert!(!report.is_clean());
    assert!(report.removed.contains(&Removal::Attribute {
        tag: "p".to_string(),
        name: "onclick".to_string(),
    }));
    assert!(report.removed.contains(&Removal::Element {
        tag: "script".to_string(),
    }));
}
