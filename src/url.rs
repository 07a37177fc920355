//! Dangerous URL scheme denylist.

use once_cell::sync::Lazy;
use regex::Regex;

/// Script schemes and `data:` URIs carrying markup, optionally base64-encoded.
static DANGEROUS_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:(?:java|vb|j)script:|data:\W*(?:(?:text/(?:html|xml)|image/svg\+xml|application/(?:xml|xhtml\+xml)):?\s*(?:;[\n\t\r ,;]?base64[^,]*)?,?|,))",
    )
    .expect("dangerous URL pattern is valid")
});

/// Returns `true` when `input` can navigate to script or active markup.
///
/// Strings without a `:` cannot name a scheme and are never dangerous.
pub fn is_dangerous_url(input: &str) -> bool {
    input.contains(':') && DANGEROUS_URL.is_match(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_schemes_are_dangerous() {
        assert!(is_dangerous_url("javascript:alert(1)"));
        assert!(is_dangerous_url("JaVaScRiPt:alert(1)"));
        assert!(is_dangerous_url("vbscript:msgbox(1)"));
        assert!(is_dangerous_url("jscript:foo"));
    }

    #[test]
    fn markup_data_uris_are_dangerous() {
        assert!(is_dangerous_url("data:text/html,<script>alert(1)</script>"));
        assert!(is_dangerous_url("data:image/svg+xml;base64,PHN2Zz4="));
        assert!(is_dangerous_url("data:,alert(1)"));
    }

    #[test]
    fn ordinary_urls_are_safe() {
        assert!(!is_dangerous_url("https://example.com/x"));
        assert!(!is_dangerous_url("mailto:someone@example.com"));
        assert!(!is_dangerous_url("data:image/png;base64,iVBORw0KGgo="));
        assert!(!is_dangerous_url("javascript"));
    }
}
