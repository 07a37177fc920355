//! Attribute-value injection checks.
//!
//! The candidate is pasted into three attribute positions of an `<img>` tag.
//! A value that escapes its position either produces extra elements or plants
//! an event handler, and handler bodies are strict-scanned as script.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::parser::{ParseMode, ParseOptions};
use crate::policy::{SuffixScanner, has_trigger};

const FRAGMENTS: [(&str, &str); 3] = [
    ("<img foo=\"", "\" >"),
    ("<img bar='", "' >"),
    ("<img baz=1 ", " >"),
];

static BODY: Lazy<Selector> =
    Lazy::new(|| Selector::parse("body").expect("body selector is valid"));

static EVENT_HANDLER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^on[a-z]{3,35}").expect("event handler pattern is valid"));

/// Returns `true` when `input` can break out of an attribute value and run
/// script.
pub fn has_injection_in_attribute(input: &str) -> bool {
    has_injection_in_attribute_with(input, ParseOptions::default())
}

pub(crate) fn has_injection_in_attribute_with(input: &str, options: ParseOptions) -> bool {
    if !has_trigger(input) {
        return false;
    }
    let scanner = SuffixScanner::new(ParseMode::Strict)
        .with_options(options)
        .parse_once(true);
    FRAGMENTS
        .iter()
        .any(|(open, close)| fragment_is_injected(&format!("{open}{input}{close}"), &scanner))
        || scanner.scan(input).is_some()
}

fn fragment_is_injected(markup: &str, scanner: &SuffixScanner) -> bool {
    let document = Html::parse_document(markup);
    let Some(body) = document.select(&BODY).next() else {
        return true;
    };
    let mut elements = body.children().filter_map(ElementRef::wrap);
    let (Some(image), None) = (elements.next(), elements.next()) else {
        return true;
    };
    image.value().attrs().any(|(name, value)| {
        EVENT_HANDLER.is_match(&name.to_ascii_lowercase()) && scanner.scan(value).is_some()
    })
}
