//! Allow-list markup sanitizer.
//!
//! Walks a `scraper` document and reports everything an allow-list sanitizer
//! would have to drop or rewrite. Nothing is serialized back: callers only
//! need to know whether the markup survives untouched.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node};
use serde::{Deserialize, Serialize};

/// Value the default hook writes into navigation attributes.
pub const NAVIGATION_PLACEHOLDER: &str = "schema://name#";

const ALLOWED_TAGS: &[&str] = &[
    "a", "abbr", "acronym", "address", "area", "article", "aside", "audio", "b", "bdi", "bdo",
    "big", "blink", "blockquote", "body", "br", "button", "canvas", "caption", "center", "cite",
    "code", "col", "colgroup", "content", "data", "datalist", "dd", "decorator", "del", "details",
    "dfn", "dialog", "dir", "div", "dl", "dt", "element", "em", "fieldset", "figcaption",
    "figure", "font", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "head", "header",
    "hgroup", "hr", "html", "i", "img", "input", "ins", "kbd", "label", "legend", "li", "main",
    "map", "mark", "marquee", "menu", "menuitem", "meter", "nav", "nobr", "ol", "optgroup",
    "option", "output", "p", "picture", "pre", "progress", "q", "rp", "rt", "ruby", "s", "samp",
    "section", "select", "shadow", "small", "source", "spacer", "span", "strike", "strong",
    "style", "sub", "summary", "sup", "table", "tbody", "td", "template", "textarea", "tfoot",
    "th", "thead", "time", "tr", "track", "tt", "u", "ul", "var", "video", "wbr",
];

const ALLOWED_ATTRIBUTES: &[&str] = &[
    "accept", "action", "align", "alt", "autocapitalize", "autocomplete", "autoplay",
    "background", "bgcolor", "border", "capture", "cellpadding", "cellspacing", "checked", "cite",
    "class", "clear", "color", "cols", "colspan", "controls", "controlslist", "coords",
    "crossorigin", "datetime", "decoding", "default", "dir", "disabled", "download", "draggable",
    "enctype", "enterkeyhint", "face", "for", "headers", "height", "hidden", "high", "href",
    "hreflang", "id", "inputmode", "integrity", "ismap", "kind", "label", "lang", "list",
    "loading", "loop", "low", "max", "maxlength", "media", "method", "min", "minlength",
    "multiple", "muted", "name", "nonce", "noshade", "novalidate", "nowrap", "open", "optimum",
    "pattern", "placeholder", "playsinline", "poster", "preload", "pubdate", "radiogroup",
    "readonly", "rel", "required", "rev", "reversed", "role", "rows", "rowspan", "spellcheck",
    "scope", "selected", "shape", "size", "sizes", "slot", "span", "srclang", "start", "src",
    "srcset", "step", "style", "summary", "tabindex", "title", "translate", "type", "usemap",
    "valign", "value", "width", "xmlns",
];

/// Attributes whose values are never URIs.
const URI_SAFE_ATTRIBUTES: &[&str] = &[
    "alt", "class", "for", "id", "label", "name", "pattern", "placeholder", "role", "summary",
    "title", "value", "style", "xmlns",
];

const DATA_URI_TAGS: &[&str] = &["audio", "image", "img", "source", "track", "video"];

static ALLOWED_URI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:(?:(?:f|ht)tps?|mailto|tel|callto|cid|xmpp):|[^a-z]|[a-z+.\-]+(?:[^a-z+.\-:]|$))",
    )
    .expect("allowed URI pattern is valid")
});

static SCRIPT_OR_DATA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:\w+script|data):").expect("script scheme pattern is valid"));

static ATTRIBUTE_WHITESPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x00-\x20\u{00A0}\u{1680}\u{180E}\u{2000}-\u{2029}\u{205F}\u{3000}]")
        .expect("attribute whitespace pattern is valid")
});

static DATA_ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data-[\-\w.\u{00B7}-\u{FFFF}]").expect("data attribute pattern is valid")
});

static ARIA_ATTRIBUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^aria-[\-\w]+$").expect("aria attribute pattern is valid"));

static TEMPLATE_EXPRESSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{|\}\}|<%|%>|\$\{").expect("template pattern is valid"));

/// Sanitizer switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerPolicy {
    /// Walk from `<html>` so that `<head>` content is judged too.
    pub whole_document: bool,
    /// Treat `{{ }}`, `<% %>` and `${` in text as removals.
    pub safe_for_templates: bool,
    /// Treat `<` in leaf text and `/>` in attribute values as removals.
    pub safe_for_jquery: bool,
    /// Accept URI schemes outside the allow-list unless they are script or data.
    pub allow_unknown_protocol: bool,
}

impl Default for SanitizerPolicy {
    fn default() -> Self {
        Self {
            whole_document: true,
            safe_for_templates: true,
            safe_for_jquery: true,
            allow_unknown_protocol: false,
        }
    }
}

/// Rewrites attribute values before the policy judges them.
pub trait AttributeHook: fmt::Debug + Send + Sync {
    /// Returns a replacement value, or `None` to keep `value`.
    fn rewrite(&self, tag: &str, name: &str, value: &str) -> Option<String>;
}

/// Replaces every navigation target with [`NAVIGATION_PLACEHOLDER`], whose
/// unknown scheme the URI allow-list rejects.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralizeNavigation;

impl AttributeHook for NeutralizeNavigation {
    fn rewrite(&self, _tag: &str, name: &str, _value: &str) -> Option<String> {
        matches!(name, "href" | "xlink:href" | "action").then(|| NAVIGATION_PLACEHOLDER.to_string())
    }
}

/// Something the sanitizer would drop or rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    /// Element outside the tag allow-list.
    Element { tag: String },
    /// Attribute outside the allow-list or with a rejected value.
    Attribute { tag: String, name: String },
    /// Comment node.
    Comment,
    /// Text that a template or jQuery rule rewrites.
    Text { excerpt: String },
}

/// Outcome of one sanitizer run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    /// Removals in document order.
    pub removed: Vec<Removal>,
}

impl SanitizeReport {
    /// Returns `true` when the markup survives untouched.
    pub fn is_clean(&self) -> bool {
        self.removed.is_empty()
    }
}

/// Allow-list sanitizer over `scraper` documents.
#[derive(Debug, Clone)]
pub struct MarkupSanitizer {
    policy: SanitizerPolicy,
    hook: Arc<dyn AttributeHook>,
}

impl Default for MarkupSanitizer {
    fn default() -> Self {
        Self::new(SanitizerPolicy::default())
    }
}

impl MarkupSanitizer {
    /// Creates a sanitizer with the [`NeutralizeNavigation`] hook.
    pub fn new(policy: SanitizerPolicy) -> Self {
        Self {
            policy,
            hook: Arc::new(NeutralizeNavigation),
        }
    }

    /// Replaces the attribute hook.
    pub fn with_hook(mut self, hook: impl AttributeHook + 'static) -> Self {
        self.hook = Arc::new(hook);
        self
    }

    /// Returns the policy.
    pub fn policy(&self) -> SanitizerPolicy {
        self.policy
    }

    /// Parses `markup` as a document and reports every removal.
    pub fn sanitize(&self, markup: &str) -> SanitizeReport {
        let document = Html::parse_document(markup);
        let mut report = SanitizeReport::default();
        // Comments ahead of `<html>` hang off the document node itself.
        for node in document.tree.root().children() {
            if node.value().is_comment() {
                report.removed.push(Removal::Comment);
            }
        }
        let root = document.root_element();
        let start = if self.policy.whole_document {
            Some(root)
        } else {
            root.children()
                .filter_map(ElementRef::wrap)
                .find(|element| element.value().name() == "body")
        };

        // Explicit stack: parsers accept arbitrarily deep nesting.
        let mut pending: Vec<ElementRef<'_>> = start.into_iter().collect();
        while let Some(element) = pending.pop() {
            self.check_element(element, &mut report);
            let mut children = Vec::new();
            for child in element.children() {
                match child.value() {
                    Node::Element(_) => children.extend(ElementRef::wrap(child)),
                    Node::Text(text) => self.check_text(text, &mut report),
                    Node::Comment(_) => report.removed.push(Removal::Comment),
                    Node::ProcessingInstruction(_) => report.removed.push(Removal::Element {
                        tag: "#processing-instruction".to_string(),
                    }),
                    _ => {}
                }
            }
            pending.extend(children.into_iter().rev());
        }
        report
    }

    fn check_element(&self, element: ElementRef<'_>, report: &mut SanitizeReport) {
        let tag = element.value().name();
        if !ALLOWED_TAGS.contains(&tag) {
            report.removed.push(Removal::Element {
                tag: tag.to_string(),
            });
        }

        if self.policy.safe_for_jquery {
            let leaf = !element.children().any(|child| child.value().is_element());
            if leaf && element.text().any(|text| text.contains('<')) {
                report.removed.push(Removal::Text {
                    excerpt: element.text().collect(),
                });
            }
        }

        for (name, value) in element.value().attrs() {
            let value = value.trim();
            let value = self
                .hook
                .rewrite(tag, name, value)
                .unwrap_or_else(|| value.to_string());
            if !self.attribute_allowed(tag, name, &value) {
                report.removed.push(Removal::Attribute {
                    tag: tag.to_string(),
                    name: name.to_string(),
                });
            }
        }
    }

    fn check_text(&self, text: &str, report: &mut SanitizeReport) {
        let templated = self.policy.safe_for_templates && TEMPLATE_EXPRESSION.is_match(text);
        let angled = self.policy.safe_for_jquery && text.contains('<');
        if templated || angled {
            report.removed.push(Removal::Text {
                excerpt: text.to_string(),
            });
        }
    }

    fn attribute_allowed(&self, tag: &str, name: &str, value: &str) -> bool {
        if self.policy.safe_for_jquery && value.contains("/>") {
            return false;
        }
        if DATA_ATTRIBUTE.is_match(name) || ARIA_ATTRIBUTE.is_match(name) {
            return true;
        }
        if !ALLOWED_ATTRIBUTES.contains(&name) {
            return false;
        }
        if URI_SAFE_ATTRIBUTES.contains(&name) || value.is_empty() {
            return true;
        }
        let compact = ATTRIBUTE_WHITESPACE.replace_all(value, "");
        if ALLOWED_URI.is_match(&compact) {
            return true;
        }
        let data_uri = matches!(name, "src" | "href" | "xlink:href")
            && compact.to_ascii_lowercase().starts_with("data:")
            && DATA_URI_TAGS.contains(&tag);
        if data_uri {
            return true;
        }
        self.policy.allow_unknown_protocol && !SCRIPT_OR_DATA.is_match(&compact)
    }
}
