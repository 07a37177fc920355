//! HTML-facing checks built on `scraper`.

pub mod attribute;
pub mod sanitizer;

pub use attribute::has_injection_in_attribute;
pub use sanitizer::{
    AttributeHook, MarkupSanitizer, NAVIGATION_PLACEHOLDER, NeutralizeNavigation, Removal,
    SanitizeReport, SanitizerPolicy,
};
