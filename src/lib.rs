//! Library entrypoint for `sinkguard`.
//!
//! Decides whether an untrusted string can execute attacker-controlled code
//! once it reaches a callback, URL, script, attribute or markup sink. Script
//! detection is syntactic: a lossless tokenizer, a strict and a loose
//! ECMAScript parser reporting every finished node to a visitor, and a policy
//! that scans every token-aligned suffix for forbidden constructs.

pub mod callback;
pub mod context;
pub mod lexer;
pub mod markup;
pub mod normalize;
pub mod parser;
pub mod policy;
pub mod sanitizer;
pub mod url;

pub use callback::{CallbackRegistry, RegistryEntry, RegistryError};
pub use context::{Context, ContextParseError, SanitizeOptions};
pub use markup::has_injection_in_attribute;
pub use normalize::normalize;
pub use policy::{Detection, check_json_aware, is_injection, scan_for_injection};
pub use sanitizer::{Sanitized, Sanitizer, SanitizerConfig, Verdict, is_supported, sanitize};
pub use url::is_dangerous_url;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
