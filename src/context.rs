//! Destination sinks and per-call options.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Where an untrusted string is about to be used.
///
/// The declaration order is the evaluation order of a [`SanitizeOptions`]
/// context set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Context {
    /// Name of a function invoked by a JSONP-style callback parameter.
    Callback,
    /// Navigation target.
    Url,
    /// Script literal, strict parse.
    Js,
    /// Script literal, loose and JSON-aware parse with forensic detail.
    JsLoose,
    /// HTML attribute value.
    Attr,
    /// Raw markup.
    Dom,
}

impl Context {
    /// Every context in evaluation order.
    pub const ALL: [Context; 6] = [
        Context::Callback,
        Context::Url,
        Context::Js,
        Context::JsLoose,
        Context::Attr,
        Context::Dom,
    ];

    /// Returns the lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Context::Callback => "callback",
            Context::Url => "url",
            Context::Js => "js",
            Context::JsLoose => "jsloose",
            Context::Attr => "attr",
            Context::Dom => "dom",
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown context name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown context `{0}`")]
pub struct ContextParseError(pub String);

impl FromStr for Context {
    type Err = ContextParseError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Context::ALL
            .into_iter()
            .find(|context| context.as_str().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| ContextParseError(name.to_string()))
    }
}

/// Contexts to check in one `sanitize` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizeOptions {
    /// Requested contexts, iterated in [`Context`] order.
    pub contexts: BTreeSet<Context>,
}

impl Default for SanitizeOptions {
    fn default() -> Self {
        Self::new([Context::Callback, Context::Url, Context::Js, Context::Dom])
    }
}

impl SanitizeOptions {
    /// Checks exactly `contexts`.
    pub fn new(contexts: impl IntoIterator<Item = Context>) -> Self {
        Self {
            contexts: contexts.into_iter().collect(),
        }
    }

    /// Builds options from context names, skipping names that are not
    /// recognized.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let contexts = names
            .iter()
            .filter_map(|name| match name.as_ref().parse::<Context>() {
                Ok(context) => Some(context),
                Err(error) => {
                    warn!(%error, "skipping context");
                    None
                }
            })
            .collect();
        Self { contexts }
    }

    /// Returns `true` when `context` is requested.
    pub fn contains(&self, context: Context) -> bool {
        self.contexts.contains(&context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!("JsLoose".parse::<Context>(), Ok(Context::JsLoose));
        assert_eq!(" DOM ".parse::<Context>(), Ok(Context::Dom));
        assert!("html".parse::<Context>().is_err());
    }

    #[test]
    fn unknown_names_are_skipped() {
        let options = SanitizeOptions::from_names(&["js", "css", "url", "js"]);
        assert_eq!(
            options.contexts.into_iter().collect::<Vec<_>>(),
            vec![Context::Url, Context::Js]
        );
    }

    #[test]
    fn default_contexts() {
        let options = SanitizeOptions::default();
        assert!(options.contains(Context::Callback));
        assert!(options.contains(Context::Url));
        assert!(options.contains(Context::Js));
        assert!(options.contains(Context::Dom));
        assert!(!options.contains(Context::JsLoose));
        assert!(!options.contains(Context::Attr));
    }

    #[test]
    fn options_deserialize_from_lowercase_names() {
        let options: SanitizeOptions =
            serde_json::from_str(r#"{"contexts": ["attr", "jsloose"]}"#).expect("valid options");
        assert_eq!(options, SanitizeOptions::new([Context::JsLoose, Context::Attr]));
    }
}
