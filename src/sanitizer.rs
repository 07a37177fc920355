//! Context policy dispatch.
//!
//! [`Sanitizer`] normalizes a candidate once, runs the checker of every
//! requested [`Context`] in order and stops at the first one that objects.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::callback::CallbackRegistry;
use crate::context::{Context, SanitizeOptions};
use crate::markup::attribute::has_injection_in_attribute_with;
use crate::markup::{MarkupSanitizer, SanitizerPolicy};
use crate::normalize::normalize;
use crate::parser::{NodeKind, ParseMode, ParseOptions};
use crate::policy::json::check_json_aware_with;
use crate::policy::{Detection, SuffixScanner, check_quote_splits};
use crate::url::is_dangerous_url;

/// Sanitizer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Inputs longer than this many bytes are rejected without being parsed.
    pub max_input_len: Option<usize>,
    /// Limits applied to every parse attempt.
    pub parse: ParseOptions,
    /// Names accepted by the `callback` context.
    pub callbacks: CallbackRegistry,
    /// Switches of the `dom` context.
    pub markup: SanitizerPolicy,
}

/// Result of [`Sanitizer::sanitize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sanitized {
    /// Every context accepted the input, returned as given.
    Clean(String),
    /// Some context rejected the input.
    Rejected,
    /// The `jsloose` context found a forbidden construct.
    Injection {
        /// Kind of the flagged node.
        kind: NodeKind,
        /// Source text of the flagged node.
        snippet: String,
    },
}

impl Sanitized {
    /// Returns the surviving string, or `""` when the input was refused.
    pub fn as_str(&self) -> &str {
        match self {
            Sanitized::Clean(value) => value,
            Sanitized::Rejected | Sanitized::Injection { .. } => "",
        }
    }

    /// Returns `true` for [`Sanitized::Clean`].
    pub fn is_clean(&self) -> bool {
        matches!(self, Sanitized::Clean(_))
    }
}

/// Detailed outcome of [`Sanitizer::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Clean,
    Flagged {
        context: Context,
        /// Only populated by the `jsloose` context.
        detection: Option<Detection>,
    },
    Oversized {
        len: usize,
        limit: usize,
    },
}

impl Verdict {
    pub fn is_clean(&self) -> bool {
        matches!(self, Verdict::Clean)
    }
}

/// Context-aware injection checker.
#[derive(Debug, Clone, Default)]
pub struct Sanitizer {
    config: SanitizerConfig,
    markup: MarkupSanitizer,
}

impl Sanitizer {
    /// Creates a sanitizer for `config`.
    pub fn new(config: SanitizerConfig) -> Self {
        let markup = MarkupSanitizer::new(config.markup);
        Self { config, markup }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SanitizerConfig {
        &self.config
    }

    /// Returns `dirty` unchanged when every requested context accepts it.
    pub fn sanitize(&self, dirty: &str, options: &SanitizeOptions) -> Sanitized {
        match self.check(dirty, options) {
            Verdict::Clean => Sanitized::Clean(dirty.to_string()),
            Verdict::Flagged {
                detection: Some(detection),
                ..
            } => Sanitized::Injection {
                kind: detection.kind,
                snippet: detection.snippet,
            },
            Verdict::Flagged { .. } | Verdict::Oversized { .. } => Sanitized::Rejected,
        }
    }

    /// Checks the normalized form of `dirty` against every requested context.
    pub fn check(&self, dirty: &str, options: &SanitizeOptions) -> Verdict {
        if dirty.is_empty() {
            return Verdict::Clean;
        }
        if let Some(limit) = self.config.max_input_len
            && dirty.len() > limit
        {
            warn!(len = dirty.len(), limit, "input exceeds length bound");
            return Verdict::Oversized {
                len: dirty.len(),
                limit,
            };
        }
        let normalized = normalize(dirty);
        for &context in &options.contexts {
            if let Some(verdict) = self.check_context(context, &normalized) {
                return verdict;
            }
        }
        Verdict::Clean
    }

    fn check_context(&self, context: Context, input: &str) -> Option<Verdict> {
        let flagged = match context {
            Context::Callback => !self.config.callbacks.is_callable(input),
            Context::Url => is_dangerous_url(input),
            Context::Js => {
                let scanner = SuffixScanner::new(ParseMode::Strict).with_options(self.config.parse);
                check_quote_splits(input, &scanner).is_some()
            }
            Context::JsLoose => {
                let detection = check_json_aware_with(input, self.config.parse)?;
                return Some(flag(context, Some(detection)));
            }
            Context::Attr => has_injection_in_attribute_with(input, self.config.parse),
            Context::Dom => self.alters_markup(input),
        };
        flagged.then(|| flag(context, None))
    }

    /// JSON documents are data, not markup. A bare JSON string is still
    /// rendered, so only objects, arrays and `null` are exempt.
    fn alters_markup(&self, input: &str) -> bool {
        if let Ok(Value::Object(_) | Value::Array(_) | Value::Null) =
            serde_json::from_str::<Value>(input)
        {
            return false;
        }
        let report = self.markup.sanitize(input);
        if let Some(first) = report.removed.first() {
            debug!(removed = report.removed.len(), ?first, "markup would be altered");
        }
        !report.is_clean()
    }
}

fn flag(context: Context, detection: Option<Detection>) -> Verdict {
    debug!(
        %context,
        kind = ?detection.as_ref().map(|detection| detection.kind),
        "input flagged"
    );
    Verdict::Flagged { context, detection }
}

static DEFAULT_SANITIZER: Lazy<Sanitizer> = Lazy::new(Sanitizer::default);

/// [`Sanitizer::sanitize`] with the default configuration.
pub fn sanitize(dirty: &str, options: &SanitizeOptions) -> Sanitized {
    DEFAULT_SANITIZER.sanitize(dirty, options)
}

static SUPPORTED: Lazy<bool> = Lazy::new(self_test);

/// Returns `true` when the script parser, the markup parser and the markup
/// sanitizer behave as the checks require. The self-test runs once.
pub fn is_supported() -> bool {
    *SUPPORTED
}

fn self_test() -> bool {
    let strict = SuffixScanner::new(ParseMode::Strict);
    let script = strict
        .scan("alert(1)")
        .is_some_and(|detection| detection.kind == NodeKind::CallExpression)
        && strict.scan("Hello, world!").is_none();
    let attribute = has_injection_in_attribute_with("1' onerror='alert(1)", ParseOptions::default())
        && !has_injection_in_attribute_with("plain text", ParseOptions::default());
    let markup = MarkupSanitizer::default();
    let sanitizer = markup.sanitize("<b>bold</b>").is_clean()
        && !markup.sanitize("<script>alert(1)</script>").is_clean();
    if !(script && attribute && sanitizer) {
        warn!(script, attribute, sanitizer, "self-test failed");
    }
    script && attribute && sanitizer
}
