//! Suffix scanning.
//!
//! Padding in front of a payload (`foo bar;alert(1)`) breaks a whole-string
//! parse, so the scanner parses every suffix that starts at a raw token
//! boundary, dropping one token per attempt.

use tracing::trace;

use crate::lexer::tokenize;
use crate::parser::{ParseMode, ParseOptions, parse_program};
use crate::policy::Detection;
use crate::policy::classifier::ConstructClassifier;

/// Drives parse attempts over successively shorter suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuffixScanner {
    mode: ParseMode,
    options: ParseOptions,
    parse_once: bool,
}

impl SuffixScanner {
    /// Creates a scanner with default parser limits.
    pub fn new(mode: ParseMode) -> Self {
        Self {
            mode,
            options: ParseOptions::default(),
            parse_once: false,
        }
    }

    /// Overrides the parser limits used per attempt.
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Stops after the first attempt.
    pub fn parse_once(mut self, parse_once: bool) -> Self {
        self.parse_once = parse_once;
        self
    }

    /// Returns the parse mode of every attempt.
    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Returns the first flagged construct, with its span relative to `input`.
    pub fn scan(&self, input: &str) -> Option<Detection> {
        for token in tokenize(input) {
            let offset = token.span.start.as_usize();
            let suffix = input.get(offset..).unwrap_or_default();
            if !is_unproductive(suffix)
                && let Some(detection) = self.attempt(suffix)
            {
                trace!(
                    offset,
                    kind = %detection.kind,
                    "suffix attempt flagged a construct"
                );
                return Some(detection.shifted(offset));
            }
            if self.parse_once {
                break;
            }
        }
        None
    }

    fn attempt(&self, suffix: &str) -> Option<Detection> {
        let mut classifier = ConstructClassifier::new(self.mode);
        // Syntax errors only end the attempt; the classifier keeps whatever it
        // saw before them.
        let _ = parse_program(suffix, self.mode, self.options, &mut classifier);
        classifier.into_detection()
    }
}

/// Suffixes that cannot start a program producing a new construct.
fn is_unproductive(suffix: &str) -> bool {
    match suffix.chars().next() {
        Some('}' | ')' | '*' | '/') => true,
        Some('.') => !suffix.starts_with("..."),
        _ => false,
    }
}

/// Suffix-scans `input` with default parser limits.
pub fn scan_for_injection(input: &str, mode: ParseMode, parse_once: bool) -> Option<Detection> {
    SuffixScanner::new(mode).parse_once(parse_once).scan(input)
}

/// Boolean view of [`scan_for_injection`].
pub fn is_injection(input: &str, mode: ParseMode, parse_once: bool) -> bool {
    scan_for_injection(input, mode, parse_once).is_some()
}
