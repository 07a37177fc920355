//! Token contracts for the raw tokenizer and the script lexer.

use crate::lexer::span::Span;

/// A lossless raw token produced by [`crate::lexer::tokenize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken<'a> {
    /// Token text preserved as scanned.
    pub text: &'a str,
    /// Byte-oriented source span.
    pub span: Span,
}

impl<'a> RawToken<'a> {
    /// Creates a raw token value.
    pub fn new(text: &'a str, span: Span) -> Self {
        Self { text, span }
    }

    /// Returns the token length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` for the sentinel produced by empty input.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// How a template chunk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateEnd {
    /// Closed by a backtick.
    Tail,
    /// Stopped at `${`; a substitution follows.
    Substitution,
    /// Input ended inside the template.
    Unterminated,
}

/// Script token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Identifier or reserved word.
    Name,
    /// Operator or punctuation.
    Punctuator,
    /// Quoted string literal.
    String,
    /// Numeric literal.
    Number,
    /// Regular expression literal.
    Regex,
    /// Template chunk including its delimiters.
    Template(TemplateEnd),
    /// Text that cannot start any token: unterminated literals and stray characters.
    Invalid,
    /// End of input.
    Eof,
}

/// A script token with its source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token category.
    pub kind: TokenKind,
    /// Token text preserved as scanned.
    pub lexeme: &'a str,
    /// Byte-oriented source span.
    pub span: Span,
    /// A line terminator appeared between the previous token and this one.
    pub newline_before: bool,
    /// The lexeme contains `\u` escapes.
    pub escaped: bool,
}

impl<'a> Token<'a> {
    /// Creates a token value.
    pub fn new(kind: TokenKind, lexeme: &'a str, span: Span, newline_before: bool) -> Self {
        Self {
            kind,
            lexeme,
            span,
            newline_before,
            escaped: false,
        }
    }

    /// Returns `true` for the punctuator `op`.
    pub fn is_punct(&self, op: &str) -> bool {
        self.kind == TokenKind::Punctuator && self.lexeme == op
    }

    /// Returns `true` for the unescaped word `word`.
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Name && !self.escaped && self.lexeme == word
    }

    /// Returns `true` at end of input.
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}
