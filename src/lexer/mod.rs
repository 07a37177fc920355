//! ECMAScript lexing.
//!
//! Two scanners live here. [`tokenize`] is the lossless raw tokenizer the
//! suffix scanner steps through. [`Lexer`] is the on-demand script lexer the
//! parser drives; it never fails, and text that cannot form a token comes back
//! as [`TokenKind::Invalid`] so the parser decides how to react.

pub mod span;
pub mod token;

mod cursor;
mod literal;
mod operator;
mod raw;

use crate::lexer::cursor::Cursor;
use crate::lexer::literal::{
    at_identifier_start, is_line_terminator, scan_block_comment, scan_identifier,
    scan_line_comment, scan_number, scan_quoted,
};
use crate::lexer::operator::scan_punctuator;

pub(crate) use literal::{decode_identifier, is_js_whitespace};
pub(crate) use operator::{binary_precedence, is_assignment_operator};
pub use raw::tokenize;
pub use span::{ByteOffset, Span};
pub use token::{RawToken, TemplateEnd, Token, TokenKind};

/// On-demand script lexer.
///
/// Regex literals and template continuations depend on parser context, so the
/// parser re-scans those through [`Lexer::rescan_regex`] and
/// [`Lexer::rescan_template_continuation`].
#[derive(Debug, Clone, Copy)]
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer positioned at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input),
        }
    }

    /// Returns the source text.
    pub fn source(&self) -> &'a str {
        self.cursor.input()
    }

    /// Returns the current byte offset.
    pub fn offset(&self) -> ByteOffset {
        self.cursor.offset()
    }

    /// Scans the next token. A `/` is always scanned as a punctuator.
    pub fn next_token(&mut self) -> Token<'a> {
        let newline_before = self.skip_trivia();
        let start = self.cursor.pos();
        let Some(ch) = self.cursor.peek() else {
            return self.finish(TokenKind::Eof, start, newline_before);
        };

        let kind = match ch {
            '\'' | '"' => {
                if scan_quoted(&mut self.cursor) {
                    TokenKind::String
                } else {
                    TokenKind::Invalid
                }
            }
            '`' => {
                self.cursor.bump();
                TokenKind::Template(self.scan_template_chunk())
            }
            '/' if self.cursor.starts_with("/*") => {
                // Only reached for an unterminated block comment.
                scan_block_comment(&mut self.cursor);
                TokenKind::Invalid
            }
            _ if scan_number(&mut self.cursor) => TokenKind::Number,
            _ if at_identifier_start(&self.cursor) => {
                scan_identifier(&mut self.cursor);
                TokenKind::Name
            }
            _ if scan_punctuator(&mut self.cursor).is_some() => TokenKind::Punctuator,
            _ => {
                self.cursor.bump();
                TokenKind::Invalid
            }
        };

        let mut token = self.finish(kind, start, newline_before);
        if kind == TokenKind::Name {
            token.escaped = token.lexeme.contains('\\');
        }
        token
    }

    /// Re-scans `token`, which must be `/` or `/=`, as a regex literal.
    pub fn rescan_regex(&mut self, token: Token<'a>) -> Token<'a> {
        let start = token.span.start.as_usize();
        self.cursor.reset(start + 1);
        let mut in_class = false;
        loop {
            match self.cursor.peek() {
                None => return self.finish(TokenKind::Invalid, start, token.newline_before),
                Some(ch) if is_line_terminator(ch) => {
                    return self.finish(TokenKind::Invalid, start, token.newline_before);
                }
                Some('\\') => {
                    self.cursor.bump();
                    if self.cursor.peek().is_some_and(|ch| !is_line_terminator(ch)) {
                        self.cursor.bump();
                    }
                }
                Some('[') => {
                    in_class = true;
                    self.cursor.bump();
                }
                Some(']') => {
                    in_class = false;
                    self.cursor.bump();
                }
                Some('/') if !in_class => {
                    self.cursor.bump();
                    break;
                }
                Some(_) => {
                    self.cursor.bump();
                }
            }
        }
        scan_identifier(&mut self.cursor);
        self.finish(TokenKind::Regex, start, token.newline_before)
    }

    /// Re-scans from `token`, which must be the `}` closing a template
    /// substitution, as the next template chunk.
    pub fn rescan_template_continuation(&mut self, token: Token<'a>) -> Token<'a> {
        let start = token.span.start.as_usize();
        self.cursor.reset(start + 1);
        let end = self.scan_template_chunk();
        self.finish(TokenKind::Template(end), start, token.newline_before)
    }

    fn scan_template_chunk(&mut self) -> TemplateEnd {
        while let Some(ch) = self.cursor.peek() {
            match ch {
                '`' => {
                    self.cursor.bump();
                    return TemplateEnd::Tail;
                }
                '\\' => {
                    self.cursor.bump();
                    self.cursor.bump();
                }
                '$' if self.cursor.eat_str("${") => return TemplateEnd::Substitution,
                _ => {
                    self.cursor.bump();
                }
            }
        }
        TemplateEnd::Unterminated
    }

    /// Skips whitespace and terminated comments. Returns `true` when a line
    /// terminator was crossed.
    fn skip_trivia(&mut self) -> bool {
        let mut newline = false;
        loop {
            match self.cursor.peek() {
                Some(ch) if is_js_whitespace(ch) => {
                    newline |= is_line_terminator(ch);
                    self.cursor.bump();
                }
                Some('/') if self.cursor.starts_with("//") => scan_line_comment(&mut self.cursor),
                Some('/') if self.cursor.starts_with("/*") => {
                    let start = self.cursor.pos();
                    if !scan_block_comment(&mut self.cursor) {
                        self.cursor.reset(start);
                        return newline;
                    }
                    newline |= self.cursor.slice_from(start).contains(is_line_terminator);
                }
                _ => return newline,
            }
        }
    }

    fn finish(&self, kind: TokenKind, start: usize, newline_before: bool) -> Token<'a> {
        Token::new(
            kind,
            self.cursor.slice_from(start),
            Span::from_range(start, self.cursor.pos()),
            newline_before,
        )
    }
}
