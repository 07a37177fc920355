//! Parser error contracts.

use thiserror::Error;

use crate::lexer::{Span, Token, TokenKind};
use crate::parser::budget::BudgetExhausted;

/// Stable parser error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParseErrorKind {
    /// A concrete token did not match grammar expectations.
    #[error("unexpected token")]
    UnexpectedToken,
    /// Input ended before required grammar elements were found.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// The left side of an assignment or update cannot be assigned to.
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,
    /// Syntactic nesting went deeper than allowed.
    #[error("nesting limit exceeded")]
    NestingLimitExceeded,
    /// The node budget of the attempt was spent.
    #[error("node limit exceeded")]
    NodeLimitExceeded,
    /// The node visitor asked the parser to stop.
    #[error("halted by visitor")]
    Halted,
}

/// Parser error payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at byte {} (found {found:?}, expected {expected:?})", .span.start.value())]
pub struct ParseError {
    /// Error category.
    pub kind: ParseErrorKind,
    /// Source span near the failure.
    pub span: Span,
    /// Expected token label.
    pub expected: Option<&'static str>,
    /// Found token text.
    pub found: Option<String>,
}

impl ParseError {
    /// Creates a parser error.
    pub fn new(
        kind: ParseErrorKind,
        span: Span,
        expected: Option<&'static str>,
        found: Option<String>,
    ) -> Self {
        Self {
            kind,
            span,
            expected,
            found,
        }
    }

    /// Creates an `UnexpectedToken` or `UnexpectedEndOfInput` error for `token`.
    pub fn unexpected(token: &Token<'_>, expected: &'static str) -> Self {
        if token.kind == TokenKind::Eof {
            return Self::new(
                ParseErrorKind::UnexpectedEndOfInput,
                token.span,
                Some(expected),
                Some("EOF".to_string()),
            );
        }
        Self::new(
            ParseErrorKind::UnexpectedToken,
            token.span,
            Some(expected),
            Some(token.lexeme.to_string()),
        )
    }

    /// Creates an `InvalidAssignmentTarget` error.
    pub fn invalid_target(span: Span) -> Self {
        Self::new(ParseErrorKind::InvalidAssignmentTarget, span, None, None)
    }

    /// Creates a `NestingLimitExceeded` error.
    pub fn nesting_limit(span: Span, limit: usize) -> Self {
        Self::new(
            ParseErrorKind::NestingLimitExceeded,
            span,
            None,
            Some(format!("depth {}", limit + 1)),
        )
    }

    /// Creates a `Halted` error for the node that stopped the parse.
    pub fn halted(span: Span) -> Self {
        Self::new(ParseErrorKind::Halted, span, None, None)
    }

    /// Returns `true` when the error aborts loose parsing too.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind,
            ParseErrorKind::NestingLimitExceeded
                | ParseErrorKind::NodeLimitExceeded
                | ParseErrorKind::Halted
        )
    }

    pub(crate) fn over_budget(error: BudgetExhausted, span: Span) -> Self {
        Self::new(
            ParseErrorKind::NodeLimitExceeded,
            span,
            None,
            Some(error.to_string()),
        )
    }
}
