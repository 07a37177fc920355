//! Loose-mode repair helpers.
//!
//! Loose parsing never stops at a syntax error. A missing operand becomes a
//! [`NodeKind::Placeholder`], a token no statement can start with becomes a
//! one-token [`NodeKind::Invalid`] node, and every node built around a repair
//! carries `recovered = true`.

use crate::lexer::{ByteOffset, Span, TokenKind};
use crate::parser::ast::{NodeKind, SyntaxNode};
use crate::parser::keyword::Keyword;
use crate::parser::parser::{ParseResult, Parser};

impl Parser<'_, '_> {
    /// Operand for a position the input left empty. Consumes nothing.
    pub(crate) fn placeholder(&mut self) -> ParseResult<SyntaxNode> {
        let node = SyntaxNode::placeholder(Span::empty_at(self.start()));
        self.finish(node)
    }

    /// Consumes one token as a skipped node.
    pub(crate) fn skip_invalid(&mut self) -> ParseResult<SyntaxNode> {
        let token = self.advance();
        let node = SyntaxNode::new(NodeKind::Invalid, token.span, Vec::new()).with_recovered(true);
        self.finish(node)
    }

    /// A statement keyword was not followed by what its grammar requires.
    ///
    /// Only the keyword is consumed so the rest of the input is parsed as if
    /// the keyword were absent.
    pub(crate) fn malformed_keyword(
        &mut self,
        start: ByteOffset,
        expected: &'static str,
    ) -> ParseResult<SyntaxNode> {
        let mut recovered = false;
        self.recover(expected, &mut recovered)?;
        self.build(NodeKind::Invalid, start, Vec::new(), true)
    }

    /// Operand required but the current token cannot start one.
    pub(crate) fn missing_operand(&mut self) -> ParseResult<SyntaxNode> {
        let mut recovered = false;
        self.recover("expression", &mut recovered)?;
        self.placeholder()
    }

    pub(crate) fn can_start_expression(&self) -> bool {
        let token = &self.current;
        match token.kind {
            TokenKind::Name => Keyword::of(token).is_none_or(Keyword::starts_expression),
            TokenKind::String | TokenKind::Number | TokenKind::Regex | TokenKind::Template(_) => {
                true
            }
            TokenKind::Punctuator => matches!(
                token.lexeme,
                "(" | "[" | "{" | "+" | "-" | "!" | "~" | "++" | "--" | "/" | "/="
            ),
            TokenKind::Invalid | TokenKind::Eof => false,
        }
    }

    pub(crate) fn can_start_statement(&self) -> bool {
        if self.at_punct(";") || self.can_start_expression() {
            return true;
        }
        matches!(
            Keyword::of(&self.current),
            Some(
                Keyword::Break
                    | Keyword::Const
                    | Keyword::Continue
                    | Keyword::Debugger
                    | Keyword::Do
                    | Keyword::Export
                    | Keyword::For
                    | Keyword::If
                    | Keyword::Import
                    | Keyword::Return
                    | Keyword::Switch
                    | Keyword::Throw
                    | Keyword::Try
                    | Keyword::Var
                    | Keyword::While
                    | Keyword::With
            )
        )
    }
}
