//! Reserved words of ECMAScript 2015 scripts.

use crate::lexer::{Token, TokenKind};

/// Words that can never be used as binding or reference identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Break,
    Case,
    Catch,
    Class,
    Const,
    Continue,
    Debugger,
    Default,
    Delete,
    Do,
    Else,
    Export,
    Extends,
    False,
    Finally,
    For,
    Function,
    If,
    Import,
    In,
    Instanceof,
    New,
    Null,
    Return,
    Super,
    Switch,
    This,
    Throw,
    True,
    Try,
    Typeof,
    Var,
    Void,
    While,
    With,
}

impl Keyword {
    /// Parses an unescaped lexeme into a keyword when exact-match compatible.
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        let keyword = match lexeme {
            "break" => Self::Break,
            "case" => Self::Case,
            "catch" => Self::Catch,
            "class" => Self::Class,
            "const" => Self::Const,
            "continue" => Self::Continue,
            "debugger" => Self::Debugger,
            "default" => Self::Default,
            "delete" => Self::Delete,
            "do" => Self::Do,
            "else" => Self::Else,
            "export" => Self::Export,
            "extends" => Self::Extends,
            "false" => Self::False,
            "finally" => Self::Finally,
            "for" => Self::For,
            "function" => Self::Function,
            "if" => Self::If,
            "import" => Self::Import,
            "in" => Self::In,
            "instanceof" => Self::Instanceof,
            "new" => Self::New,
            "null" => Self::Null,
            "return" => Self::Return,
            "super" => Self::Super,
            "switch" => Self::Switch,
            "this" => Self::This,
            "throw" => Self::Throw,
            "true" => Self::True,
            "try" => Self::Try,
            "typeof" => Self::Typeof,
            "var" => Self::Var,
            "void" => Self::Void,
            "while" => Self::While,
            "with" => Self::With,
            _ => return None,
        };
        Some(keyword)
    }

    /// Returns the keyword a token spells, if any.
    ///
    /// Escaped spellings such as `if` are identifiers, not keywords.
    pub fn of(token: &Token<'_>) -> Option<Self> {
        if token.kind != TokenKind::Name || token.escaped {
            return None;
        }
        Self::from_lexeme(token.lexeme)
    }

    /// Returns `true` for keywords that can open an expression.
    pub fn starts_expression(self) -> bool {
        matches!(
            self,
            Self::Class
                | Self::Delete
                | Self::False
                | Self::Function
                | Self::New
                | Self::Null
                | Self::Super
                | Self::This
                | Self::True
                | Self::Typeof
                | Self::Void
        )
    }
}
