//! ECMAScript 2015 parsing in strict and loose modes.
//!
//! The parser reports every node to a [`NodeVisitor`] as soon as the node is
//! finished, which lets detection policies stop an attempt at the first
//! interesting construct instead of building the whole tree.

pub mod ast;
pub mod budget;
pub mod error;
pub mod keyword;
pub mod parser;
pub mod visitor;

mod expression;
mod pattern;
mod recovery;

pub use ast::{LiteralKind, NodeKind, SyntaxNode};
pub use budget::{BudgetExhausted, NodeBudget};
pub use error::{ParseError, ParseErrorKind};
pub use keyword::Keyword;
pub use parser::{ParseMode, ParseOptions, Parser, parse_program};
pub use visitor::{NodeVisitor, NullVisitor, VisitControl};
