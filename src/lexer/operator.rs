//! Punctuator scanning helpers for longest-match tokenization.

use crate::lexer::cursor::Cursor;

const FOUR: &[&str] = &[">>>="];
const THREE: &[&str] = &["===", "!==", ">>>", "<<=", ">>=", "..."];
const TWO: &[&str] = &[
    "=>", "==", "!=", "<=", ">=", "&&", "||", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=",
    "|=", "^=", "<<", ">>",
];
const ONE: &[u8] = b"{}()[];,<>+-*/%&|^!~?:=.";

/// Scans one script punctuator at cursor position using longest-match rules.
pub(crate) fn scan_punctuator<'a>(cursor: &mut Cursor<'a>) -> Option<&'a str> {
    let start = cursor.pos();
    let len = match_punctuator(cursor.rest())?;
    cursor.advance_by(len);
    Some(cursor.slice_from(start))
}

/// Returns the byte length of the longest punctuator at the start of `rest`.
pub(crate) fn match_punctuator(rest: &str) -> Option<usize> {
    // Longest-match precedence.
    for table in [FOUR, THREE, TWO] {
        if let Some(found) = table.iter().find(|op| rest.starts_with(**op)) {
            return Some(found.len());
        }
    }
    let first = *rest.as_bytes().first()?;
    ONE.contains(&first).then_some(1)
}

/// Returns `true` for assignment operators (`=`, `+=`, `>>>=`, ...).
pub(crate) fn is_assignment_operator(op: &str) -> bool {
    matches!(
        op,
        "=" | "+=" | "-=" | "*=" | "/=" | "%=" | "<<=" | ">>=" | ">>>=" | "&=" | "|=" | "^="
    )
}

/// Returns the binding power of a binary operator, higher binds tighter.
///
/// `in` and `instanceof` are word operators and are included here.
pub(crate) fn binary_precedence(op: &str) -> Option<u8> {
    let precedence = match op {
        "||" => 1,
        "&&" => 2,
        "|" => 3,
        "^" => 4,
        "&" => 5,
        "==" | "!=" | "===" | "!==" => 6,
        "<" | ">" | "<=" | ">=" | "in" | "instanceof" => 7,
        "<<" | ">>" | ">>>" => 8,
        "+" | "-" => 9,
        "*" | "/" | "%" => 10,
        _ => return None,
    };
    Some(precedence)
}
