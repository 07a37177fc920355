//! Lossless raw tokenizer used to step through suffixes.
//!
//! Unlike the script lexer this scanner has no parser feedback, so regex
//! literals are told apart from division by looking at what follows the
//! closing slash.

use crate::lexer::cursor::Cursor;
use crate::lexer::literal::{
    at_identifier_start, is_js_whitespace, is_line_terminator, is_word_char, scan_block_comment,
    scan_identifier, scan_line_comment, scan_number, scan_quoted,
};
use crate::lexer::span::Span;
use crate::lexer::token::RawToken;

const REGEX_FLAGS: &str = "gmiyu";
const MAX_REGEX_FLAGS: usize = 5;

/// Splits `source` into raw tokens whose texts concatenate back to `source`.
///
/// Empty input yields a single empty token; every other token is non-empty.
pub fn tokenize(source: &str) -> Vec<RawToken<'_>> {
    if source.is_empty() {
        return vec![RawToken::new("", Span::default())];
    }

    let mut cursor = Cursor::new(source);
    let mut tokens = Vec::new();
    while !cursor.is_eof() {
        let start = cursor.pos();
        scan_raw_token(&mut cursor);
        if cursor.pos() == start {
            cursor.bump();
        }
        tokens.push(RawToken::new(
            cursor.slice_from(start),
            Span::from_range(start, cursor.pos()),
        ));
    }
    tokens
}

fn scan_raw_token(cursor: &mut Cursor<'_>) {
    let Some(ch) = cursor.peek() else {
        return;
    };
    match ch {
        '\'' | '"' => {
            scan_quoted(cursor);
        }
        '`' => scan_template(cursor),
        '/' if cursor.starts_with("//") => scan_line_comment(cursor),
        '/' if cursor.starts_with("/*") => {
            scan_block_comment(cursor);
        }
        '/' if scan_regex_literal(cursor) => {}
        _ if scan_number(cursor) => {}
        _ if at_identifier_start(cursor) => {
            scan_identifier(cursor);
        }
        _ if scan_punctuator(cursor) => {}
        _ if is_js_whitespace(ch) => {
            cursor.eat_while(is_js_whitespace);
        }
        _ => {
            cursor.bump();
        }
    }
}

/// Scans a whole template literal, substitutions included.
///
/// Substitutions may hold one level of nested braces.
fn scan_template(cursor: &mut Cursor<'_>) {
    cursor.bump();
    while let Some(ch) = cursor.peek() {
        match ch {
            '`' => {
                cursor.bump();
                return;
            }
            '\\' => {
                if cursor.peek_nth(1).is_none() {
                    return;
                }
                cursor.bump();
                cursor.bump();
            }
            '$' if cursor.starts_with("${") => {
                cursor.advance_by(2);
                scan_substitution(cursor);
            }
            _ => {
                cursor.bump();
            }
        }
    }
}

fn scan_substitution(cursor: &mut Cursor<'_>) {
    while let Some(ch) = cursor.peek() {
        match ch {
            '}' => {
                cursor.bump();
                return;
            }
            '{' => {
                cursor.bump();
                cursor.eat_while(|inner| inner != '}');
                cursor.eat('}');
            }
            _ => {
                cursor.bump();
            }
        }
    }
}

fn scan_regex_literal(cursor: &mut Cursor<'_>) -> bool {
    let mut probe = *cursor;
    probe.bump();
    let mut body = 0;
    loop {
        match probe.peek() {
            None => return false,
            Some('/') => break,
            Some(']') => return false,
            Some(ch) if is_line_terminator(ch) => return false,
            Some('\\') => match probe.peek_nth(1) {
                Some(next) if !is_line_terminator(next) => {
                    probe.bump();
                    probe.bump();
                }
                _ => return false,
            },
            Some('[') => {
                if !scan_regex_class(&mut probe) {
                    probe.bump();
                }
            }
            Some(_) => {
                probe.bump();
            }
        }
        body += 1;
    }
    if body == 0 {
        return false;
    }
    probe.bump();

    if regex_may_end_here(&probe) {
        *cursor = probe;
        return true;
    }
    if let Some(flags) = regex_flags_len(&probe) {
        probe.advance_by(flags);
        *cursor = probe;
        return true;
    }
    false
}

/// Scans a `[...]` class inside a regex body. Leaves the cursor untouched on failure.
fn scan_regex_class(cursor: &mut Cursor<'_>) -> bool {
    let mut probe = *cursor;
    probe.bump();
    while let Some(ch) = probe.peek() {
        match ch {
            ']' => {
                probe.bump();
                *cursor = probe;
                return true;
            }
            '\\' => match probe.peek_nth(1) {
                Some(next) if !is_line_terminator(next) => {
                    probe.bump();
                    probe.bump();
                }
                _ => return false,
            },
            _ if is_line_terminator(ch) => return false,
            _ => {
                probe.bump();
            }
        }
    }
    false
}

/// Nothing after the closing slash can continue an operand.
fn regex_may_end_here(cursor: &Cursor<'_>) -> bool {
    let rest = cursor.rest();
    let mut chars = rest.chars().peekable();
    while let Some(&ch) = chars.peek() {
        if !is_js_whitespace(ch) {
            break;
        }
        if ch >= '\u{80}' {
            return false;
        }
        chars.next();
    }
    let Some(next) = chars.next() else {
        return true;
    };
    let after = chars.next();
    let continues_operand = is_word_char(next)
        || next >= '\u{80}'
        || matches!(next, '$' | '\\' | '\'' | '"' | '~' | '(' | '{')
        || (matches!(next, '+' | '-' | '!') && after != Some('='))
        || (next == '.' && after.is_some_and(|ch| ch.is_ascii_digit()));
    !continues_operand
}

/// Length of the one to five flags after the closing slash, provided they are
/// not themselves followed by an operator.
fn regex_flags_len(cursor: &Cursor<'_>) -> Option<usize> {
    let rest = cursor.rest();
    let flags = rest
        .chars()
        .take_while(|ch| REGEX_FLAGS.contains(*ch))
        .count();
    if flags == 0 || flags > MAX_REGEX_FLAGS {
        return None;
    }
    let tail = &rest[flags..];
    let Some(next) = tail.chars().next() else {
        return Some(flags);
    };
    if is_word_char(next) || next >= '\u{80}' || matches!(next, '$' | '\\') {
        return None;
    }
    let mut rest_chars = tail.chars().skip_while(|ch| is_js_whitespace(*ch));
    let ends = match rest_chars.next() {
        Some(
            '+' | '-' | '*' | '%' | '&' | '|' | '^' | '<' | '>' | '!' | '=' | '?' | '(' | '{',
        ) => false,
        Some('/') => matches!(rest_chars.next(), Some('/' | '*')),
        _ => true,
    };
    ends.then_some(flags)
}

fn scan_punctuator(cursor: &mut Cursor<'_>) -> bool {
    let rest = cursor.rest();
    if ["--", "++", "&&", "||", "=>"]
        .iter()
        .any(|op| rest.starts_with(op))
    {
        cursor.advance_by(2);
        return true;
    }
    if let Some(tail) = rest.strip_prefix("...")
        && let Some(len) = spread_operand_len(tail)
    {
        cursor.advance_by(3 + len);
        return true;
    }

    let bytes = rest.as_bytes();
    let mut len = match bytes.first() {
        Some(b'+' | b'-' | b'*' | b'/' | b'%' | b'&' | b'|' | b'^') => 1,
        Some(b'<') => 1 + usize::from(bytes.get(1) == Some(&b'<')),
        Some(b'>') => bytes.iter().take(3).take_while(|byte| **byte == b'>').count(),
        Some(b'!' | b'=') => 1 + usize::from(bytes.get(1) == Some(&b'=')),
        Some(b'?' | b':' | b'~' | b';' | b',' | b'.' | b'[' | b']' | b'(' | b')' | b'{' | b'}') => {
            cursor.advance_by(1);
            return true;
        }
        _ => return false,
    };
    if bytes.get(len) == Some(&b'=') {
        len += 1;
    }
    cursor.advance_by(len);
    true
}

/// Length of an identifier or quoted literal glued to a spread.
fn spread_operand_len(tail: &str) -> Option<usize> {
    let first = tail.chars().next()?;
    if first.is_ascii_alphabetic() {
        return Some(tail.bytes().take_while(u8::is_ascii_alphanumeric).count());
    }
    if !matches!(first, '\'' | '"' | '`') {
        return None;
    }
    let body = &tail[1..];
    match body.find(first) {
        Some(close) => {
            let mut len = 1 + close + 1;
            if tail[len..].starts_with(first) {
                len += 1;
            }
            Some(len)
        }
        None => {
            let (last, ch) = body.char_indices().rev().find(|(_, ch)| *ch != '\\')?;
            Some(1 + last + ch.len_utf8())
        }
    }
}
