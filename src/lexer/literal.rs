//! Literal, comment and identifier scanning shared by both tokenizers.

use std::borrow::Cow;

use crate::lexer::cursor::Cursor;

/// Returns `true` for ECMAScript line terminators.
pub(crate) fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Returns `true` for characters matched by the ECMAScript `\s` class.
pub(crate) fn is_js_whitespace(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n'
            | '\u{b}'
            | '\u{c}'
            | '\r'
            | ' '
            | '\u{a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
            | '\u{feff}'
    )
}

/// Returns `true` for characters matched by the ASCII `\w` class.
pub(crate) fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Returns `true` for characters allowed inside an identifier.
///
/// Any non-whitespace code point at or above U+0080 is accepted, which keeps
/// the scanner total without Unicode property tables.
pub(crate) fn is_identifier_part(ch: char) -> bool {
    is_word_char(ch) || ch == '$' || (ch >= '\u{80}' && !is_js_whitespace(ch))
}

/// Returns `true` for characters that may open an identifier.
pub(crate) fn is_identifier_start(ch: char) -> bool {
    is_identifier_part(ch) && !ch.is_ascii_digit()
}

/// Scans a `'` or `"` quoted string starting at the opening quote.
///
/// Stops before an unescaped line terminator. Returns `true` when the closing
/// quote was consumed.
pub(crate) fn scan_quoted(cursor: &mut Cursor<'_>) -> bool {
    let Some(quote) = cursor.bump() else {
        return false;
    };
    while let Some(ch) = cursor.peek() {
        if ch == quote {
            cursor.bump();
            return true;
        }
        if ch == '\\' {
            if cursor.peek_nth(1).is_none() {
                return false;
            }
            cursor.bump();
            if !cursor.eat_str("\r\n") {
                cursor.bump();
            }
            continue;
        }
        if is_line_terminator(ch) {
            return false;
        }
        cursor.bump();
    }
    false
}

/// Scans a `//` comment up to, not including, the line terminator.
pub(crate) fn scan_line_comment(cursor: &mut Cursor<'_>) {
    cursor.eat_str("//");
    cursor.eat_while(|ch| !is_line_terminator(ch));
}

/// Scans a `/* */` comment. Returns `true` when it is terminated.
pub(crate) fn scan_block_comment(cursor: &mut Cursor<'_>) -> bool {
    cursor.eat_str("/*");
    while !cursor.is_eof() {
        if cursor.eat_str("*/") {
            return true;
        }
        cursor.bump();
    }
    false
}

/// Scans a `\uXXXX` or `\u{X..}` escape. Restores the cursor on mismatch.
pub(crate) fn scan_unicode_escape(cursor: &mut Cursor<'_>) -> bool {
    let start = cursor.pos();
    if !cursor.eat_str("\\u") {
        return false;
    }
    if cursor.eat('{') {
        let digits = cursor.eat_while(|ch| ch.is_ascii_hexdigit());
        if (1..=6).contains(&digits) && cursor.eat('}') {
            return true;
        }
    } else {
        let mut digits = 0;
        while digits < 4 && cursor.peek().is_some_and(|ch| ch.is_ascii_hexdigit()) {
            cursor.bump();
            digits += 1;
        }
        if digits == 4 {
            return true;
        }
    }
    cursor.reset(start);
    false
}

/// Scans an identifier body. Returns the number of characters and escapes consumed.
pub(crate) fn scan_identifier(cursor: &mut Cursor<'_>) -> usize {
    let mut count = 0;
    loop {
        match cursor.peek() {
            Some(ch) if is_identifier_part(ch) => {
                cursor.bump();
            }
            Some('\\') if scan_unicode_escape(cursor) => {}
            _ => break,
        }
        count += 1;
    }
    count
}

/// Returns `true` when an identifier can start at the cursor.
pub(crate) fn at_identifier_start(cursor: &Cursor<'_>) -> bool {
    match cursor.peek() {
        Some('\\') => {
            let mut probe = *cursor;
            scan_unicode_escape(&mut probe)
        }
        Some(ch) => is_identifier_start(ch),
        None => false,
    }
}

/// Scans a numeric literal. Returns `false` without consuming on mismatch.
///
/// Accepts `0x`, `0o`, `0b` radix forms and decimals with an optional fraction
/// and exponent.
pub(crate) fn scan_number(cursor: &mut Cursor<'_>) -> bool {
    let start = cursor.pos();
    let rest = cursor.rest().as_bytes();
    if rest.len() > 2 && rest[0] == b'0' {
        let radix_digit: Option<fn(char) -> bool> = match rest[1] {
            b'x' | b'X' => Some(|ch| ch.is_ascii_hexdigit()),
            b'o' | b'O' => Some(|ch| matches!(ch, '0'..='7')),
            b'b' | b'B' => Some(|ch| matches!(ch, '0' | '1')),
            _ => None,
        };
        if let Some(is_digit) = radix_digit {
            cursor.advance_by(2);
            if cursor.eat_while(is_digit) > 0 {
                return true;
            }
            cursor.reset(start);
        }
    }

    let integer = cursor.eat_while(|ch| ch.is_ascii_digit());
    if cursor.peek() == Some('.') {
        let fraction_follows = cursor.peek_nth(1).is_some_and(|ch| ch.is_ascii_digit());
        if fraction_follows {
            cursor.bump();
            cursor.eat_while(|ch| ch.is_ascii_digit());
        } else if integer > 0 {
            cursor.bump();
        }
    }
    if cursor.pos() == start {
        return false;
    }

    let before_exponent = cursor.pos();
    if cursor.eat('e') || cursor.eat('E') {
        let _signed = cursor.eat('+') || cursor.eat('-');
        if cursor.eat_while(|ch| ch.is_ascii_digit()) == 0 {
            cursor.reset(before_exponent);
        }
    }
    true
}

/// Decodes `\u` escapes in an identifier lexeme.
pub(crate) fn decode_identifier(lexeme: &str) -> Cow<'_, str> {
    if !lexeme.contains('\\') {
        return Cow::Borrowed(lexeme);
    }
    let mut decoded = String::with_capacity(lexeme.len());
    let mut cursor = Cursor::new(lexeme);
    while let Some(ch) = cursor.peek() {
        let start = cursor.pos();
        if ch == '\\' && scan_unicode_escape(&mut cursor) {
            let digits = cursor
                .slice_from(start)
                .trim_start_matches("\\u")
                .trim_start_matches('{')
                .trim_end_matches('}');
            let scalar = u32::from_str_radix(digits, 16)
                .ok()
                .and_then(char::from_u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER);
            decoded.push(scalar);
        } else {
            decoded.push(ch);
            cursor.bump();
        }
    }
    Cow::Owned(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanned(input: &str, scan: impl Fn(&mut Cursor<'_>) -> bool) -> (&str, bool) {
        let mut cursor = Cursor::new(input);
        let matched = scan(&mut cursor);
        (cursor.slice_from(0), matched)
    }

    #[test]
    fn quoted_string_stops_before_raw_newline() {
        assert_eq!(scanned("'ab\ncd'", scan_quoted), ("'ab", false));
        assert_eq!(scanned("'a\\'b' tail", scan_quoted), ("'a\\'b'", true));
    }

    #[test]
    fn number_forms() {
        assert_eq!(scanned("0x1fz", scan_number), ("0x1f", true));
        assert_eq!(scanned("250..4", scan_number), ("250.", true));
        assert_eq!(scanned(".5e3x", scan_number), (".5e3", true));
        assert_eq!(scanned("1e+", scan_number), ("1", true));
        assert_eq!(scanned(".x", scan_number), ("", false));
    }

    #[test]
    fn identifier_escapes_decode() {
        assert_eq!(decode_identifier("\\u0061lert"), "alert");
        assert_eq!(decode_identifier("\\u{6c}ocation"), "location");
        assert_eq!(decode_identifier("plain"), "plain");
    }
}
