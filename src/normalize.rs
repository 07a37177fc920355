//! Input normalization.
//!
//! Payloads are routinely entity-encoded or percent-encoded, sometimes
//! several times over, so every check runs on the fully decoded form.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

/// Decodes HTML entities and percent-escapes until nothing changes, dropping
/// carriage returns, newlines and tabs along the way.
///
/// The result is a fixed point: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(raw: &str) -> String {
    let mut current = raw.to_string();
    // Every productive round makes the string shorter, so this terminates.
    loop {
        let next = normalize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_once(input: &str) -> String {
    let decoded = html_escape::decode_html_entities(input);
    let decoded = percent_decode_all(&decoded);
    decoded.replace(['\r', '\n', '\t'], "")
}

/// Percent-decodes `input` only when every `%` starts a valid escape and the
/// decoded bytes are UTF-8; otherwise returns it untouched.
fn percent_decode_all(input: &str) -> Cow<'_, str> {
    if !input.contains('%') || !has_only_valid_escapes(input) {
        return Cow::Borrowed(input);
    }
    match percent_decode_str(input).decode_utf8() {
        Ok(decoded) => decoded,
        Err(_) => Cow::Borrowed(input),
    }
}

fn has_only_valid_escapes(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.iter().enumerate().all(|(index, byte)| {
        *byte != b'%'
            || matches!(
                (bytes.get(index + 1), bytes.get(index + 2)),
                (Some(high), Some(low)) if high.is_ascii_hexdigit() && low.is_ascii_hexdigit()
            )
    })
}
