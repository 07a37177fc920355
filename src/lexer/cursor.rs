//! Character cursor shared by the raw tokenizer and the script lexer.

use crate::lexer::span::ByteOffset;

/// Byte-position cursor over input text.
///
/// The cursor only ever stops on `char` boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cursor<'a> {
    input: &'a str,
    offset: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at byte offset `0`.
    pub(crate) fn new(input: &'a str) -> Self {
        Self::at(input, 0)
    }

    /// Creates a cursor at `offset`, clamped to the input length.
    pub(crate) fn at(input: &'a str, offset: usize) -> Self {
        let mut offset = offset.min(input.len());
        while !input.is_char_boundary(offset) {
            offset -= 1;
        }
        Self { input, offset }
    }

    /// Returns the full input text.
    pub(crate) fn input(&self) -> &'a str {
        self.input
    }

    /// Returns the current byte offset.
    pub(crate) fn pos(&self) -> usize {
        self.offset
    }

    /// Returns the current byte offset as a span offset.
    pub(crate) fn offset(&self) -> ByteOffset {
        ByteOffset::from_usize(self.offset)
    }

    /// Returns `true` if the cursor is at input end.
    pub(crate) fn is_eof(&self) -> bool {
        self.offset >= self.input.len()
    }

    /// Returns the unread input.
    pub(crate) fn rest(&self) -> &'a str {
        &self.input[self.offset..]
    }

    /// Returns the text consumed since `start`.
    pub(crate) fn slice_from(&self, start: usize) -> &'a str {
        &self.input[start..self.offset]
    }

    /// Returns the current character.
    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Returns the character `n` positions ahead.
    pub(crate) fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    /// Returns the current byte.
    pub(crate) fn peek_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.offset).copied()
    }

    /// Returns `true` when the unread input starts with `prefix`.
    pub(crate) fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Consumes and returns one character.
    pub(crate) fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.offset += ch.len_utf8();
        Some(ch)
    }

    /// Consumes `ch` if it is next.
    pub(crate) fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.offset += ch.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consumes `prefix` if the unread input starts with it.
    pub(crate) fn eat_str(&mut self, prefix: &str) -> bool {
        if self.starts_with(prefix) {
            self.offset += prefix.len();
            true
        } else {
            false
        }
    }

    /// Consumes characters while `predicate` holds and returns the count.
    pub(crate) fn eat_while(&mut self, predicate: impl Fn(char) -> bool) -> usize {
        let mut count = 0;
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.offset += ch.len_utf8();
            count += 1;
        }
        count
    }

    /// Advances by `count` bytes, clamped to input length and char boundaries.
    pub(crate) fn advance_by(&mut self, count: usize) {
        *self = Self::at(self.input, self.offset.saturating_add(count));
    }

    /// Moves the cursor back to `offset`.
    pub(crate) fn reset(&mut self, offset: usize) {
        *self = Self::at(self.input, offset);
    }
}
