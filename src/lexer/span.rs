//! Byte positions into a scanned candidate.
//!
//! Offsets are stored as `u32`; a candidate longer than `u32::MAX` bytes
//! saturates rather than wrapping.

/// Byte position within one tokenizer or parser run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ByteOffset(u32);

impl ByteOffset {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Saturating conversion from a string index.
    pub fn from_usize(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Source range of a token or syntax node, `start` inclusive and `end`
/// exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: ByteOffset,
    pub end: ByteOffset,
}

impl Span {
    /// Builds a span from two offsets in either order.
    pub fn new(a: ByteOffset, b: ByteOffset) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn from_range(start: usize, end: usize) -> Self {
        Self::new(ByteOffset::from_usize(start), ByteOffset::from_usize(end))
    }

    /// Zero-width span, used for placeholders produced by loose recovery.
    pub fn empty_at(offset: ByteOffset) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Moves both ends right by `delta` bytes.
    pub fn shifted(self, delta: usize) -> Self {
        Self::from_range(self.start.as_usize() + delta, self.end.as_usize() + delta)
    }

    /// Returns `true` when `inner` sits within `self`.
    pub fn contains(self, inner: Span) -> bool {
        self.start <= inner.start && inner.end <= self.end
    }

    /// Text covered by the span; empty when the span does not fall on
    /// `source` char boundaries.
    pub fn slice(self, source: &str) -> &str {
        source
            .get(self.start.as_usize()..self.end.as_usize())
            .unwrap_or_default()
    }
}
