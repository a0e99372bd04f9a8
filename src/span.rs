//! Half-open offset ranges into a text buffer.
//!
//! Offsets are UTF-8 byte offsets, as produced by the `regex` crate, and always
//! sit on `char` boundaries of the buffer they were computed against. A span is
//! only meaningful for that buffer: once the buffer is edited ahead of the
//! span, the span is stale. The serialized fields are `start_byte` and
//! `end_byte`; renderers that index by character use [`Span::char_range`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// A half-open `[start, end)` range.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    #[serde(rename = "start_byte")]
    pub start: usize,
    #[serde(rename = "end_byte")]
    pub end: usize,
}

impl Span {
    /// Placeholder for edits that are applied by pattern substitution rather
    /// than by index. Never replay these positionally.
    pub const NONE: Span = Span { start: 0, end: 0 };

    /// Creates a span, swapping the bounds if they arrive reversed.
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True for the `(0, 0)` placeholder carried by non-positional edits.
    pub fn is_placeholder(&self) -> bool {
        *self == Self::NONE
    }

    /// Returns true if the two spans share at least one offset.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns true if `other` lies entirely inside this span.
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// The text this span covers, or `None` if it is out of range or does not
    /// sit on char boundaries of `text`.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }

    /// The same range counted in `char`s of `text`, or `None` where
    /// [`Span::slice`] would fail.
    pub fn char_range(&self, text: &str) -> Option<(usize, usize)> {
        let covered = self.slice(text)?;
        let start = text[..self.start].chars().count();
        Some((start, start + covered.chars().count()))
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

impl From<regex::Match<'_>> for Span {
    fn from(m: regex::Match<'_>) -> Self {
        Span::new(m.start(), m.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reversed_bounds_are_normalized() {
        let span = Span::new(9, 3);
        assert_eq!(span.start, 3);
        assert_eq!(span.end, 9);
        assert_eq!(span.len(), 6);
    }

    #[test]
    fn test_overlap_is_half_open() {
        let a = Span::new(0, 5);
        let b = Span::new(5, 8);
        let c = Span::new(4, 6);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(b.overlaps(&c));
    }

    #[test]
    fn test_slice_rejects_out_of_range_and_split_chars() {
        let text = "Café fraud";
        assert_eq!(Span::new(0, 3).slice(text), Some("Caf"));
        // 'é' occupies bytes 3..5
        assert_eq!(Span::new(0, 4).slice(text), None);
        assert_eq!(Span::new(6, 11).slice(text), Some("fraud"));
        assert_eq!(Span::new(6, 40).slice(text), None);
    }

    #[test]
    fn test_char_range_counts_chars() {
        let text = "Café fraud";
        assert_eq!(Span::new(6, 11).char_range(text), Some((5, 10)));
        assert_eq!(Span::new(0, 4).char_range(text), None);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_string(&Span::new(6, 11)).unwrap();
        assert_eq!(json, r#"{"start_byte":6,"end_byte":11}"#);
    }

    #[test]
    fn test_placeholder() {
        assert!(Span::NONE.is_placeholder());
        assert!(Span::NONE.is_empty());
        assert!(!Span::new(0, 1).is_placeholder());
        assert_eq!(format!("{:?}", Span::new(2, 7)), "[2, 7)");
    }
}
