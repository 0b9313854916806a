//! Byte ranges into an inventory source.

use std::ops::Range;

/// A half-open byte range into the text a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a byte range.
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }

    /// Create a span covering the line of `source` that starts at byte `start`.
    ///
    /// The line terminator is not part of the span. Offsets past the end of
    /// `source` yield an empty span at the end.
    pub fn line_at(source: &str, start: usize) -> Self {
        let start = start.min(source.len());
        let rest = &source.as_bytes()[start..];
        let len = rest
            .iter()
            .position(|b| *b == b'\n')
            .unwrap_or(rest.len());
        let mut end = start + len;
        if end > start && source.as_bytes()[end - 1] == b'\r' {
            end -= 1;
        }
        Self::new(start..end)
    }

    /// Get the start offset of the span
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the end offset of the span
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Shift the span right by `offset` bytes.
    pub fn offset_by(&self, offset: usize) -> Self {
        Self::new(self.start + offset..self.end + offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_basics() {
        let span = Span::new(4..10);

        assert_eq!(span.start(), 4);
        assert_eq!(span.end(), 10);
        assert_eq!(span.len(), 6);
        assert!(!span.is_empty());
        assert!(Span::default().is_empty());
    }

    #[test]
    fn test_line_at() {
        let source = "AppName,type\r\nPayroll,vm\nlast";

        assert_eq!(Span::line_at(source, 0), Span::new(0..12));
        assert_eq!(Span::line_at(source, 14), Span::new(14..24));
        assert_eq!(Span::line_at(source, 25), Span::new(25..29));
        assert!(Span::line_at(source, 100).is_empty());
    }

    #[test]
    fn test_offset_by() {
        assert_eq!(Span::new(0..3).offset_by(3), Span::new(3..6));
    }
}
