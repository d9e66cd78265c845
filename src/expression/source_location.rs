//! Source Location Utilities
//!
//! Line/column tracking for diagnostics. Expressions are usually a single
//! line, but tabulation requests can come from files or multi-line inputs,
//! so positions are reported as both byte offset and line/column.

use std::fmt;

/// A position in source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    /// Byte offset from start of input
    pub offset: usize,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based, UTF-8 aware)
    pub column: usize,
}

impl SourcePosition {
    /// Create a new source position
    #[inline]
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Create a position at the start of input
    #[inline]
    pub fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// The full source line containing this position (without the newline)
    pub fn line_text<'a>(&self, input: &'a str) -> &'a str {
        let offset = self.offset.min(input.len());
        let line_start = input[..offset].rfind('\n').map(|n| n + 1).unwrap_or(0);
        let line_end = input[offset..]
            .find('\n')
            .map(|n| offset + n)
            .unwrap_or(input.len());
        &input[line_start..line_end]
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start() {
        assert_eq!(SourcePosition::start(), SourcePosition::new(0, 1, 1));
        assert_eq!(SourcePosition::default(), SourcePosition::start());
    }

    #[test]
    fn test_line_text() {
        let input = "x +\n  y ?\n z";
        let pos = SourcePosition::new(8, 2, 5);
        assert_eq!(pos.line_text(input), "  y ?");
        assert_eq!(SourcePosition::new(0, 1, 1).line_text(input), "x +");
        assert_eq!(SourcePosition::new(100, 3, 3).line_text(input), " z");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            SourcePosition::new(10, 2, 5).to_string(),
            "line 2, column 5"
        );
    }
}
