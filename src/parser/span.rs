//! Source location tracking for jump-to-source and diagnostics.

use std::fmt;

use serde::Serialize;

/// A location in descriptor text (byte offset, line, column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Location {
    /// Byte offset from start of file
    pub offset: usize,
    /// Line number (1-indexed)
    pub line: u32,
    /// Column number (1-indexed, in characters not bytes)
    pub column: u32,
}

impl Location {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self { offset, line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Convert a byte offset to a Location (line/column).
///
/// Offsets past the end clamp to the end; offsets inside a multi-byte
/// character round down to the character start.
pub fn offset_to_location(source: &str, offset: usize) -> Location {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    let before = &source[..offset];

    let line = before.bytes().filter(|&b| b == b'\n').count() as u32 + 1;
    let last_newline = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[last_newline..].chars().count() as u32 + 1;

    Location { offset, line, column }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_to_location_simple() {
        let source = "class A\n{\n};";

        assert_eq!(offset_to_location(source, 0), Location::new(0, 1, 1));
        assert_eq!(offset_to_location(source, 6), Location::new(6, 1, 7));
        assert_eq!(offset_to_location(source, 8), Location::new(8, 2, 1));
        assert_eq!(offset_to_location(source, 12), Location::new(12, 3, 3));
    }

    #[test]
    fn test_offset_to_location_empty() {
        assert_eq!(offset_to_location("", 0), Location::new(0, 1, 1));
    }

    #[test]
    fn test_offset_past_end_clamps() {
        assert_eq!(offset_to_location("ab", 40), Location::new(2, 1, 3));
    }

    #[test]
    fn test_offset_inside_multibyte_char() {
        // 'é' is two bytes; offset 2 falls inside it
        let source = "aé b";
        assert_eq!(offset_to_location(source, 2), Location::new(1, 1, 2));
    }
}
