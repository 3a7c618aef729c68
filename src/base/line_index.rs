//! Byte-offset to line/column conversion.

use text_size::TextSize;

/// A line/column position (0-indexed, LSP-compatible).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Maps byte offsets to line/column pairs for one text snapshot.
///
/// Must be rebuilt whenever the text changes; it carries no stamp of its own
/// and is cheap enough to derive on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Offset of the first byte of each line. Always starts with 0.
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(TextSize::new(i as u32 + 1));
            }
        }
        Self { line_starts }
    }

    /// Convert a byte offset into a line/column pair.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let col = u32::from(offset) - u32::from(self.line_starts[line]);
        LineCol {
            line: line as u32,
            col,
        }
    }

    /// Convert a line/column pair back into a byte offset.
    pub fn offset(&self, line_col: LineCol) -> Option<TextSize> {
        let start = self.line_starts.get(line_col.line as usize)?;
        Some(*start + TextSize::new(line_col.col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text() {
        let index = LineIndex::new("");
        assert_eq!(index.line_col(TextSize::new(0)), LineCol { line: 0, col: 0 });
    }

    #[test]
    fn multi_line() {
        let index = LineIndex::new("party A;\ntx go() {}\n");
        assert_eq!(index.line_col(TextSize::new(0)), LineCol { line: 0, col: 0 });
        assert_eq!(index.line_col(TextSize::new(7)), LineCol { line: 0, col: 7 });
        assert_eq!(index.line_col(TextSize::new(9)), LineCol { line: 1, col: 0 });
        assert_eq!(index.line_col(TextSize::new(12)), LineCol { line: 1, col: 3 });
    }

    #[test]
    fn round_trip() {
        let index = LineIndex::new("a\nbc\ndef\n");
        for offset in 0..9u32 {
            let offset = TextSize::new(offset);
            let lc = index.line_col(offset);
            assert_eq!(index.offset(lc), Some(offset));
        }
    }
}
