//! Byte offset to line/column conversion.

/// Precomputed table of line start offsets for a source text.
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(content: &str) -> Self {
        let mut line_starts = vec![0];
        for (idx, byte) in content.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(idx + 1);
            }
        }
        Self { line_starts }
    }

    /// Converts a byte offset into a 0-based (line, column) pair.
    ///
    /// Offsets past the end of the text map to the last line.
    pub fn position(&self, offset: usize) -> (u32, u32) {
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let column = offset - self.line_starts[line];
        (line as u32, column as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_on_each_line() {
        let content = "line0\nline1\nline2";
        let index = LineIndex::new(content);
        assert_eq!(index.position(0), (0, 0));
        assert_eq!(index.position(6), (1, 0));
        assert_eq!(index.position(8), (1, 2));
        assert_eq!(index.position(12), (2, 0));
    }

    #[test]
    fn test_position_at_newline_belongs_to_line() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.position(2), (0, 2));
        assert_eq!(index.position(3), (1, 0));
    }

    #[test]
    fn test_empty_content() {
        let index = LineIndex::new("");
        assert_eq!(index.position(0), (0, 0));
    }
}
