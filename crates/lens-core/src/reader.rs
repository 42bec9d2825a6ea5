//! Backtracking line reader over forward-only build output.
//!
//! Build-output parsers must look several lines ahead to decide whether a
//! failure block is theirs before consuming it. [`ResettableReader`] wraps a
//! forward-only line source with a history buffer so parsers can push back
//! lines or reset to a checkpoint.

use crate::error::ReaderError;

/// Line reader with pushback and checkpoint/reset over any line source.
///
/// Every line pulled from the source is retained in a history buffer, so
/// moving the cursor backwards never loses data and reading forward again
/// re-delivers the same lines in original order.
pub struct ResettableReader<I> {
    source: I,
    history: Vec<String>,
    cursor: usize,
    checkpoint: usize,
}

impl ResettableReader<std::vec::IntoIter<String>> {
    /// Creates a reader over the lines of `text`, split on `\n`.
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.split('\n').map(str::to_owned).collect())
    }

    /// Creates a reader over an already collected list of lines.
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self::new(lines.into_iter())
    }
}

impl<I> ResettableReader<I>
where
    I: Iterator<Item = String>,
{
    pub fn new(source: I) -> Self {
        Self {
            source,
            history: Vec::new(),
            cursor: 0,
            checkpoint: 0,
        }
    }

    /// Returns the next line, or `None` once the source is exhausted.
    ///
    /// Reading past the end is not an error; further calls keep returning
    /// `None` until the cursor is moved back.
    pub fn read_line(&mut self) -> Option<String> {
        if self.cursor == self.history.len() {
            let line = self.source.next()?;
            self.history.push(line);
        }
        let line = self.history[self.cursor].clone();
        self.cursor += 1;
        Some(line)
    }

    /// Un-reads exactly `count` lines; the next `read_line` calls re-deliver
    /// the most recently read lines in original order.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError::PushBackBeyondHistory`] when `count` exceeds the
    /// number of lines currently in front of the cursor.
    pub fn push_back(&mut self, count: usize) -> Result<(), ReaderError> {
        if count > self.cursor {
            return Err(ReaderError::PushBackBeyondHistory {
                requested: count,
                available: self.cursor,
            });
        }
        self.cursor -= count;
        Ok(())
    }

    /// Saves the current position as the checkpoint, replacing any previous
    /// one.
    pub fn mark(&mut self) {
        self.checkpoint = self.cursor;
    }

    /// Moves the cursor back to the last checkpoint, or to the stream start
    /// if none was ever set.
    pub fn reset_position(&mut self) {
        self.cursor = self.checkpoint;
    }

    /// Number of lines currently in front of the cursor.
    pub fn lines_read(&self) -> usize {
        self.cursor
    }
}
