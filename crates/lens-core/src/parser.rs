//! Build-output parser interface.

use crate::event::MessageSink;
use crate::reader::ResettableReader;

/// A recognizer for one family of build failure output.
///
/// The driver hands each line to the parser together with the reader
/// positioned just past that line. The parser may scan ahead freely; it must
/// either consume a whole failure block and emit events (returning `true`),
/// or leave the reader back at its entry position (returning `false`) so
/// other parsers can inspect the same lines.
pub trait BuildOutputParser {
    fn parse<I>(
        &self,
        line: &str,
        reader: &mut ResettableReader<I>,
        sink: &mut dyn MessageSink,
    ) -> bool
    where
        I: Iterator<Item = String>;
}
