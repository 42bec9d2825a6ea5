//! Whole-log scan driver.

use crate::parser::TomlErrorParser;
use lens_core::{BuildOutputParser, MessageSink, ResettableReader};

/// Walks a captured build log line by line, handing each line to the parser
/// the way a streaming build-output reader would. Returns the number of
/// recognized failure blocks; issues go to `sink`.
pub fn scan_build_output(text: &str, parser: &TomlErrorParser, sink: &mut dyn MessageSink) -> usize {
    let mut reader = ResettableReader::from_text(text);
    let mut recognized = 0;
    while let Some(line) = reader.read_line() {
        if parser.parse(&line, &mut reader, sink) {
            recognized += 1;
        }
    }
    recognized
}
