//! Shared building blocks for Gradle build-output diagnostics.
//!
//! Provides the pieces every output parser needs:
//! - [`ResettableReader`]: a line reader with pushback and checkpoint/reset,
//!   so parsers can speculatively scan a failure block before committing
//! - [`BuildIssue`] and [`MessageSink`]: the structured diagnostic event model
//! - [`BuildOutputParser`]: the interface an output parser implements
//! - [`LineIndex`]: byte offset to line/column conversion for source files

pub mod error;
pub mod event;
pub mod parser;
pub mod reader;
pub mod text;

pub use error::ReaderError;
pub use event::{BuildIssue, FilePosition, MessageSink, Severity};
pub use parser::BuildOutputParser;
pub use reader::ResettableReader;
pub use text::LineIndex;
