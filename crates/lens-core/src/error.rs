//! Errors for the core reader primitives.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReaderError {
    #[error("cannot push back {requested} lines, only {available} read")]
    PushBackBeyondHistory { requested: usize, available: usize },
}
