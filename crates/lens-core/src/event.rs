//! Structured diagnostic events produced by build-output parsers.

use serde::Serialize;
use std::path::PathBuf;

/// A navigable location in a source file. Line and column are 0-based.
///
/// Navigation is all-or-nothing: an issue either carries a full
/// path/line/column triple or none at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilePosition {
    pub path: PathBuf,
    pub line: u32,
    pub column: u32,
}

impl FilePosition {
    pub fn new(path: impl Into<PathBuf>, line: u32, column: u32) -> Self {
        Self {
            path: path.into(),
            line,
            column,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// One diagnostic extracted from a build failure block.
///
/// `description` preserves the failure text verbatim, newlines and
/// indentation included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildIssue {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<FilePosition>,
}

impl BuildIssue {
    /// Creates an error-severity issue without catalog or navigation data.
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Error,
            catalog: None,
            navigation: None,
        }
    }

    pub fn with_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    pub fn with_navigation(mut self, navigation: Option<FilePosition>) -> Self {
        self.navigation = navigation;
        self
    }
}

/// Receives issues as a parser emits them. Fire-and-forget, no backpressure.
pub trait MessageSink {
    fn emit(&mut self, issue: BuildIssue);
}

impl MessageSink for Vec<BuildIssue> {
    fn emit(&mut self, issue: BuildIssue) {
        self.push(issue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut sink: Vec<BuildIssue> = Vec::new();
        sink.emit(BuildIssue::error("first", "d1"));
        sink.emit(BuildIssue::error("second", "d2"));
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[0].title, "first");
        assert_eq!(sink[1].title, "second");
    }

    #[test]
    fn test_builder_helpers() {
        let issue = BuildIssue::error("t", "d")
            .with_catalog("libs")
            .with_navigation(Some(FilePosition::new("/p/libs.versions.toml", 3, 7)));
        assert_eq!(issue.severity, Severity::Error);
        assert_eq!(issue.catalog.as_deref(), Some("libs"));
        let nav = issue.navigation.unwrap();
        assert_eq!((nav.line, nav.column), (3, 7));
    }
}
