//! Recognition of version-catalog failure blocks in Gradle build output.

mod problems;

use crate::locate;
use crate::resolver::{CatalogResolver, DEFAULT_CATALOG};
use lens_core::{BuildIssue, BuildOutputParser, FilePosition, MessageSink, ResettableReader};
use problems::{ProblemKind, ReferenceTarget, UnexpectedKey};
use std::path::PathBuf;

const BUILD_FAILURE: &str = "FAILURE: Build failed with an exception.";
const WHAT_WENT_WRONG: &str = "* What went wrong:";
const EXCEPTION_PREFIX: &str = "org.gradle.api.InvalidUserDataException: ";
const TOML_BANNER: &str = "Invalid TOML catalog definition:";
const CATALOG_BANNER: &str = "Invalid catalog definition:";

const TOML_TITLE: &str = "Invalid TOML catalog definition.";
const CATALOG_TITLE: &str = "Invalid catalog definition.";
const ALIAS_TITLE: &str = "Invalid alias catalog definition.";

/// How to treat the `>`-prefixed repeat of the failure block.
///
/// Current Gradle versions echo the whole block a second time behind `>`
/// markers. Whether that stays stable across versions is unknown, so the
/// rule is isolated behind this toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EchoHandling {
    /// Discard the repeated block; only the first occurrence is reported.
    #[default]
    IgnoreRepeats,
    /// Treat `>` lines as part of the failure body.
    Keep,
}

/// Recognizes Gradle version-catalog failures in build output and emits one
/// [`BuildIssue`] per offending declaration.
///
/// The parser is handed the first line of a candidate block plus the reader
/// positioned after it. It speculatively scans ahead; when the block turns
/// out not to be a catalog failure, the reader is reset so other parsers can
/// inspect the same lines.
pub struct TomlErrorParser {
    resolver: CatalogResolver,
    echo: EchoHandling,
}

impl TomlErrorParser {
    pub fn new(resolver: CatalogResolver) -> Self {
        Self {
            resolver,
            echo: EchoHandling::default(),
        }
    }

    pub fn with_echo_handling(mut self, echo: EchoHandling) -> Self {
        self.echo = echo;
        self
    }

    /// Reads the failure body, stopping at a `* Try:` style trailer or (by
    /// default) the `>`-prefixed echo of the block. Blank lines inside the
    /// body are part of the message; trailing ones are not.
    fn read_block<I>(&self, reader: &mut ResettableReader<I>) -> Vec<String>
    where
        I: Iterator<Item = String>,
    {
        let mut lines = Vec::new();
        while let Some(line) = reader.read_line() {
            if line.starts_with('*') {
                break;
            }
            if line.starts_with('>') && self.echo == EchoHandling::IgnoreRepeats {
                break;
            }
            lines.push(line);
        }
        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }
        lines
    }

    fn parse_block(
        &self,
        banner_title: &str,
        reader: &mut ResettableReader<impl Iterator<Item = String>>,
        sink: &mut dyn MessageSink,
    ) -> bool {
        let body = self.read_block(reader);
        if body.is_empty() {
            reader.reset_position();
            return false;
        }

        if let Some(alias) = problems::alias_definition(&body[0]) {
            let description = block_description(ALIAS_TITLE, &body);
            let navigation = self.locate_in_catalog(DEFAULT_CATALOG, |content| {
                locate::find_alias(content, &alias)
            });
            sink.emit(BuildIssue::error(ALIAS_TITLE, description).with_navigation(navigation));
            return true;
        }

        let description = block_description(banner_title, &body);
        let Some(problem) = problems::classify_problem(&body[0]) else {
            // Recognized banner, unrecognized internals: report it anyway.
            tracing::debug!("catalog failure body matched no known shape");
            sink.emit(BuildIssue::error(banner_title, description));
            return true;
        };
        let catalog = problem.catalog;

        match problem.kind {
            ProblemKind::ParseFailure => {
                self.emit_parse_failure(banner_title, &catalog, &body, &description, sink);
            }
            ProblemKind::TopLevelElements => {
                // A misspelled top-level table has no key to navigate to.
                sink.emit(
                    BuildIssue::error(banner_title, description).with_catalog(catalog),
                );
            }
            ProblemKind::InvalidAlias { alias } => {
                let navigation = self
                    .locate_in_catalog(&catalog, |content| locate::find_alias(content, &alias));
                sink.emit(
                    BuildIssue::error(banner_title, description)
                        .with_catalog(catalog)
                        .with_navigation(navigation),
                );
            }
            ProblemKind::VersionReference { reference } => {
                let navigation = self.locate_in_catalog(&catalog, |content| {
                    match problems::reference_target(&body) {
                        Some(ReferenceTarget::Dependency { group, name }) => {
                            locate::find_library(content, &group, &name)
                        }
                        Some(ReferenceTarget::Plugin { id }) => locate::find_plugin(content, &id),
                        None => locate::find_alias(content, &reference),
                    }
                });
                sink.emit(
                    BuildIssue::error(banner_title, description)
                        .with_catalog(catalog)
                        .with_navigation(navigation),
                );
            }
            ProblemKind::BundleMember { bundle, member } => {
                let navigation = self.locate_in_catalog(&catalog, |content| {
                    locate::find_bundle_member(content, &bundle, &member)
                });
                sink.emit(
                    BuildIssue::error(banner_title, description)
                        .with_catalog(catalog)
                        .with_navigation(navigation),
                );
            }
            ProblemKind::Unrecognized => {
                sink.emit(BuildIssue::error(banner_title, description).with_catalog(catalog));
            }
        }
        true
    }

    /// Emits events for a `parsing failed with N errors` body: one issue per
    /// explicit file fragment (duplicate aliases produce several), or a
    /// single issue positioned via the catalog file when the Reason carries
    /// only a pathless `At line L, column C`.
    fn emit_parse_failure(
        &self,
        title: &str,
        catalog: &str,
        body: &[String],
        description: &str,
        sink: &mut dyn MessageSink,
    ) {
        let fragments = problems::file_fragments(body);
        if !fragments.is_empty() {
            for fragment in fragments {
                let path = PathBuf::from(&fragment.path);
                let navigation = if path.is_file() {
                    Some(FilePosition::new(
                        path,
                        fragment.line.saturating_sub(1),
                        fragment.column.saturating_sub(1),
                    ))
                } else {
                    tracing::debug!("reported catalog file does not exist: {}", fragment.path);
                    None
                };
                sink.emit(
                    BuildIssue::error(title, description)
                        .with_catalog(catalog)
                        .with_navigation(navigation),
                );
            }
            return;
        }

        let navigation = problems::at_position(body).and_then(|(line, column)| {
            let path = self.resolver.resolve(catalog)?;
            Some(FilePosition::new(
                path,
                line.saturating_sub(1),
                column.saturating_sub(1),
            ))
        });
        sink.emit(
            BuildIssue::error(title, description)
                .with_catalog(catalog)
                .with_navigation(navigation),
        );
    }

    /// Handles the single-line `On library declaration '...' ... unexpected
    /// key '...'` exception, which names no catalog: every known catalog is
    /// searched for the offending key.
    fn emit_unexpected_key(
        &self,
        message: &str,
        found: &UnexpectedKey,
        sink: &mut dyn MessageSink,
    ) {
        let description = format!("{CATALOG_TITLE}\n{message}");
        let located = self.resolver.known_catalogs().into_iter().find_map(|name| {
            let navigation = self.locate_in_catalog(&name, |content| {
                locate::find_unexpected_key(content, found.section, &found.alias, &found.key)
            })?;
            Some((name, navigation))
        });
        let issue = match located {
            Some((name, navigation)) => BuildIssue::error(CATALOG_TITLE, description)
                .with_catalog(name)
                .with_navigation(Some(navigation)),
            None => BuildIssue::error(CATALOG_TITLE, description),
        };
        sink.emit(issue);
    }

    /// Resolves a catalog file and locates the offending key in it. Any
    /// failure degrades to no navigation, never to a dropped diagnostic.
    fn locate_in_catalog(
        &self,
        name: &str,
        find: impl Fn(&str) -> crate::Result<Option<(u32, u32)>>,
    ) -> Option<FilePosition> {
        let (path, content) = match self.resolver.load(name) {
            Ok(loaded) => loaded,
            Err(err) => {
                tracing::debug!("catalog '{name}' unavailable for navigation: {err}");
                return None;
            }
        };
        match find(&content) {
            Ok(Some((line, column))) => Some(FilePosition::new(path, line, column)),
            Ok(None) => {
                tracing::debug!("offending key not found in catalog '{name}'");
                None
            }
            Err(err) => {
                tracing::debug!("cannot search catalog '{name}': {err}");
                None
            }
        }
    }
}

impl BuildOutputParser for TomlErrorParser {
    fn parse<I>(
        &self,
        line: &str,
        reader: &mut ResettableReader<I>,
        sink: &mut dyn MessageSink,
    ) -> bool
    where
        I: Iterator<Item = String>,
    {
        if line.trim() != BUILD_FAILURE {
            return false;
        }
        reader.mark();

        let Some(marker) = next_non_blank(reader) else {
            reader.reset_position();
            return false;
        };
        if marker.trim() != WHAT_WENT_WRONG {
            reader.reset_position();
            return false;
        }
        let Some(exception) = reader.read_line() else {
            reader.reset_position();
            return false;
        };

        let message = exception.trim();
        let message = message.strip_prefix(EXCEPTION_PREFIX).unwrap_or(message);

        if message == TOML_BANNER {
            return self.parse_block(TOML_TITLE, reader, sink);
        }
        if message == CATALOG_BANNER {
            return self.parse_block(CATALOG_TITLE, reader, sink);
        }
        if let Some(found) = problems::unexpected_key(message) {
            skip_echo(reader);
            self.emit_unexpected_key(message, &found, sink);
            return true;
        }

        reader.reset_position();
        false
    }
}

fn block_description(title: &str, body: &[String]) -> String {
    format!("{title}\n{}", body.join("\n"))
}

fn next_non_blank<I>(reader: &mut ResettableReader<I>) -> Option<String>
where
    I: Iterator<Item = String>,
{
    while let Some(line) = reader.read_line() {
        if !line.trim().is_empty() {
            return Some(line);
        }
    }
    None
}

/// Consumes the `>`-prefixed repeats directly following a single-line
/// exception message.
fn skip_echo<I>(reader: &mut ResettableReader<I>)
where
    I: Iterator<Item = String>,
{
    while let Some(line) = reader.read_line() {
        if !line.starts_with('>') {
            // Just read, so pushing one line back cannot fail.
            reader.push_back(1).ok();
            break;
        }
    }
}
