//! Recognizers for the known version-catalog failure shapes.
//!
//! Gradle prints catalog failures as a `- Problem:` block (multi-line, with
//! `Reason:` and `Possible solution:` continuations) or as a bare
//! `InvalidUserDataException` message. The matchers here classify the first
//! body line and pull out the names needed for navigation.

use regex::Regex;
use std::sync::LazyLock;

static PROBLEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*- Problem: In version catalog ([A-Za-z0-9_.-]+), (.+)$")
        .expect("Invalid regex")
});

static ALIAS_DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*- Alias definition '([^']+)' is invalid").expect("Invalid regex")
});

static INVALID_ALIAS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"invalid (?:library|plugin|bundle|version) alias '([^']+)'")
        .expect("Invalid regex")
});

static VERSION_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"version reference '([^']+)' doesn't exist").expect("Invalid regex")
});

static BUNDLE_MEMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"a bundle with name '([^']+)' declares a dependency on '([^']+)' which doesn't exist")
        .expect("Invalid regex")
});

static IN_FILE_POSITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"In file '([^']+)' at line (\d+), column (\d+)").expect("Invalid regex")
});

static AT_POSITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"At line (\d+), column (\d+)").expect("Invalid regex"));

static DEPENDENCY_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Dependency '([^':]+):([^']+)' references").expect("Invalid regex"));

static PLUGIN_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Plugin '([^']+)' references").expect("Invalid regex"));

static UNEXPECTED_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^On (library|plugin|bundle|version) declaration '([^']+)' expected to find any of .+ but found unexpected key '([^']+)'\.$",
    )
    .expect("Invalid regex")
});

/// Classified `- Problem:` line of a failure body.
pub(crate) struct ProblemLine {
    pub catalog: String,
    pub kind: ProblemKind,
}

pub(crate) enum ProblemKind {
    /// `parsing failed with N error(s)` - positions come from the Reason.
    ParseFailure,
    /// `unknown top level elements [...]` - a misspelled section header.
    TopLevelElements,
    /// `invalid library alias 'a'` and friends.
    InvalidAlias { alias: String },
    /// `version reference 'x' doesn't exist`.
    VersionReference { reference: String },
    /// `a bundle with name 'b' declares a dependency on 'm' which doesn't exist`.
    BundleMember { bundle: String, member: String },
    /// A `- Problem:` line whose tail matches none of the known shapes.
    Unrecognized,
}

pub(crate) fn classify_problem(line: &str) -> Option<ProblemLine> {
    let caps = PROBLEM.captures(line)?;
    let catalog = caps[1].to_owned();
    let detail = &caps[2];

    let kind = if detail.starts_with("parsing failed with") {
        ProblemKind::ParseFailure
    } else if detail.starts_with("unknown top level elements") {
        ProblemKind::TopLevelElements
    } else if let Some(alias) = INVALID_ALIAS.captures(detail) {
        ProblemKind::InvalidAlias {
            alias: alias[1].to_owned(),
        }
    } else if let Some(reference) = VERSION_REFERENCE.captures(detail) {
        ProblemKind::VersionReference {
            reference: reference[1].to_owned(),
        }
    } else if let Some(bundle) = BUNDLE_MEMBER.captures(detail) {
        ProblemKind::BundleMember {
            bundle: bundle[1].to_owned(),
            member: bundle[2].to_owned(),
        }
    } else {
        ProblemKind::Unrecognized
    };

    Some(ProblemLine { catalog, kind })
}

/// Alias of an `- Alias definition '<a>' is invalid` body line.
pub(crate) fn alias_definition(line: &str) -> Option<String> {
    ALIAS_DEFINITION
        .captures(line)
        .map(|caps| caps[1].to_owned())
}

/// An explicit `In file '<path>' at line L, column C` fragment (1-based).
pub(crate) struct FileFragment {
    pub path: String,
    pub line: u32,
    pub column: u32,
}

/// All explicit file fragments in a failure body, in output order.
pub(crate) fn file_fragments(body: &[String]) -> Vec<FileFragment> {
    body.iter()
        .flat_map(|line| IN_FILE_POSITION.captures_iter(line))
        .filter_map(|caps| {
            Some(FileFragment {
                path: caps[1].to_owned(),
                line: caps[2].parse().ok()?,
                column: caps[3].parse().ok()?,
            })
        })
        .collect()
}

/// A pathless `At line L, column C` fragment (1-based).
pub(crate) fn at_position(body: &[String]) -> Option<(u32, u32)> {
    body.iter().find_map(|line| {
        let caps = AT_POSITION.captures(line)?;
        Some((caps[1].parse().ok()?, caps[2].parse().ok()?))
    })
}

/// What a broken version reference was referenced from.
pub(crate) enum ReferenceTarget {
    Dependency { group: String, name: String },
    Plugin { id: String },
}

pub(crate) fn reference_target(body: &[String]) -> Option<ReferenceTarget> {
    body.iter().find_map(|line| {
        if let Some(caps) = DEPENDENCY_REFERENCE.captures(line) {
            return Some(ReferenceTarget::Dependency {
                group: caps[1].to_owned(),
                name: caps[2].to_owned(),
            });
        }
        PLUGIN_REFERENCE.captures(line).map(|caps| ReferenceTarget::Plugin {
            id: caps[1].to_owned(),
        })
    })
}

/// A single-line `On <kind> declaration '<alias>' ... unexpected key '<key>'.`
/// exception message.
pub(crate) struct UnexpectedKey {
    pub section: &'static str,
    pub alias: String,
    pub key: String,
}

pub(crate) fn unexpected_key(message: &str) -> Option<UnexpectedKey> {
    let caps = UNEXPECTED_KEY.captures(message)?;
    let section = match &caps[1] {
        "library" => "libraries",
        "plugin" => "plugins",
        "bundle" => "bundles",
        _ => "versions",
    };
    Some(UnexpectedKey {
        section,
        alias: caps[2].to_owned(),
        key: caps[3].to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_classify_parse_failure() {
        let problem =
            classify_problem("  - Problem: In version catalog libs, parsing failed with 1 error.")
                .unwrap();
        assert_eq!(problem.catalog, "libs");
        assert!(matches!(problem.kind, ProblemKind::ParseFailure));
    }

    #[test]
    fn test_classify_top_level_elements() {
        let problem = classify_problem(
            "  - Problem: In version catalog libs, unknown top level elements [librariesa]",
        )
        .unwrap();
        assert!(matches!(problem.kind, ProblemKind::TopLevelElements));
    }

    #[test]
    fn test_classify_invalid_alias() {
        let problem =
            classify_problem("  - Problem: In version catalog libs, invalid library alias 'a'.")
                .unwrap();
        match problem.kind {
            ProblemKind::InvalidAlias { alias } => assert_eq!(alias, "a"),
            _ => panic!("expected InvalidAlias"),
        }
    }

    #[test]
    fn test_classify_version_reference() {
        let problem = classify_problem(
            "  - Problem: In version catalog libs, version reference 'reference' doesn't exist.",
        )
        .unwrap();
        match problem.kind {
            ProblemKind::VersionReference { reference } => assert_eq!(reference, "reference"),
            _ => panic!("expected VersionReference"),
        }
    }

    #[test]
    fn test_classify_bundle_member() {
        let problem = classify_problem(
            "  - Problem: In version catalog libs, a bundle with name 'bundle' declares a dependency on 'aaa' which doesn't exist.",
        )
        .unwrap();
        match problem.kind {
            ProblemKind::BundleMember { bundle, member } => {
                assert_eq!(bundle, "bundle");
                assert_eq!(member, "aaa");
            }
            _ => panic!("expected BundleMember"),
        }
    }

    #[test]
    fn test_classify_unrecognized_tail() {
        let problem =
            classify_problem("  - Problem: In version catalog libs, SOME RANDOM UNPARSABLE TEXT")
                .unwrap();
        assert!(matches!(problem.kind, ProblemKind::Unrecognized));
    }

    #[test]
    fn test_non_problem_line() {
        assert!(classify_problem("* Try:").is_none());
    }

    #[test]
    fn test_file_fragments_multiple_per_body() {
        let body = lines(&[
            "    Reason: In file '/p/gradle/libs.versions.toml' at line 14, column 1: x previously defined at line 13, column 1",
            "    In file '/p/gradle/libs.versions.toml' at line 15, column 1: x previously defined at line 13, column 1",
        ]);
        let fragments = file_fragments(&body);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].line, 14);
        assert_eq!(fragments[1].line, 15);
        assert_eq!(fragments[1].column, 1);
    }

    #[test]
    fn test_at_position_without_file() {
        let body = lines(&[
            "  - Problem: In version catalog libs, parsing failed with 1 error.",
            "    Reason: At line 11, column 19: Unexpected '/', expected a newline or end-of-input.",
        ]);
        assert_eq!(at_position(&body), Some((11, 19)));
    }

    #[test]
    fn test_reference_target_dependency() {
        let body = lines(&[
            "    Reason: Dependency 'androidx.core:core-ktx' references version 'reference' which doesn't exist.",
        ]);
        match reference_target(&body).unwrap() {
            ReferenceTarget::Dependency { group, name } => {
                assert_eq!(group, "androidx.core");
                assert_eq!(name, "core-ktx");
            }
            ReferenceTarget::Plugin { .. } => panic!("expected Dependency"),
        }
    }

    #[test]
    fn test_reference_target_plugin() {
        let body = lines(&[
            "    Reason: Plugin 'com.android.application' references version 'reference' which doesn't exist.",
        ]);
        match reference_target(&body).unwrap() {
            ReferenceTarget::Plugin { id } => assert_eq!(id, "com.android.application"),
            ReferenceTarget::Dependency { .. } => panic!("expected Plugin"),
        }
    }

    #[test]
    fn test_unexpected_key_message() {
        let found = unexpected_key(
            "On library declaration 'androidx-core-ktx' expected to find any of 'group', 'module', 'name', or 'version' but found unexpected key 'group1'.",
        )
        .unwrap();
        assert_eq!(found.section, "libraries");
        assert_eq!(found.alias, "androidx-core-ktx");
        assert_eq!(found.key, "group1");
    }

    #[test]
    fn test_alias_definition_line() {
        assert_eq!(
            alias_definition("  - Alias definition 'plugin' is invalid").as_deref(),
            Some("plugin")
        );
    }
}
