//! Gradle TOML version-catalog failure parsing for build output.
//!
//! Gradle reports broken version catalogs (`gradle/libs.versions.toml`) as
//! free-form failure text on stdout. This crate recognizes the known failure
//! shapes in that text and turns each into a structured [`BuildIssue`],
//! recovering a navigable file/line/column target where one can be derived:
//! either from an explicit `In file '...' at line L, column C` fragment, or
//! by resolving the catalog name to its TOML file and locating the offending
//! key in it.
//!
//! The entry points are [`TomlErrorParser`] for a single failure block and
//! [`scan_build_output`] for a whole captured log.
//!
//! [`BuildIssue`]: lens_core::BuildIssue

pub mod error;
pub mod locate;
pub mod parser;
pub mod resolver;
pub mod scan;

pub use error::{CatalogError, Result};
pub use parser::{EchoHandling, TomlErrorParser};
pub use resolver::{CatalogResolver, DEFAULT_CATALOG};
pub use scan::scan_build_output;
