//! Catalog logical name to TOML file resolution.

use crate::error::{CatalogError, Result};
use std::collections::HashMap;
use std::path::PathBuf;

/// Catalog name Gradle assumes when a failure message names none.
pub const DEFAULT_CATALOG: &str = "libs";

/// Maps catalog logical names (e.g. "libs") to version-catalog files.
///
/// The mapping is supplied by the project; names without an entry fall back
/// to the conventional `gradle/<name>.versions.toml` under the project root.
pub struct CatalogResolver {
    project_root: PathBuf,
    catalogs: HashMap<String, PathBuf>,
}

impl CatalogResolver {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            catalogs: HashMap::new(),
        }
    }

    pub fn with_catalogs(
        project_root: impl Into<PathBuf>,
        catalogs: HashMap<String, PathBuf>,
    ) -> Self {
        Self {
            project_root: project_root.into(),
            catalogs,
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.catalogs.insert(name.into(), path.into());
    }

    /// Resolves a catalog name to an existing file, or `None` when the
    /// mapped (or conventional) path does not exist.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let path = self.catalogs.get(name).cloned().unwrap_or_else(|| {
            self.project_root
                .join("gradle")
                .join(format!("{name}.versions.toml"))
        });
        path.is_file().then_some(path)
    }

    /// All catalog names worth searching when a failure message names no
    /// catalog: the default one first, then every mapped name.
    pub fn known_catalogs(&self) -> Vec<String> {
        let mut names = vec![DEFAULT_CATALOG.to_owned()];
        let mut mapped: Vec<_> = self
            .catalogs
            .keys()
            .filter(|name| *name != DEFAULT_CATALOG)
            .cloned()
            .collect();
        mapped.sort();
        names.extend(mapped);
        names
    }

    /// Resolves a catalog and reads its content.
    pub(crate) fn load(&self, name: &str) -> Result<(PathBuf, String)> {
        let path = self
            .resolve(name)
            .ok_or_else(|| CatalogError::UnknownCatalog { name: name.into() })?;
        let content = std::fs::read_to_string(&path)?;
        Ok((path, content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_conventional_fallback_path() {
        let dir = tempfile::tempdir().unwrap();
        let gradle = dir.path().join("gradle");
        fs::create_dir(&gradle).unwrap();
        fs::write(gradle.join("libs.versions.toml"), "[versions]\n").unwrap();

        let resolver = CatalogResolver::new(dir.path());
        let path = resolver.resolve("libs").unwrap();
        assert!(path.ends_with("gradle/libs.versions.toml"));
    }

    #[test]
    fn test_mapping_wins_over_convention() {
        let dir = tempfile::tempdir().unwrap();
        let custom = dir.path().join("deps.toml");
        fs::write(&custom, "[libraries]\n").unwrap();

        let mut resolver = CatalogResolver::new(dir.path());
        resolver.insert("libs", &custom);
        assert_eq!(resolver.resolve("libs").unwrap(), custom);
    }

    #[test]
    fn test_missing_file_resolves_to_none() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = CatalogResolver::new(dir.path());
        assert!(resolver.resolve("libs").is_none());
        assert!(matches!(
            resolver.load("libs"),
            Err(CatalogError::UnknownCatalog { .. })
        ));
    }

    #[test]
    fn test_known_catalogs_default_first() {
        let mut resolver = CatalogResolver::new("/project");
        resolver.insert("tools", "/project/tools.toml");
        resolver.insert("deps", "/project/deps.toml");
        assert_eq!(resolver.known_catalogs(), vec!["libs", "deps", "tools"]);
    }
}
