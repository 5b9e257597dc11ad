use std::path::Path;

use serde::Deserialize;

use crate::error::{AnalyzerError, Result};

/// The subset of `package.json` used to locate a package's entry file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub main: Option<String>,
}

impl PackageManifest {
    /// Read `<package_dir>/package.json`.
    pub fn read(package_dir: &Path) -> Result<Self> {
        let path = package_dir.join("package.json");
        let content = std::fs::read_to_string(&path).map_err(|source| AnalyzerError::Io {
            path: path.clone(),
            source,
        })?;
        Self::parse(&content, &path)
    }

    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| AnalyzerError::Manifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// The `main` field, ignoring empty values.
    pub fn main_entry(&self) -> Option<&str> {
        self.main.as_deref().map(str::trim).filter(|m| !m.is_empty())
    }
}

/// Split a bare specifier into package name and optional subpath.
/// e.g. "react" -> ("react", None), "@scope/pkg/sub" -> ("@scope/pkg", Some("sub")),
/// "lodash/debounce" -> ("lodash", Some("debounce"))
pub fn split_package_specifier(specifier: &str) -> (&str, Option<&str>) {
    let name_end = if specifier.starts_with('@') {
        match specifier.find('/') {
            Some(first) => specifier[first + 1..].find('/').map(|second| first + 1 + second),
            None => None,
        }
    } else {
        specifier.find('/')
    };

    match name_end {
        Some(end) => (&specifier[..end], Some(&specifier[end + 1..])),
        None => (specifier, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_main_field() {
        let manifest =
            PackageManifest::parse(r#"{"name": "pkg", "main": "lib/index.js"}"#, Path::new("p"))
                .unwrap();
        assert_eq!(manifest.name.as_deref(), Some("pkg"));
        assert_eq!(manifest.main_entry(), Some("lib/index.js"));
    }

    #[test]
    fn test_missing_and_empty_main() {
        let manifest = PackageManifest::parse(r#"{"name": "pkg"}"#, Path::new("p")).unwrap();
        assert_eq!(manifest.main_entry(), None);

        let manifest = PackageManifest::parse(r#"{"main": "  "}"#, Path::new("p")).unwrap();
        assert_eq!(manifest.main_entry(), None);
    }

    #[test]
    fn test_malformed_manifest_is_error() {
        let result = PackageManifest::parse("{ not json", Path::new("package.json"));
        assert!(matches!(result, Err(AnalyzerError::Manifest { .. })));
    }

    #[test]
    fn test_read_from_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"main": "dist/main.js"}"#).unwrap();
        let manifest = PackageManifest::read(dir.path()).unwrap();
        assert_eq!(manifest.main_entry(), Some("dist/main.js"));

        let empty = TempDir::new().unwrap();
        assert!(matches!(
            PackageManifest::read(empty.path()),
            Err(AnalyzerError::Io { .. })
        ));
    }

    #[test]
    fn test_split_package_specifier() {
        assert_eq!(split_package_specifier("react"), ("react", None));
        assert_eq!(
            split_package_specifier("lodash/debounce"),
            ("lodash", Some("debounce"))
        );
        assert_eq!(split_package_specifier("@types/node"), ("@types/node", None));
        assert_eq!(
            split_package_specifier("@angular/core/testing"),
            ("@angular/core", Some("testing"))
        );
        assert_eq!(split_package_specifier("@scope"), ("@scope", None));
    }
}
