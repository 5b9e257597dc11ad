use std::path::{Component, Path, PathBuf};

pub mod package;
pub mod typescript;

/// Result of resolving a module specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Resolved to a file inside the project (relative or absolute specifier).
    Resolved(PathBuf),
    /// Resolved to the entry file of a package found in a `node_modules` directory.
    Package { name: String, entry: PathBuf },
    /// Could not resolve the specifier.
    Unresolved(UnresolvedReason),
}

impl Resolution {
    pub fn into_path(self) -> Option<PathBuf> {
        match self {
            Resolution::Resolved(path) => Some(path),
            Resolution::Package { entry, .. } => Some(entry),
            Resolution::Unresolved(_) => None,
        }
    }
}

/// Reasons why a specifier could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// No candidate file exists for a relative or absolute specifier.
    FileNotFound(String),
    /// No `node_modules` directory up to the filesystem root provides the package.
    PackageNotFound(String),
    /// Package resolution is switched off in the configuration.
    PackagesDisabled(String),
    /// The specifier cannot be resolved statically.
    UnsupportedSyntax(String),
}

/// Resolution of module specifiers to files.
///
/// - `specifier`: the string literal from the import statement (e.g. `"./utils"`)
/// - `from_file`: the absolute path of the file containing the import
pub trait Resolver: Send + Sync {
    fn resolve(&self, specifier: &str, from_file: &Path) -> Resolution;

    /// The resolved file, if any.
    fn resolve_import_path(&self, specifier: &str, from_file: &Path) -> Option<PathBuf> {
        self.resolve(specifier, from_file).into_path()
    }
}

/// Normalize a path by resolving `.` and `..` components without touching the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                if components
                    .last()
                    .is_some_and(|c| matches!(c, Component::Normal(_)))
                {
                    components.pop();
                } else {
                    components.push(component);
                }
            }
            Component::CurDir => {}
            other => components.push(other),
        }
    }
    components.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_parent_dir() {
        assert_eq!(
            normalize_path(Path::new("/a/b/../c")),
            PathBuf::from("/a/c")
        );
    }

    #[test]
    fn test_normalize_path_mixed() {
        assert_eq!(
            normalize_path(Path::new("/a/./b/c/../../d/./e")),
            PathBuf::from("/a/d/e")
        );
    }

    #[test]
    fn test_normalize_path_keeps_leading_parent() {
        assert_eq!(normalize_path(Path::new("../x/./y")), PathBuf::from("../x/y"));
    }

    #[test]
    fn test_resolution_into_path() {
        let entry = PathBuf::from("/p/node_modules/pkg/index.js");
        let resolution = Resolution::Package {
            name: "pkg".to_string(),
            entry: entry.clone(),
        };
        assert_eq!(resolution.into_path(), Some(entry));

        let missing = Resolution::Unresolved(UnresolvedReason::FileNotFound("./x".into()));
        assert_eq!(missing.into_path(), None);
    }
}
