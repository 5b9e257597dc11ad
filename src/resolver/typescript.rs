use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use super::package::{split_package_specifier, PackageManifest};
use super::{normalize_path, Resolution, Resolver, UnresolvedReason};

/// File extensions to try when resolving TypeScript/JavaScript imports, in priority order.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx"];

/// TypeScript/JavaScript module resolver.
///
/// Handles:
/// - Relative imports (`./foo`, `../bar`) with extension probing
/// - Index file resolution (`./services` -> `./services/index.ts`)
/// - Bare specifiers, searched in `node_modules` of every ancestor directory,
///   using the package's `package.json` `main` field
///
/// Does NOT handle:
/// - tsconfig `paths` aliases
/// - `exports`/`types` fields of package.json
/// - Dynamic imports with computed paths
pub struct TypeScriptResolver {
    extensions: Vec<String>,
    node_modules: bool,
    /// Cache of file existence checks to avoid repeated filesystem lookups.
    existence_cache: Mutex<HashMap<PathBuf, bool>>,
}

impl TypeScriptResolver {
    /// - `extensions`: extensions to probe, each with its leading dot.
    /// - `node_modules`: whether bare specifiers are looked up in `node_modules`.
    pub fn new(extensions: Vec<String>, node_modules: bool) -> Self {
        TypeScriptResolver {
            extensions,
            node_modules,
            existence_cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(
            DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            true,
        )
    }

    fn file_exists(&self, path: &Path) -> bool {
        let Ok(mut cache) = self.existence_cache.lock() else {
            return path.is_file();
        };
        if let Some(&exists) = cache.get(path) {
            return exists;
        }
        let exists = path.is_file();
        cache.insert(path.to_path_buf(), exists);
        exists
    }

    /// Probe `base_path` as written, with each extension appended, then as a
    /// directory containing an index file. Returns the first file that exists.
    fn try_with_extensions(&self, base_path: &Path) -> Option<PathBuf> {
        if base_path.extension().is_some() && self.file_exists(base_path) {
            return Some(base_path.to_path_buf());
        }

        for ext in &self.extensions {
            let with_ext = PathBuf::from(format!("{}{}", base_path.display(), ext));
            if self.file_exists(&with_ext) {
                return Some(with_ext);
            }
        }

        for ext in &self.extensions {
            let with_index = base_path.join(format!("index{}", ext));
            if self.file_exists(&with_index) {
                return Some(with_index);
            }
        }

        None
    }

    fn resolve_relative(&self, specifier: &str, from_file: &Path) -> Resolution {
        let Some(base_dir) = from_file.parent() else {
            return Resolution::Unresolved(UnresolvedReason::FileNotFound(format!(
                "cannot determine parent directory of {}",
                from_file.display()
            )));
        };

        let normalized = normalize_path(&base_dir.join(specifier));
        match self.try_with_extensions(&normalized) {
            Some(resolved) => Resolution::Resolved(resolved),
            None => Resolution::Unresolved(UnresolvedReason::FileNotFound(specifier.to_string())),
        }
    }

    /// Walk from the importing file's directory toward the root, looking for
    /// `node_modules/<specifier>` at each level.
    fn resolve_package(&self, specifier: &str, from_file: &Path) -> Resolution {
        let (package_name, subpath) = split_package_specifier(specifier);
        let start = from_file.parent().unwrap_or(from_file);

        for dir in start.ancestors() {
            let package_dir = dir.join("node_modules").join(package_name);
            let candidate = normalize_path(&dir.join("node_modules").join(specifier));

            if let Some(entry) = self.resolve_package_candidate(&candidate, &package_dir, subpath)
            {
                return Resolution::Package {
                    name: package_name.to_string(),
                    entry,
                };
            }
        }

        Resolution::Unresolved(UnresolvedReason::PackageNotFound(package_name.to_string()))
    }

    fn resolve_package_candidate(
        &self,
        candidate: &Path,
        package_dir: &Path,
        subpath: Option<&str>,
    ) -> Option<PathBuf> {
        if self.file_exists(candidate) {
            return Some(candidate.to_path_buf());
        }

        // The manifest only describes the package root, not deep imports.
        if subpath.is_none() && package_dir.is_dir() {
            match PackageManifest::read(package_dir) {
                Ok(manifest) => {
                    if let Some(main) = manifest.main_entry() {
                        let entry = normalize_path(&package_dir.join(main));
                        if let Some(found) = self.try_with_extensions(&entry) {
                            return Some(found);
                        }
                        debug!(
                            "main entry {} of {} does not exist",
                            main,
                            package_dir.display()
                        );
                    }
                }
                Err(e) => debug!("skipping package manifest: {}", e),
            }
        }

        self.try_with_extensions(candidate)
    }
}

impl Default for TypeScriptResolver {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Resolver for TypeScriptResolver {
    fn resolve(&self, specifier: &str, from_file: &Path) -> Resolution {
        if specifier.is_empty() {
            return Resolution::Unresolved(UnresolvedReason::UnsupportedSyntax(
                "empty import path".to_string(),
            ));
        }

        if specifier.starts_with('.') {
            return self.resolve_relative(specifier, from_file);
        }

        if specifier.starts_with('/') {
            let path = normalize_path(Path::new(specifier));
            return match self.try_with_extensions(&path) {
                Some(resolved) => Resolution::Resolved(resolved),
                None => {
                    Resolution::Unresolved(UnresolvedReason::FileNotFound(specifier.to_string()))
                }
            };
        }

        if !self.node_modules {
            return Resolution::Unresolved(UnresolvedReason::PackagesDisabled(
                specifier.to_string(),
            ));
        }

        self.resolve_package(specifier, from_file)
    }
}
