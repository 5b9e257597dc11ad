use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ignore::WalkBuilder;

use crate::config::DiscoverySection;
use crate::model::Language;

/// A discovered source file.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub language: Language,
}

/// Configuration for file discovery.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
    /// Glob patterns to include (empty means include all).
    pub include: Vec<String>,
    /// Glob patterns to exclude.
    pub exclude: Vec<String>,
}

impl From<&DiscoverySection> for DiscoveryConfig {
    fn from(section: &DiscoverySection) -> Self {
        DiscoveryConfig {
            include: section.include.clone(),
            exclude: section.exclude.clone(),
        }
    }
}

/// Installed packages and build output are never scanned.
const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &["node_modules/", "dist/", "build/"];

/// Discover TypeScript and JavaScript files under `root`, respecting .gitignore.
pub fn discover_files(root: &Path, config: &DiscoveryConfig) -> Result<Vec<DiscoveredFile>> {
    let mut files = Vec::new();

    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(false) // don't skip dot-prefixed dirs entirely (let gitignore decide)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .parents(true);

    let mut overrides = ignore::overrides::OverrideBuilder::new(root);
    for pattern in DEFAULT_EXCLUDE_PATTERNS {
        overrides
            .add(&format!("!{}", pattern))
            .context("invalid default exclude pattern")?;
    }
    for pattern in &config.exclude {
        overrides
            .add(&format!("!{}", pattern))
            .with_context(|| format!("invalid exclude pattern `{}`", pattern))?;
    }
    for pattern in &config.include {
        overrides
            .add(pattern)
            .with_context(|| format!("invalid include pattern `{}`", pattern))?;
    }
    builder.overrides(overrides.build().context("failed to build overrides")?);

    for entry in builder.build() {
        let entry = entry.context("error reading directory entry")?;

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let Some(language) = Language::from_path(path) else {
            continue;
        };

        files.push(DiscoveredFile {
            path: path.to_path_buf(),
            language,
        });
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}
