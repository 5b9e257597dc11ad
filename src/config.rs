use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::resolver::typescript::DEFAULT_EXTENSIONS;

/// Analyzer settings, read from `declgraph.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Extensions probed when resolving extensionless specifiers, in priority order.
    pub extensions: Vec<String>,
    /// Names never reported as dependencies, on top of the built-in types.
    pub extra_builtins: Vec<String>,
    /// Follow `export { x } from` and `export * from` chains to the declaring file.
    pub follow_reexports: bool,
    /// Maximum number of re-export hops followed for one lookup.
    pub max_reexport_depth: usize,
    /// Resolve bare specifiers through `node_modules`.
    pub node_modules: bool,
    pub discovery: DiscoverySection,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            extra_builtins: Vec::new(),
            follow_reexports: true,
            max_reexport_depth: 8,
            node_modules: true,
            discovery: DiscoverySection::default(),
        }
    }
}

/// The `[discovery]` section, used by project scans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoverySection {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

/// Default config file names, searched in order.
const CONFIG_FILENAMES: &[&str] = &["declgraph.toml", ".declgraph/config.toml"];

/// Find the config file for a project.
///
/// If `config_override` is provided, use that path directly.
/// Otherwise, search for config files in the project root.
pub fn find_config_path(project_root: &Path, config_override: Option<&Path>) -> Option<PathBuf> {
    if let Some(override_path) = config_override {
        return override_path
            .exists()
            .then(|| override_path.to_path_buf());
    }

    CONFIG_FILENAMES
        .iter()
        .map(|name| project_root.join(name))
        .find(|path| path.exists())
}

/// Load and parse a config from a TOML file.
pub fn load_config(path: &Path) -> Result<AnalyzerConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Parse a config from a TOML string.
pub fn parse_config(toml_str: &str) -> Result<AnalyzerConfig> {
    let mut config: AnalyzerConfig = toml::from_str(toml_str)?;
    for ext in &mut config.extensions {
        if !ext.starts_with('.') {
            ext.insert(0, '.');
        }
    }
    if config.extensions.is_empty() {
        anyhow::bail!("`extensions` must list at least one extension");
    }
    Ok(config)
}

/// Resolve the effective config for a project.
///
/// An explicit `config_override` must exist. Without one, a config file in
/// `project_root` is used when present, defaults otherwise.
pub fn resolve_config(project_root: &Path, config_override: Option<&Path>) -> Result<AnalyzerConfig> {
    match find_config_path(project_root, config_override) {
        Some(path) => load_config(&path),
        None => match config_override {
            Some(path) => anyhow::bail!("Config file not found: {}", path.display()),
            None => Ok(AnalyzerConfig::default()),
        },
    }
}
