use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, warn};

use super::output::{
    display_path, format_chunk, format_definition, format_dependency_tree, format_exports,
    format_json,
};
use super::OutputFormat;
use crate::analyzer::DependencyAnalyzer;
use crate::chunk::extract_code_chunk;
use crate::config::{resolve_config, AnalyzerConfig};
use crate::discovery::{discover_files, DiscoveryConfig};
use crate::imports::ModuleLinks;
use crate::locator::module_declarations;
use crate::model::{DeclarationKind, IdentifierUsage};
use crate::parser::SourceFile;
use crate::resolver::normalize_path;

/// Load the config for a project, relative paths resolved against `project_path`.
pub fn load_config(project_path: &Path, config_override: Option<&str>) -> Result<AnalyzerConfig> {
    let override_path = config_override.map(|p| project_path.join(p));
    resolve_config(project_path, override_path.as_deref())
}

/// Absolute, normalized path of an input file that must exist.
pub fn resolve_input(project_path: &Path, file: &str) -> Result<PathBuf> {
    let path = normalize_path(&project_path.join(file));
    if !path.is_file() {
        anyhow::bail!("File not found: {}", file);
    }
    Ok(path)
}

/// Run the `deps` command. `None` when the identifier cannot be resolved.
pub fn run_deps(
    project_path: &Path,
    config: &AnalyzerConfig,
    file: &str,
    identifier: &str,
    show_source: bool,
    format: &OutputFormat,
) -> Result<Option<String>> {
    let path = resolve_input(project_path, file)?;
    let mut analyzer = DependencyAnalyzer::new(config);
    let tree = analyzer.analyze_identifier_dependencies(&IdentifierUsage::new(identifier), &path);
    debug!("{} declarations memoized", analyzer.cache_len());

    Ok(tree.map(|node| format_dependency_tree(&node, project_path, format, show_source)))
}

/// Run the `definition` command.
pub fn run_definition(
    project_path: &Path,
    config: &AnalyzerConfig,
    file: &str,
    identifier: &str,
    format: &OutputFormat,
) -> Result<Option<String>> {
    let path = resolve_input(project_path, file)?;
    let analyzer = DependencyAnalyzer::new(config);
    let site = analyzer.find_identifier_definition(&IdentifierUsage::new(identifier), &path);

    Ok(site.map(|site| format_definition(&site, project_path, format)))
}

/// Run the `chunk` command.
pub fn run_chunk(
    project_path: &Path,
    file: &str,
    identifier: &str,
    format: &OutputFormat,
) -> Result<Option<String>> {
    let path = resolve_input(project_path, file)?;
    let source = SourceFile::load(&path).with_context(|| format!("Failed to parse {}", file))?;
    let chunk = extract_code_chunk(&source.tree, identifier, &path);

    Ok(chunk.map(|chunk| format_chunk(&chunk, &path, project_path, format)))
}

/// Run the `exports` command.
pub fn run_exports(project_path: &Path, file: &str, format: &OutputFormat) -> Result<String> {
    let path = resolve_input(project_path, file)?;
    let source = SourceFile::load(&path).with_context(|| format!("Failed to parse {}", file))?;
    let declarations = module_declarations(&source);
    let links = ModuleLinks::collect(&source);

    Ok(format_exports(
        &path,
        project_path,
        &declarations,
        &links,
        format,
    ))
}

#[derive(Serialize)]
struct ScanEntry {
    file: String,
    name: String,
    kind: DeclarationKind,
    line: usize,
    /// Distinct declarations in the closure, excluding the entry itself.
    dependencies: usize,
    unresolved: Vec<String>,
}

#[derive(Serialize)]
struct ScanResult {
    command: String,
    files: usize,
    declarations: usize,
    unanalyzed: usize,
    entries: Vec<ScanEntry>,
}

/// Run the `scan` command: analyze every exported declaration under `root`
/// with one shared analyzer.
pub fn run_scan(
    root: &Path,
    config: &AnalyzerConfig,
    discovery: &DiscoveryConfig,
    format: &OutputFormat,
) -> Result<String> {
    let files = discover_files(root, discovery)
        .with_context(|| format!("Failed to discover files in {}", root.display()))?;
    let mut analyzer = DependencyAnalyzer::new(config);
    let mut entries = Vec::new();
    let mut unanalyzed = 0;

    for file in &files {
        let source = match SourceFile::load(&file.path) {
            Ok(source) => source,
            Err(e) => {
                warn!("skipping {}", e);
                continue;
            }
        };

        for declaration in module_declarations(&source).into_iter().filter(|d| d.exported) {
            let usage = IdentifierUsage::new(declaration.name.as_str());
            let Some(node) = analyzer.analyze_identifier_dependencies(&usage, &file.path) else {
                debug!(
                    "no declaration found for {} in {}",
                    declaration.name,
                    file.path.display()
                );
                unanalyzed += 1;
                continue;
            };
            entries.push(ScanEntry {
                file: display_path(&file.path, root),
                name: declaration.name,
                kind: declaration.kind,
                line: declaration.position.start.line,
                dependencies: node.closure().len().saturating_sub(1),
                unresolved: node.unresolved_names().into_iter().collect(),
            });
        }
    }

    let result = ScanResult {
        command: "scan".to_string(),
        files: files.len(),
        declarations: entries.len(),
        unanalyzed,
        entries,
    };

    match format {
        OutputFormat::Json | OutputFormat::Compact => Ok(format_json(&result, format)),
        OutputFormat::Text => Ok(format_scan_text(&result)),
    }
}

fn format_scan_text(result: &ScanResult) -> String {
    let mut output = format!(
        "Scanned {} files: {} exported declarations\n",
        result.files, result.declarations
    );
    for entry in &result.entries {
        output.push_str(&format!(
            "  {}:{}  {} ({})  {} deps",
            entry.file,
            entry.line + 1,
            entry.name,
            entry.kind,
            entry.dependencies
        ));
        if !entry.unresolved.is_empty() {
            output.push_str(&format!(", unresolved: {}", entry.unresolved.join(", ")));
        }
        output.push('\n');
    }
    if result.unanalyzed > 0 {
        output.push_str(&format!(
            "{} declarations could not be analyzed\n",
            result.unanalyzed
        ));
    }
    output
}
