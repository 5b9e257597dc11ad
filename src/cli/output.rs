use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::OutputFormat;
use crate::imports::ModuleLinks;
use crate::model::{
    CodeChunk, DeclarationSummary, DefinitionSite, DependencyNode, NodeStatus, SourcePosition,
};

/// Format any serializable value as JSON.
pub fn format_json<T: Serialize>(value: &T, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Compact => serde_json::to_string(value).unwrap_or_default(),
        OutputFormat::Json | OutputFormat::Text => {
            serde_json::to_string_pretty(value).unwrap_or_default()
        }
    }
}

/// `path` relative to `root` when it lives under it.
pub fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

/// `file:line:column`, 1-based as editors expect.
fn location(path: &Path, root: &Path, position: &SourcePosition) -> String {
    format!(
        "{}:{}:{}",
        display_path(path, root),
        position.start.line + 1,
        position.start.column + 1
    )
}

/// Format a dependency tree.
///
/// Text output draws the tree with box characters. A declaration reached a
/// second time is printed without its children.
pub fn format_dependency_tree(
    node: &DependencyNode,
    root: &Path,
    format: &OutputFormat,
    show_source: bool,
) -> String {
    match format {
        OutputFormat::Text => render_tree(node, root, show_source),
        OutputFormat::Json | OutputFormat::Compact => format_json(node, format),
    }
}

fn render_tree(tree: &DependencyNode, root: &Path, show_source: bool) -> String {
    let mut output = String::new();
    let mut expanded: HashSet<(PathBuf, String)> = HashSet::new();
    // (node, text before the node's line, prefix for its children's lines)
    let mut stack: Vec<(&DependencyNode, String, String)> =
        vec![(tree, String::new(), String::new())];

    while let Some((node, lead, prefix)) = stack.pop() {
        output.push_str(&lead);
        output.push_str(&describe_node(node, root));

        let first_visit = match &node.file_path {
            Some(path) if node.is_resolved() => {
                expanded.insert((path.clone(), node.identifier.clone()))
            }
            _ => true,
        };
        if !first_visit && !node.dependencies.is_empty() {
            output.push_str(" (see above)");
        }
        output.push('\n');
        if !first_visit {
            continue;
        }

        if show_source {
            if let Some(source) = &node.source_code {
                let bar = if node.dependencies.is_empty() { "  " } else { "│ " };
                for line in source.lines() {
                    output.push_str(&format!("{}{}  {}\n", prefix, bar, line));
                }
            }
        }

        let count = node.dependencies.len();
        for (i, child) in node.dependencies.values().enumerate().rev() {
            let last = i + 1 == count;
            let lead = format!("{}{}", prefix, if last { "└── " } else { "├── " });
            let next = format!("{}{}", prefix, if last { "    " } else { "│   " });
            stack.push((child.as_ref(), lead, next));
        }
    }

    output
}

fn describe_node(node: &DependencyNode, root: &Path) -> String {
    match (node.status, &node.file_path, &node.position) {
        (NodeStatus::Resolved, Some(path), Some(position)) => {
            format!("{}  {}", node.identifier, location(path, root, position))
        }
        (NodeStatus::Cycle, Some(path), _) => {
            format!("{} (cycle, {})", node.identifier, display_path(path, root))
        }
        (status, _, _) => format!("{} ({})", node.identifier, status),
    }
}

/// Format the location of a declaration.
pub fn format_definition(site: &DefinitionSite, root: &Path, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Text => location(&site.file_path, root, &site.position),
        OutputFormat::Json | OutputFormat::Compact => format_json(site, format),
    }
}

/// Format an extracted declaration.
pub fn format_chunk(chunk: &CodeChunk, file: &Path, root: &Path, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!(
            "// {}:{}-{}\n{}",
            display_path(file, root),
            chunk.position.start.line + 1,
            chunk.position.end.line + 1,
            chunk.source_code
        ),
        OutputFormat::Json | OutputFormat::Compact => {
            #[derive(Serialize)]
            struct ChunkOutput<'a> {
                file_path: &'a Path,
                #[serde(flatten)]
                chunk: &'a CodeChunk,
            }
            format_json(
                &ChunkOutput {
                    file_path: file,
                    chunk,
                },
                format,
            )
        }
    }
}

/// Format the declarations and re-exports of one file.
pub fn format_exports(
    file: &Path,
    root: &Path,
    declarations: &[DeclarationSummary],
    links: &ModuleLinks,
    format: &OutputFormat,
) -> String {
    match format {
        OutputFormat::Json | OutputFormat::Compact => {
            #[derive(Serialize)]
            struct ExportsResult<'a> {
                command: &'static str,
                file: String,
                declarations: &'a [DeclarationSummary],
                reexports: &'a [crate::imports::ReExport],
                wildcard_reexports: &'a [String],
            }
            format_json(
                &ExportsResult {
                    command: "exports",
                    file: display_path(file, root),
                    declarations,
                    reexports: &links.reexports,
                    wildcard_reexports: &links.wildcard_reexports,
                },
                format,
            )
        }
        OutputFormat::Text => {
            let mut output = format!("{}\n", display_path(file, root));
            for d in declarations {
                output.push_str(&format!(
                    "  {:<11} {:<32} line {}{}\n",
                    d.kind,
                    d.name,
                    d.position.start.line + 1,
                    if d.exported { "  exported" } else { "" },
                ));
            }
            for r in &links.reexports {
                let name = if r.local_name == r.exported_name {
                    r.exported_name.clone()
                } else {
                    format!("{} as {}", r.local_name, r.exported_name)
                };
                match &r.source {
                    Some(source) => {
                        output.push_str(&format!("  {:<11} {} from '{}'\n", "re-export", name, source))
                    }
                    None => output.push_str(&format!("  {:<11} {}\n", "re-export", name)),
                }
            }
            for source in &links.wildcard_reexports {
                output.push_str(&format!("  {:<11} * from '{}'\n", "re-export", source));
            }
            output
        }
    }
}
