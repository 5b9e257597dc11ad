//! Import and re-export classification.
//!
//! One pass over a file's top-level statements classifies every binding an
//! `import` brings into scope (named, default or namespace) and every name an
//! `export ... from` forwards. Both the identifier resolver and re-export
//! following read from this single classification.

use serde::Serialize;
use tree_sitter::Node;

use crate::parser::{kind_of, string_literal_value, SourceFile, SyntaxKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    /// `import { a } from '...'` / `import { a as b } from '...'`
    Named,
    /// `import Foo from '...'`
    Default,
    /// `import * as ns from '...'`
    Namespace,
}

/// A name brought into a file's scope by an import statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportBinding {
    /// Name used inside the importing file.
    pub local_name: String,
    /// Name exported by the source module (`default` / `*` for default and namespace imports).
    pub imported_name: String,
    /// Module specifier with quotes stripped.
    pub source: String,
    pub kind: ImportKind,
    pub type_only: bool,
}

/// A name a file exports without declaring it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReExport {
    /// Name visible to importers of this file.
    pub exported_name: String,
    /// Name the binding has in `source`, or locally when `source` is `None`.
    pub local_name: String,
    /// `Some` for `export { a } from '...'`, `None` for `export { a }`.
    pub source: Option<String>,
}

/// Everything a file imports and forwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModuleLinks {
    pub imports: Vec<ImportBinding>,
    pub reexports: Vec<ReExport>,
    /// Sources of `export * from '...'`.
    pub wildcard_reexports: Vec<String>,
}

impl ModuleLinks {
    pub fn collect(file: &SourceFile) -> Self {
        let mut links = ModuleLinks::default();
        let root = file.root();
        let mut cursor = root.walk();
        for statement in root.children(&mut cursor) {
            match kind_of(statement) {
                SyntaxKind::ImportStatement => links.collect_import(file, statement),
                SyntaxKind::ExportStatement => links.collect_export(file, statement),
                _ => {}
            }
        }
        links
    }

    /// First import binding whose local name is exactly `name`.
    pub fn import_for(&self, name: &str) -> Option<&ImportBinding> {
        self.imports.iter().find(|b| b.local_name == name)
    }

    /// First non-wildcard re-export that exposes `name`.
    pub fn reexport_for(&self, name: &str) -> Option<&ReExport> {
        self.reexports.iter().find(|r| r.exported_name == name)
    }

    fn collect_import(&mut self, file: &SourceFile, node: Node) {
        let source = match node.child_by_field_name("source") {
            Some(n) => string_literal_value(n, &file.text),
            None => return,
        };
        let type_only = file.node_text(node).starts_with("import type ");

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if kind_of(child) == SyntaxKind::ImportClause {
                self.collect_import_clause(file, child, &source, type_only);
            }
        }
    }

    fn collect_import_clause(
        &mut self,
        file: &SourceFile,
        node: Node,
        source: &str,
        type_only: bool,
    ) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match kind_of(child) {
                SyntaxKind::Identifier => {
                    self.imports.push(ImportBinding {
                        local_name: file.node_text(child).to_string(),
                        imported_name: "default".to_string(),
                        source: source.to_string(),
                        kind: ImportKind::Default,
                        type_only,
                    });
                }
                SyntaxKind::NamespaceImport => {
                    let mut inner = child.walk();
                    let local = child
                        .children(&mut inner)
                        .find(|c| kind_of(*c) == SyntaxKind::Identifier);
                    if let Some(local) = local {
                        self.imports.push(ImportBinding {
                            local_name: file.node_text(local).to_string(),
                            imported_name: "*".to_string(),
                            source: source.to_string(),
                            kind: ImportKind::Namespace,
                            type_only,
                        });
                    }
                }
                SyntaxKind::NamedImports => {
                    let mut inner = child.walk();
                    for specifier in child.children(&mut inner) {
                        if kind_of(specifier) != SyntaxKind::ImportSpecifier {
                            continue;
                        }
                        let Some(name_node) = specifier.child_by_field_name("name") else {
                            continue;
                        };
                        let imported_name = string_literal_value(name_node, &file.text);
                        let local_name = specifier
                            .child_by_field_name("alias")
                            .map(|n| file.node_text(n).to_string())
                            .unwrap_or_else(|| imported_name.clone());
                        let inline_type = file.node_text(specifier).starts_with("type ");
                        self.imports.push(ImportBinding {
                            local_name,
                            imported_name,
                            source: source.to_string(),
                            kind: ImportKind::Named,
                            type_only: type_only || inline_type,
                        });
                    }
                }
                _ => {}
            }
        }
    }

    fn collect_export(&mut self, file: &SourceFile, node: Node) {
        let source = node
            .child_by_field_name("source")
            .map(|n| string_literal_value(n, &file.text));

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match kind_of(child) {
                SyntaxKind::ExportClause => {
                    let mut inner = child.walk();
                    for specifier in child.children(&mut inner) {
                        if kind_of(specifier) != SyntaxKind::ExportSpecifier {
                            continue;
                        }
                        let Some(name_node) = specifier.child_by_field_name("name") else {
                            continue;
                        };
                        let local_name = string_literal_value(name_node, &file.text);
                        let exported_name = specifier
                            .child_by_field_name("alias")
                            .map(|n| string_literal_value(n, &file.text))
                            .unwrap_or_else(|| local_name.clone());
                        self.reexports.push(ReExport {
                            exported_name,
                            local_name,
                            source: source.clone(),
                        });
                    }
                }
                SyntaxKind::Star => {
                    if let Some(src) = &source {
                        self.wildcard_reexports.push(src.clone());
                    }
                }
                _ => {}
            }
        }
    }
}

/// The import that brings `name` into scope in `file`, if any.
///
/// `None` means the name is either declared in this file or not resolvable
/// through imports at all.
pub fn find_import_for_identifier(file: &SourceFile, name: &str) -> Option<ImportBinding> {
    ModuleLinks::collect(file).import_for(name).cloned()
}
