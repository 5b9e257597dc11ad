//! Locating the declaration that defines a name inside one file.

use tree_sitter::Node;

use crate::model::{DeclarationKind, DeclarationSummary, SourcePosition};
use crate::parser::{kind_of, node_text, walk_preorder, SourceFile, SyntaxKind};

/// A declaration node matched by name.
#[derive(Debug, Clone, Copy)]
pub struct Declaration<'t> {
    /// The span to extract: the enclosing `export_statement` when exported,
    /// the declaration itself otherwise.
    pub outer: Node<'t>,
    /// The declaration node proper.
    pub node: Node<'t>,
    pub kind: DeclarationKind,
    pub exported: bool,
}

impl<'t> Declaration<'t> {
    fn new(node: Node<'t>, kind: DeclarationKind) -> Self {
        let export = node
            .parent()
            .filter(|p| kind_of(*p) == SyntaxKind::ExportStatement);
        Declaration {
            outer: export.unwrap_or(node),
            node,
            kind,
            exported: export.is_some(),
        }
    }

    pub fn position(&self) -> SourcePosition {
        SourcePosition::of_node(self.outer)
    }
}

/// What `export default` refers to in a module.
#[derive(Debug, Clone, Copy)]
pub enum DefaultExport<'t> {
    /// `export default class Foo {}`, `export default function () {}`, or an
    /// arbitrary expression. The span is the whole export statement.
    Inline(Declaration<'t>),
    /// `export default Foo;`: the declaration is looked up by name.
    Alias(&'t str),
}

/// Whether `node` declares `name`, and as what.
fn declares<'t>(node: Node<'t>, source: &str, name: &str) -> Option<DeclarationKind> {
    let kind = kind_of(node);
    if let Some(decl_kind) = kind.named_declaration() {
        let declared = node.child_by_field_name("name")?;
        return (node_text(declared, source) == name).then_some(decl_kind);
    }
    if kind.is_variable_statement() {
        let mut cursor = node.walk();
        let matched = node.children(&mut cursor).any(|child| {
            kind_of(child) == SyntaxKind::VariableDeclarator
                && child
                    .child_by_field_name("name")
                    .is_some_and(|n| node_text(n, source) == name)
        });
        return matched.then_some(DeclarationKind::Variable);
    }
    None
}

/// Find the first declaration of `name` in pre-order over the whole tree.
///
/// Names are compared exactly. When a file declares the same name twice, the
/// first occurrence wins.
pub fn find_declaration_in<'t>(
    root: Node<'t>,
    source: &str,
    name: &str,
) -> Option<Declaration<'t>> {
    let mut found = None;
    walk_preorder(root, |node| {
        if found.is_some() {
            return false;
        }
        if let Some(kind) = declares(node, source, name) {
            found = Some(Declaration::new(node, kind));
            return false;
        }
        true
    });
    found
}

pub fn find_declaration<'t>(file: &'t SourceFile, name: &str) -> Option<Declaration<'t>> {
    find_declaration_in(file.root(), &file.text, name)
}

/// Span of the declaration of `name` in `file`, including its `export` keyword.
pub fn find_definition_in_file(file: &SourceFile, name: &str) -> Option<SourcePosition> {
    find_declaration(file, name).map(|d| d.position())
}

/// The module's default export, if it has one.
pub fn find_default_export(file: &SourceFile) -> Option<DefaultExport<'_>> {
    let root = file.root();
    let mut cursor = root.walk();
    let statements: Vec<Node> = root.children(&mut cursor).collect();

    for statement in statements {
        if kind_of(statement) != SyntaxKind::ExportStatement {
            continue;
        }
        let mut inner = statement.walk();
        let is_default = statement
            .children(&mut inner)
            .any(|c| kind_of(c) == SyntaxKind::Default);
        if !is_default {
            continue;
        }

        if let Some(declaration) = statement.child_by_field_name("declaration") {
            let kind = kind_of(declaration)
                .named_declaration()
                .unwrap_or(DeclarationKind::Variable);
            return Some(DefaultExport::Inline(Declaration::new(declaration, kind)));
        }
        if let Some(value) = statement.child_by_field_name("value") {
            if kind_of(value) == SyntaxKind::Identifier {
                return Some(DefaultExport::Alias(file.node_text(value)));
            }
            let kind = match value.kind() {
                "class" => DeclarationKind::Class,
                "function_expression" | "arrow_function" | "function" => DeclarationKind::Function,
                _ => DeclarationKind::Variable,
            };
            return Some(DefaultExport::Inline(Declaration {
                outer: statement,
                node: value,
                kind,
                exported: true,
            }));
        }
    }
    None
}

/// Every declaration at module scope, in document order.
pub fn module_declarations(file: &SourceFile) -> Vec<DeclarationSummary> {
    let mut summaries = Vec::new();
    let root = file.root();
    let mut cursor = root.walk();

    for statement in root.children(&mut cursor) {
        let (node, exported) = match kind_of(statement) {
            SyntaxKind::ExportStatement => match statement.child_by_field_name("declaration") {
                Some(declaration) => (declaration, true),
                None => continue,
            },
            _ => (statement, false),
        };
        let position = SourcePosition::of_node(statement);
        let kind = kind_of(node);

        if let Some(decl_kind) = kind.named_declaration() {
            if let Some(name) = node.child_by_field_name("name") {
                summaries.push(DeclarationSummary {
                    name: file.node_text(name).to_string(),
                    kind: decl_kind,
                    exported,
                    position,
                });
            }
        } else if kind.is_variable_statement() {
            let mut inner = node.walk();
            for declarator in node.children(&mut inner) {
                if kind_of(declarator) != SyntaxKind::VariableDeclarator {
                    continue;
                }
                // Destructuring patterns bind several names; only plain names are listed.
                let Some(name) = declarator
                    .child_by_field_name("name")
                    .filter(|n| kind_of(*n) == SyntaxKind::Identifier)
                else {
                    continue;
                };
                summaries.push(DeclarationSummary {
                    name: file.node_text(name).to_string(),
                    kind: DeclarationKind::Variable,
                    exported,
                    position,
                });
            }
        }
    }

    summaries
}
