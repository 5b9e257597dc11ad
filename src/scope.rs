//! Collecting the free identifiers a declaration refers to.
//!
//! A free identifier is any name used inside a declaration's span that is not
//! bound by the declaration itself: not its own name, not a parameter, type
//! parameter or property name, not a keyword and not a built-in type.
//! Binding positions other than those (destructuring patterns, locals in
//! function bodies, JSX attribute names) are still reported.

use std::collections::{BTreeSet, HashSet};

use tree_sitter::{Node, Tree};

use crate::model::SourcePosition;
use crate::parser::{kind_of, node_text, walk_preorder, SyntaxKind};

/// Type names that never resolve to a user declaration.
pub const BUILTIN_TYPES: &[&str] = &[
    "string",
    "number",
    "boolean",
    "void",
    "null",
    "undefined",
    "object",
    "symbol",
    "bigint",
    "any",
    "unknown",
    "never",
    "Promise",
    "Array",
    "Map",
    "Set",
];

/// Words tree-sitter may surface as plain identifiers.
pub const RESERVED_WORDS: &[&str] = &[
    "this",
    "constructor",
    "class",
    "interface",
    "type",
    "export",
    "import",
    "return",
    "async",
    "await",
];

#[derive(Debug, Clone, Default)]
pub struct DependencyCollector {
    /// Additional names treated like built-ins (globals such as `console`).
    extra_builtins: HashSet<String>,
}

impl DependencyCollector {
    pub fn new(extra_builtins: impl IntoIterator<Item = String>) -> Self {
        Self {
            extra_builtins: extra_builtins.into_iter().collect(),
        }
    }

    fn is_builtin(&self, name: &str) -> bool {
        BUILTIN_TYPES.contains(&name) || self.extra_builtins.contains(name)
    }

    /// Free identifiers referenced within `position`.
    ///
    /// `own_name` is the name of the declaration spanning `position`; it is
    /// never reported as its own dependency.
    pub fn collect(
        &self,
        tree: &Tree,
        source: &str,
        position: &SourcePosition,
        own_name: &str,
    ) -> BTreeSet<String> {
        let root = tree.root_node();
        let type_params = type_parameters_in_scope(root, position, source);

        let mut found = BTreeSet::new();
        walk_preorder(root, |node| {
            if !position.overlaps(node.start_byte(), node.end_byte()) {
                return false;
            }
            match kind_of(node) {
                SyntaxKind::TypeIdentifier => {
                    let text = node_text(node, source);
                    if !self.is_builtin(text) && text != own_name && !type_params.contains(text) {
                        found.insert(text.to_string());
                    }
                }
                SyntaxKind::Identifier => {
                    let bound = node.parent().is_some_and(|p| {
                        kind_of(p).binds_identifier_within(p.parent().map(kind_of))
                    });
                    let text = node_text(node, source);
                    if !bound
                        && text != own_name
                        && !type_params.contains(text)
                        && !RESERVED_WORDS.contains(&text)
                        && !self.is_builtin(text)
                    {
                        found.insert(text.to_string());
                    }
                }
                _ => {}
            }
            true
        });
        found
    }
}

/// Type parameters visible inside the declaration spanning `position`: the
/// ones it declares itself plus those of every enclosing generic.
fn type_parameters_in_scope(
    root: Node,
    position: &SourcePosition,
    source: &str,
) -> HashSet<String> {
    let mut names = HashSet::new();
    let Some(declaration) =
        root.descendant_for_byte_range(position.start.offset, position.end.offset)
    else {
        return names;
    };

    walk_preorder(declaration, |n| {
        if kind_of(n) == SyntaxKind::TypeParameter {
            if let Some(name) = n.child_by_field_name("name") {
                names.insert(node_text(name, source).to_string());
            }
        }
        true
    });

    let mut ancestor = declaration.parent();
    while let Some(node) = ancestor {
        if let Some(params) = node.child_by_field_name("type_parameters") {
            let mut cursor = params.walk();
            for param in params.children(&mut cursor) {
                if kind_of(param) != SyntaxKind::TypeParameter {
                    continue;
                }
                if let Some(name) = param.child_by_field_name("name") {
                    names.insert(node_text(name, source).to_string());
                }
            }
        }
        ancestor = node.parent();
    }
    names
}

/// Free identifiers of the declaration `own_name` spanning `position`, with
/// the default built-in list.
pub fn find_chunk_dependencies(
    tree: &Tree,
    source: &str,
    position: &SourcePosition,
    own_name: &str,
) -> BTreeSet<String> {
    DependencyCollector::default().collect(tree, source, position, own_name)
}
