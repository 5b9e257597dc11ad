use std::path::{Path, PathBuf};

use tree_sitter::{Node, Parser, Tree};

use crate::error::{AnalyzerError, Result};
use crate::model::Language;

pub mod kinds;

pub use kinds::SyntaxKind;

/// A source file read from disk together with its concrete syntax tree.
pub struct SourceFile {
    pub path: PathBuf,
    pub language: Language,
    pub text: String,
    pub tree: Tree,
}

impl SourceFile {
    /// Read and parse a file. The grammar is picked from the extension.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| AnalyzerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, text)
    }

    /// Parse already loaded text as if it came from `path`.
    pub fn parse(path: &Path, text: String) -> Result<Self> {
        let language = Language::from_path(path)
            .ok_or_else(|| AnalyzerError::UnsupportedFile(path.to_path_buf()))?;
        let mut parser = create_parser(language)?;
        let tree = parser
            .parse(&text, None)
            .ok_or_else(|| AnalyzerError::Parse(path.to_path_buf()))?;
        Ok(SourceFile {
            path: path.to_path_buf(),
            language,
            text,
            tree,
        })
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn node_text(&self, node: Node) -> &str {
        node_text(node, &self.text)
    }
}

// Parsers are created per call since tree_sitter::Parser is not Sync.
fn create_parser(language: Language) -> Result<Parser> {
    let mut parser = Parser::new();
    let grammar: tree_sitter::Language = match language {
        Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        Language::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
    };
    parser
        .set_language(&grammar)
        .map_err(|e| AnalyzerError::Language(e.to_string()))?;
    Ok(parser)
}

/// Text of `node` in `source`, or `""` when the node's byte range does not
/// fall on character boundaries of `source` (e.g. `source` is not the text the
/// tree was parsed from).
pub fn node_text<'s>(node: Node, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or("")
}

pub fn kind_of(node: Node) -> SyntaxKind {
    SyntaxKind::of(node.kind())
}

/// Strip the quotes from a string literal node's text.
pub fn string_literal_value(node: Node, source: &str) -> String {
    node_text(node, source)
        .trim_matches(|c| c == '\'' || c == '"' || c == '`')
        .to_string()
}

/// Pre-order depth-first traversal driven by an explicit stack.
///
/// `visit` returns whether the children of the visited node should be walked.
pub fn walk_preorder<'t>(root: Node<'t>, mut visit: impl FnMut(Node<'t>) -> bool) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if !visit(node) {
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
}
