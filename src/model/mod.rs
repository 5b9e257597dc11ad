use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tree_sitter::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    TypeScript,
    Tsx,
    JavaScript,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::TypeScript => "typescript",
            Language::Tsx => "tsx",
            Language::JavaScript => "javascript",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "ts" | "mts" | "cts" => Some(Language::TypeScript),
            "tsx" => Some(Language::Tsx),
            "js" | "jsx" | "mjs" | "cjs" => Some(Language::JavaScript),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of a module-scope declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Class,
    Interface,
    TypeAlias,
    Enum,
    Function,
    Variable,
}

impl DeclarationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Class => "class",
            DeclarationKind::Interface => "interface",
            DeclarationKind::TypeAlias => "type_alias",
            DeclarationKind::Enum => "enum",
            DeclarationKind::Function => "function",
            DeclarationKind::Variable => "variable",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A point in a source file. Line and column are 0-based, `offset` is a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

/// A span in a source file. `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourcePosition {
    pub start: Location,
    pub end: Location,
}

impl SourcePosition {
    pub fn of_node(node: Node) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        SourcePosition {
            start: Location {
                line: start.row,
                column: start.column,
                offset: node.start_byte(),
            },
            end: Location {
                line: end.row,
                column: end.column,
                offset: node.end_byte(),
            },
        }
    }

    /// Whether `[start, end]` of a node touches this span.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        !(end < self.start.offset || start > self.end.offset)
    }
}

/// An occurrence of a name used to seed a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IdentifierUsage {
    pub name: String,
    pub position: Option<SourcePosition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<String>,
}

impl IdentifierUsage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: None,
            context: Vec::new(),
        }
    }
}

/// Where a declaration lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinitionSite {
    pub file_path: PathBuf,
    pub position: SourcePosition,
}

/// Verbatim text of a declaration plus its span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeChunk {
    pub source_code: String,
    pub position: SourcePosition,
}

/// A declaration found at module scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclarationSummary {
    pub name: String,
    pub kind: DeclarationKind,
    pub exported: bool,
    pub position: SourcePosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    /// The declaration was found and its dependencies expanded.
    Resolved,
    /// Referenced, but no declaration could be located.
    Unresolved,
    /// Back-reference to a declaration that is still being expanded upstream.
    Cycle,
}

impl NodeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeStatus::Resolved => "resolved",
            NodeStatus::Unresolved => "unresolved",
            NodeStatus::Cycle => "cycle",
        }
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One node of a dependency tree.
///
/// Resolved nodes carry the declaration text, its span and its file. The
/// `unresolved` and `cycle` variants are leaves that only name the identifier
/// (cycle markers also name the file whose lookup was in flight).
/// Children are shared through the analyzer's memoization cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyNode {
    pub identifier: String,
    pub status: NodeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<SourcePosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
    pub dependencies: BTreeMap<String, Rc<DependencyNode>>,
}

impl DependencyNode {
    pub fn resolved(
        identifier: impl Into<String>,
        chunk: CodeChunk,
        file_path: PathBuf,
        dependencies: BTreeMap<String, Rc<DependencyNode>>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            status: NodeStatus::Resolved,
            source_code: Some(chunk.source_code),
            position: Some(chunk.position),
            file_path: Some(file_path),
            dependencies,
        }
    }

    pub fn unresolved(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            status: NodeStatus::Unresolved,
            source_code: None,
            position: None,
            file_path: None,
            dependencies: BTreeMap::new(),
        }
    }

    pub fn cycle(identifier: impl Into<String>, file_path: PathBuf) -> Self {
        Self {
            identifier: identifier.into(),
            status: NodeStatus::Cycle,
            source_code: None,
            position: None,
            file_path: Some(file_path),
            dependencies: BTreeMap::new(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.status == NodeStatus::Resolved
    }

    pub fn get(&self, identifier: &str) -> Option<&DependencyNode> {
        self.dependencies.get(identifier).map(|n| n.as_ref())
    }

    /// Every distinct resolved declaration reachable from this node, as
    /// `(file_path, identifier)` pairs, including the node itself.
    pub fn closure(&self) -> Vec<(PathBuf, String)> {
        let mut seen = BTreeSet::new();
        let mut stack: Vec<&DependencyNode> = vec![self];
        while let Some(node) = stack.pop() {
            if let (NodeStatus::Resolved, Some(path)) = (node.status, &node.file_path) {
                if !seen.insert((path.clone(), node.identifier.clone())) {
                    continue;
                }
            }
            stack.extend(node.dependencies.values().map(|n| n.as_ref()));
        }
        seen.into_iter().collect()
    }

    /// Names anywhere below this node that could not be resolved.
    pub fn unresolved_names(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        let mut stack: Vec<&DependencyNode> = vec![self];
        while let Some(node) = stack.pop() {
            if node.status == NodeStatus::Unresolved {
                names.insert(node.identifier.clone());
            }
            stack.extend(node.dependencies.values().map(|n| n.as_ref()));
        }
        names
    }
}
