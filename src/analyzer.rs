//! The dependency graph builder.
//!
//! Starting from a name used in some file, the analyzer finds the declaration
//! the name refers to, collects the free identifiers of that declaration and
//! resolves each of them again, relative to the file the declaration lives in.
//! Results are memoized per `(file, name)` so shared dependencies are expanded
//! once and handed out as the same `Rc`.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::debug;
use tree_sitter::Tree;

use crate::chunk::{self, chunk_of};
use crate::config::AnalyzerConfig;
use crate::imports::{ImportBinding, ImportKind, ModuleLinks};
use crate::locator::{find_declaration, find_default_export, DefaultExport};
use crate::model::{CodeChunk, DefinitionSite, DependencyNode, IdentifierUsage, SourcePosition};
use crate::parser::SourceFile;
use crate::resolver::typescript::TypeScriptResolver;
use crate::resolver::Resolver;
use crate::scope::DependencyCollector;

/// A declaration found for a lookup, with the file it was found in.
struct Located {
    file: SourceFile,
    /// Name the declaration carries in its own file. Differs from the looked
    /// up name for aliased imports and default exports.
    declared_name: String,
    chunk: CodeChunk,
}

/// What a module's `export default` resolves to, detached from the tree.
enum DefaultTarget {
    Inline {
        declared_name: String,
        chunk: Option<CodeChunk>,
    },
    Alias(String),
}

pub struct DependencyAnalyzer {
    resolver: Box<dyn Resolver>,
    collector: DependencyCollector,
    follow_reexports: bool,
    max_reexport_depth: usize,
    cache: HashMap<String, Rc<DependencyNode>>,
    in_flight: HashSet<String>,
}

impl Default for DependencyAnalyzer {
    fn default() -> Self {
        Self::new(&AnalyzerConfig::default())
    }
}

impl DependencyAnalyzer {
    pub fn new(config: &AnalyzerConfig) -> Self {
        let resolver = TypeScriptResolver::new(config.extensions.clone(), config.node_modules);
        Self::with_resolver(config, Box::new(resolver))
    }

    /// Build an analyzer around a custom module resolver.
    pub fn with_resolver(config: &AnalyzerConfig, resolver: Box<dyn Resolver>) -> Self {
        DependencyAnalyzer {
            resolver,
            collector: DependencyCollector::new(config.extra_builtins.iter().cloned()),
            follow_reexports: config.follow_reexports,
            max_reexport_depth: config.max_reexport_depth,
            cache: HashMap::new(),
            in_flight: HashSet::new(),
        }
    }

    /// Where the name in `usage` is declared, as seen from `from_file`.
    pub fn find_identifier_definition(
        &self,
        usage: &IdentifierUsage,
        from_file: &Path,
    ) -> Option<DefinitionSite> {
        let located = self.locate(&usage.name, from_file)?;
        Some(DefinitionSite {
            file_path: located.file.path,
            position: located.chunk.position,
        })
    }

    /// See [`chunk::extract_code_chunk`].
    pub fn extract_code_chunk(
        &self,
        tree: &Tree,
        identifier: &str,
        file_path: &Path,
    ) -> Option<CodeChunk> {
        chunk::extract_code_chunk(tree, identifier, file_path)
    }

    /// Free identifiers of the declaration `own_name` spanning `position`,
    /// honoring the configured extra built-ins.
    pub fn find_chunk_dependencies(
        &self,
        tree: &Tree,
        source: &str,
        position: &SourcePosition,
        own_name: &str,
    ) -> BTreeSet<String> {
        self.collector.collect(tree, source, position, own_name)
    }

    /// The full dependency tree of the declaration `usage` refers to.
    ///
    /// Returns `None` when no declaration can be found for the name. Within
    /// the tree, names that cannot be resolved become `unresolved` leaves and
    /// references back to a declaration still being expanded become `cycle`
    /// leaves.
    pub fn analyze_identifier_dependencies(
        &mut self,
        usage: &IdentifierUsage,
        from_file: &Path,
    ) -> Option<Rc<DependencyNode>> {
        self.analyze(&usage.name, from_file)
    }

    /// Number of memoized nodes.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Forget memoized results, e.g. after files changed on disk.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    fn analyze(&mut self, name: &str, from_file: &Path) -> Option<Rc<DependencyNode>> {
        let key = cache_key(from_file, name);
        if let Some(node) = self.cache.get(&key) {
            return Some(Rc::clone(node));
        }
        if self.in_flight.contains(&key) {
            debug!("{} is already being expanded", key);
            return None;
        }

        self.in_flight.insert(key.clone());
        let Some(located) = self.locate(name, from_file) else {
            debug!("no definition found for {}", key);
            self.in_flight.remove(&key);
            return None;
        };

        let free = self.collector.collect(
            &located.file.tree,
            &located.file.text,
            &located.chunk.position,
            &located.declared_name,
        );

        let mut dependencies = BTreeMap::new();
        for dependency in free {
            if dependency == name || dependency == located.declared_name {
                continue;
            }
            let child = match self.analyze(&dependency, &located.file.path) {
                Some(node) => node,
                None if self
                    .in_flight
                    .contains(&cache_key(&located.file.path, &dependency)) =>
                {
                    Rc::new(DependencyNode::cycle(
                        dependency.clone(),
                        located.file.path.clone(),
                    ))
                }
                None => Rc::new(DependencyNode::unresolved(dependency.clone())),
            };
            dependencies.insert(dependency, child);
        }

        let Located { file, chunk, .. } = located;
        let node = Rc::new(DependencyNode::resolved(name, chunk, file.path, dependencies));
        self.cache.insert(key.clone(), Rc::clone(&node));
        self.in_flight.remove(&key);
        Some(node)
    }

    /// Find the declaration `name` refers to inside `from_file`: through the
    /// file's imports first, then among its own declarations.
    fn locate(&self, name: &str, from_file: &Path) -> Option<Located> {
        let file = load_source(from_file)?;
        self.locate_local(file, name, 0, &mut HashSet::new())
    }

    fn locate_local(
        &self,
        file: SourceFile,
        name: &str,
        depth: usize,
        visited: &mut HashSet<PathBuf>,
    ) -> Option<Located> {
        let links = ModuleLinks::collect(&file);
        if let Some(binding) = links.import_for(name) {
            return self.follow_import(binding, &file.path, depth, visited);
        }
        located_in(file, name)
    }

    fn follow_import(
        &self,
        binding: &ImportBinding,
        from_file: &Path,
        depth: usize,
        visited: &mut HashSet<PathBuf>,
    ) -> Option<Located> {
        let Some(target) = self.resolver.resolve_import_path(&binding.source, from_file) else {
            debug!(
                "cannot resolve '{}' imported from {}",
                binding.source,
                from_file.display()
            );
            return None;
        };
        match binding.kind {
            ImportKind::Named | ImportKind::Default => {
                self.locate_export(&binding.imported_name, &target, depth, visited)
            }
            ImportKind::Namespace => {
                debug!(
                    "{} is a namespace import of '{}', not a declaration",
                    binding.local_name, binding.source
                );
                None
            }
        }
    }

    /// Find the declaration `path` exports as `name`, following re-exports.
    fn locate_export(
        &self,
        name: &str,
        path: &Path,
        depth: usize,
        visited: &mut HashSet<PathBuf>,
    ) -> Option<Located> {
        if !visited.insert(path.to_path_buf()) {
            debug!("re-export loop through {}", path.display());
            return None;
        }
        let file = load_source(path)?;

        if name == "default" {
            match default_target(&file) {
                Some(DefaultTarget::Inline {
                    declared_name,
                    chunk,
                }) => {
                    return chunk.map(|chunk| Located {
                        file,
                        declared_name,
                        chunk,
                    });
                }
                Some(DefaultTarget::Alias(local)) => {
                    return self.locate_local(file, &local, depth + 1, visited);
                }
                None => {}
            }
        } else if find_declaration(&file, name).is_some() {
            return located_in(file, name);
        }

        if !self.follow_reexports {
            return None;
        }
        if depth >= self.max_reexport_depth {
            debug!(
                "giving up on {} after {} re-export hops at {}",
                name,
                depth,
                path.display()
            );
            return None;
        }

        let links = ModuleLinks::collect(&file);
        if let Some(reexport) = links.reexport_for(name) {
            return match &reexport.source {
                Some(source) => {
                    let target = self.resolver.resolve_import_path(source, path)?;
                    self.locate_export(&reexport.local_name, &target, depth + 1, visited)
                }
                None => {
                    let local = reexport.local_name.clone();
                    self.locate_local(file, &local, depth + 1, visited)
                }
            };
        }

        // `export *` never forwards the default export.
        if name == "default" {
            return None;
        }
        for source in &links.wildcard_reexports {
            let Some(target) = self.resolver.resolve_import_path(source, path) else {
                continue;
            };
            if let Some(found) = self.locate_export(name, &target, depth + 1, visited) {
                return Some(found);
            }
        }
        None
    }
}

fn cache_key(file: &Path, name: &str) -> String {
    format!("{}:{}", file.display(), name)
}

fn load_source(path: &Path) -> Option<SourceFile> {
    match SourceFile::load(path) {
        Ok(file) => Some(file),
        Err(e) => {
            debug!("{}", e);
            None
        }
    }
}

fn located_in(file: SourceFile, name: &str) -> Option<Located> {
    let chunk = {
        let declaration = find_declaration(&file, name)?;
        chunk_of(&declaration, &file.text)?
    };
    Some(Located {
        file,
        declared_name: name.to_string(),
        chunk,
    })
}

fn default_target(file: &SourceFile) -> Option<DefaultTarget> {
    let target = match find_default_export(file)? {
        DefaultExport::Inline(declaration) => DefaultTarget::Inline {
            declared_name: declaration
                .node
                .child_by_field_name("name")
                .map(|n| file.node_text(n).to_string())
                .unwrap_or_else(|| "default".to_string()),
            chunk: chunk_of(&declaration, &file.text),
        },
        DefaultExport::Alias(local) => DefaultTarget::Alias(local.to_string()),
    };
    Some(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeStatus;
    use crate::resolver::{Resolution, UnresolvedReason};
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, rel: &str, content: &str) -> PathBuf {
        let path = dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn definition_text(site: &DefinitionSite) -> String {
        let content = fs::read_to_string(&site.file_path).unwrap();
        content[site.position.start.offset..site.position.end.offset].to_string()
    }

    fn assert_no_self_reference(node: &DependencyNode) {
        assert!(
            !node.dependencies.contains_key(&node.identifier),
            "{} depends on itself",
            node.identifier
        );
        for child in node.dependencies.values() {
            assert_no_self_reference(child);
        }
    }

    #[test]
    fn test_definition_through_named_import() {
        let dir = TempDir::new().unwrap();
        let main = write(
            &dir,
            "main.ts",
            "import { Command } from './types';\nexport function f(x: Command) {}\n",
        );
        let types = write(&dir, "types.ts", "export interface Command { id: string }\n");

        let analyzer = DependencyAnalyzer::default();
        let site = analyzer
            .find_identifier_definition(&IdentifierUsage::new("Command"), &main)
            .unwrap();
        assert_eq!(site.file_path, types);
        assert!(definition_text(&site).contains("interface Command"));
    }

    #[test]
    fn test_definition_in_same_file() {
        let dir = TempDir::new().unwrap();
        let main = write(&dir, "main.ts", "type Id = string;\nexport const id: Id = 'x';\n");

        let analyzer = DependencyAnalyzer::default();
        let site = analyzer
            .find_identifier_definition(&IdentifierUsage::new("Id"), &main)
            .unwrap();
        assert_eq!(site.file_path, main);
        assert_eq!(definition_text(&site), "type Id = string;");
    }

    #[test]
    fn test_non_existent_identifier() {
        let dir = TempDir::new().unwrap();
        let main = write(&dir, "main.ts", "export const a = 1;\n");

        let mut analyzer = DependencyAnalyzer::default();
        let usage = IdentifierUsage::new("NoSuchSymbol");
        assert!(analyzer.find_identifier_definition(&usage, &main).is_none());
        assert!(analyzer.analyze_identifier_dependencies(&usage, &main).is_none());
        assert_eq!(analyzer.cache_len(), 0);
        assert!(analyzer.in_flight.is_empty());

        let missing = dir.path().join("missing.ts");
        assert!(analyzer.find_identifier_definition(&usage, &missing).is_none());
    }

    #[test]
    fn test_service_dependencies() {
        let dir = TempDir::new().unwrap();
        let service = write(
            &dir,
            "service.ts",
            r#"import { Payload } from './payload';
import { Result } from './result';

export class TestService {
  constructor(private input: string) {}

  process(data: Payload): Result {
    return new Result(this.input);
  }
}
"#,
        );
        let payload = write(&dir, "payload.ts", "export interface Payload { value: string }\n");
        write(
            &dir,
            "result.ts",
            "export class Result {\n  constructor(public value: string) {}\n}\n",
        );

        let mut analyzer = DependencyAnalyzer::default();
        let root = analyzer
            .analyze_identifier_dependencies(&IdentifierUsage::new("TestService"), &service)
            .unwrap();

        assert_eq!(root.status, NodeStatus::Resolved);
        assert!(root.source_code.as_deref().unwrap().starts_with("export class TestService"));
        assert!(!root.dependencies.contains_key("input"));
        assert!(!root.dependencies.contains_key("process"));
        assert!(!root.dependencies.contains_key("TestService"));

        let payload_node = root.get("Payload").unwrap();
        assert!(payload_node.is_resolved());
        assert_eq!(payload_node.file_path.as_deref(), Some(payload.as_path()));
        assert!(root.get("Result").unwrap().is_resolved());
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let dir = TempDir::new().unwrap();
        let main = write(
            &dir,
            "main.ts",
            r#"import { User } from './user';
import { Role } from './role';
export interface Account { owner: User; roles: Role[]; settings: Settings }
interface Settings { theme: string }
"#,
        );
        write(&dir, "user.ts", "import { Role } from './role';\nexport interface User { role: Role }\n");
        write(&dir, "role.ts", "export enum Role { Admin, Member }\n");

        let usage = IdentifierUsage::new("Account");
        let first = DependencyAnalyzer::default()
            .analyze_identifier_dependencies(&usage, &main)
            .unwrap();
        let second = DependencyAnalyzer::default()
            .analyze_identifier_dependencies(&usage, &main)
            .unwrap();
        assert_eq!(*first, *second);

        let keys: Vec<_> = first.dependencies.keys().cloned().collect();
        assert_eq!(keys, vec!["Role", "Settings", "User"]);
    }

    #[test]
    fn test_self_reference_is_excluded() {
        let dir = TempDir::new().unwrap();
        let main = write(
            &dir,
            "tree.ts",
            r#"export interface TreeNode { children: TreeNode[]; label: Label }
export type Label = { text: string; parent?: TreeNode };
export function depth(node: TreeNode): number {
  return node.children.length === 0 ? 0 : 1 + depth(node.children[0]);
}
"#,
        );

        let mut analyzer = DependencyAnalyzer::default();
        for name in ["TreeNode", "depth"] {
            let root = analyzer
                .analyze_identifier_dependencies(&IdentifierUsage::new(name), &main)
                .unwrap();
            assert_no_self_reference(&root);
        }
    }

    #[test]
    fn test_aliased_import_excludes_both_names() {
        let dir = TempDir::new().unwrap();
        let main = write(&dir, "main.ts", "import { Node as N } from './node';\nexport type Root = N;\n");
        write(&dir, "node.ts", "export interface Node { next: Node }\n");

        let mut analyzer = DependencyAnalyzer::default();
        let root = analyzer
            .analyze_identifier_dependencies(&IdentifierUsage::new("N"), &main)
            .unwrap();
        assert_eq!(root.identifier, "N");
        assert!(root.dependencies.is_empty(), "{:?}", root.dependencies.keys());
    }

    #[test]
    fn test_reexport_chain_lands_on_declaring_file() {
        let dir = TempDir::new().unwrap();
        let main = write(&dir, "main.ts", "import { X, Y, W } from './b';\nexport type All = X | Y | W;\n");
        write(
            &dir,
            "b.ts",
            "export { X } from './c';\nexport { Z as Y } from './c';\nexport * from './d';\n",
        );
        let c = write(&dir, "c.ts", "export interface X { id: string }\nexport type Z = number;\n");
        let d = write(&dir, "d.ts", "import { V } from './e';\nexport { V as W };\n");
        let e = write(&dir, "e.ts", "export class V {}\n");

        let analyzer = DependencyAnalyzer::default();
        let x = analyzer
            .find_identifier_definition(&IdentifierUsage::new("X"), &main)
            .unwrap();
        assert_eq!(x.file_path, c);
        assert_eq!(definition_text(&x), "export interface X { id: string }");

        let y = analyzer
            .find_identifier_definition(&IdentifierUsage::new("Y"), &main)
            .unwrap();
        assert_eq!(y.file_path, c);
        assert_eq!(definition_text(&y), "export type Z = number;");

        let w = analyzer
            .find_identifier_definition(&IdentifierUsage::new("W"), &main)
            .unwrap();
        assert_ne!(w.file_path, d);
        assert_eq!(w.file_path, e);
    }

    #[test]
    fn test_reexport_following_can_be_limited() {
        let dir = TempDir::new().unwrap();
        let main = write(&dir, "main.ts", "import { X } from './b';\n");
        write(&dir, "b.ts", "export * from './b2';\n");
        write(&dir, "b2.ts", "export { X } from './c';\n");
        write(&dir, "c.ts", "export interface X {}\n");
        let usage = IdentifierUsage::new("X");

        assert!(DependencyAnalyzer::default()
            .find_identifier_definition(&usage, &main)
            .is_some());

        let shallow = AnalyzerConfig {
            max_reexport_depth: 1,
            ..AnalyzerConfig::default()
        };
        assert!(DependencyAnalyzer::new(&shallow)
            .find_identifier_definition(&usage, &main)
            .is_none());

        let disabled = AnalyzerConfig {
            follow_reexports: false,
            ..AnalyzerConfig::default()
        };
        assert!(DependencyAnalyzer::new(&disabled)
            .find_identifier_definition(&usage, &main)
            .is_none());
    }

    #[test]
    fn test_reexport_loop_terminates() {
        let dir = TempDir::new().unwrap();
        let main = write(&dir, "main.ts", "import { Ghost } from './a';\n");
        write(&dir, "a.ts", "export * from './b';\n");
        write(&dir, "b.ts", "export * from './a';\n");

        let analyzer = DependencyAnalyzer::default();
        assert!(analyzer
            .find_identifier_definition(&IdentifierUsage::new("Ghost"), &main)
            .is_none());
    }

    #[test]
    fn test_mutual_recursion_yields_cycle_marker() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.ts", "import { B } from './b';\nexport interface A { b: B }\n");
        let b = write(&dir, "b.ts", "import { A } from './a';\nexport interface B { a: A }\n");

        let mut analyzer = DependencyAnalyzer::default();
        let root = analyzer
            .analyze_identifier_dependencies(&IdentifierUsage::new("A"), &a)
            .unwrap();

        let b_node = root.get("B").unwrap();
        assert!(b_node.is_resolved());
        assert_eq!(b_node.file_path.as_deref(), Some(b.as_path()));

        let a_again = b_node.get("A").unwrap();
        assert!(a_again.is_resolved());

        let marker = a_again.get("B").unwrap();
        assert_eq!(marker.status, NodeStatus::Cycle);
        assert_eq!(marker.file_path.as_deref(), Some(a.as_path()));
        assert!(marker.dependencies.is_empty());
        assert!(analyzer.in_flight.is_empty());
    }

    #[test]
    fn test_unresolved_names_become_placeholders() {
        let dir = TempDir::new().unwrap();
        let main = write(
            &dir,
            "main.ts",
            "import { External } from 'some-lib';\nexport interface Uses { e: External; m: Missing }\n",
        );

        let mut analyzer = DependencyAnalyzer::default();
        let root = analyzer
            .analyze_identifier_dependencies(&IdentifierUsage::new("Uses"), &main)
            .unwrap();
        for name in ["External", "Missing"] {
            let node = root.get(name).unwrap();
            assert_eq!(node.status, NodeStatus::Unresolved);
            assert!(node.source_code.is_none());
        }
    }

    #[test]
    fn test_shared_dependencies_are_memoized() {
        let dir = TempDir::new().unwrap();
        let main = write(
            &dir,
            "main.ts",
            "import { User } from './user';\nexport interface A { u: User; b: B }\nexport interface B { u: User }\n",
        );
        write(&dir, "user.ts", "export interface User { name: string }\n");

        let mut analyzer = DependencyAnalyzer::default();
        let root = analyzer
            .analyze_identifier_dependencies(&IdentifierUsage::new("A"), &main)
            .unwrap();
        let direct = &root.dependencies["User"];
        let via_b = &root.dependencies["B"].dependencies["User"];
        assert!(Rc::ptr_eq(direct, via_b));

        let again = analyzer
            .analyze_identifier_dependencies(&IdentifierUsage::new("A"), &main)
            .unwrap();
        assert!(Rc::ptr_eq(&root, &again));

        analyzer.clear_cache();
        assert_eq!(analyzer.cache_len(), 0);
    }

    #[test]
    fn test_default_imports() {
        let dir = TempDir::new().unwrap();
        let main = write(
            &dir,
            "main.ts",
            "import Widget from './widget';\nimport G from './gadget';\nimport * as utils from './utils';\n",
        );
        let widget = write(&dir, "widget.ts", "export default class Widget { part: Part }\ninterface Part {}\n");
        let gadget = write(&dir, "gadget.ts", "class Gadget {}\nexport default Gadget;\n");
        write(&dir, "utils.ts", "export const a = 1;\n");

        let mut analyzer = DependencyAnalyzer::default();
        let site = analyzer
            .find_identifier_definition(&IdentifierUsage::new("Widget"), &main)
            .unwrap();
        assert_eq!(site.file_path, widget);
        assert!(definition_text(&site).starts_with("export default class Widget"));

        let site = analyzer
            .find_identifier_definition(&IdentifierUsage::new("G"), &main)
            .unwrap();
        assert_eq!(site.file_path, gadget);
        assert_eq!(definition_text(&site), "class Gadget {}");

        assert!(analyzer
            .find_identifier_definition(&IdentifierUsage::new("utils"), &main)
            .is_none());

        let root = analyzer
            .analyze_identifier_dependencies(&IdentifierUsage::new("Widget"), &main)
            .unwrap();
        assert!(root.get("Part").unwrap().is_resolved());
        assert!(!root.dependencies.contains_key("Widget"));
    }

    #[test]
    fn test_package_entry_resolution() {
        let dir = TempDir::new().unwrap();
        let main = write(&dir, "src/main.ts", "import { helper } from 'lib';\n");
        write(
            &dir,
            "node_modules/lib/package.json",
            r#"{ "name": "lib", "main": "dist/index.js" }"#,
        );
        let entry = write(&dir, "node_modules/lib/dist/index.js", "export function helper() {}\n");

        let usage = IdentifierUsage::new("helper");
        let site = DependencyAnalyzer::default()
            .find_identifier_definition(&usage, &main)
            .unwrap();
        assert_eq!(site.file_path, entry);

        let offline = AnalyzerConfig {
            node_modules: false,
            ..AnalyzerConfig::default()
        };
        assert!(DependencyAnalyzer::new(&offline)
            .find_identifier_definition(&usage, &main)
            .is_none());
    }

    struct AliasResolver {
        root: PathBuf,
    }

    impl Resolver for AliasResolver {
        fn resolve(&self, specifier: &str, _from_file: &Path) -> Resolution {
            match specifier.strip_prefix("@app/") {
                Some(rest) => Resolution::Resolved(self.root.join(format!("{}.ts", rest))),
                None => Resolution::Unresolved(UnresolvedReason::UnsupportedSyntax(
                    specifier.to_string(),
                )),
            }
        }
    }

    #[test]
    fn test_custom_resolver() {
        let dir = TempDir::new().unwrap();
        let main = write(&dir, "main.ts", "import { Config } from '@app/config';\n");
        let config = write(&dir, "config.ts", "export type Config = { debug: boolean };\n");

        let analyzer = DependencyAnalyzer::with_resolver(
            &AnalyzerConfig::default(),
            Box::new(AliasResolver {
                root: dir.path().to_path_buf(),
            }),
        );
        let site = analyzer
            .find_identifier_definition(&IdentifierUsage::new("Config"), &main)
            .unwrap();
        assert_eq!(site.file_path, config);
    }

    #[test]
    fn test_extra_builtins_are_not_expanded() {
        let dir = TempDir::new().unwrap();
        let main = write(
            &dir,
            "main.ts",
            "export function report() { console.log(JSON.stringify(format())); }\nfunction format() { return 1; }\n",
        );
        let config = AnalyzerConfig {
            extra_builtins: vec!["console".to_string(), "JSON".to_string()],
            ..AnalyzerConfig::default()
        };

        let mut analyzer = DependencyAnalyzer::new(&config);
        let root = analyzer
            .analyze_identifier_dependencies(&IdentifierUsage::new("report"), &main)
            .unwrap();
        let keys: Vec<_> = root.dependencies.keys().cloned().collect();
        assert_eq!(keys, vec!["format"]);
    }
}
