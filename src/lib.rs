pub mod analyzer;
pub mod chunk;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod imports;
pub mod locator;
pub mod model;
pub mod parser;
pub mod resolver;
pub mod scope;

pub use analyzer::DependencyAnalyzer;
pub use chunk::extract_code_chunk;
pub use config::AnalyzerConfig;
pub use error::AnalyzerError;
pub use imports::find_import_for_identifier;
pub use locator::find_definition_in_file;
pub use model::{
    CodeChunk, DefinitionSite, DependencyNode, IdentifierUsage, NodeStatus, SourcePosition,
};
pub use resolver::Resolver;
pub use scope::find_chunk_dependencies;
