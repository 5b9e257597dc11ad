use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading or parsing a source file.
///
/// These never reach callers of the analyzer: each one is logged and folded
/// into "no definition found" for the edge that triggered it.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file type: {}", .0.display())]
    UnsupportedFile(PathBuf),

    #[error("tree-sitter failed to parse {}", .0.display())]
    Parse(PathBuf),

    #[error("failed to load grammar: {0}")]
    Language(String),

    #[error("invalid package manifest {}: {message}", path.display())]
    Manifest { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
