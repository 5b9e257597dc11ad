use std::path::Path;

use tracing::debug;
use tree_sitter::Tree;

use crate::locator::{find_declaration_in, Declaration};
use crate::model::{CodeChunk, SourcePosition};

/// Slice the verbatim text of the declaration of `identifier` out of `file_path`.
///
/// The text is taken from a fresh read of `file_path`, so the file on disk
/// must still match what `tree` was parsed from. Returns `None` when nothing
/// in the file declares `identifier` at a declaration position, when the file
/// cannot be read, or when the node's byte range does not fit the text read.
pub fn extract_code_chunk(tree: &Tree, identifier: &str, file_path: &Path) -> Option<CodeChunk> {
    let content = match std::fs::read_to_string(file_path) {
        Ok(content) => content,
        Err(e) => {
            debug!("cannot read {}: {}", file_path.display(), e);
            return None;
        }
    };
    if tree.root_node().end_byte() > content.len() {
        debug!("{} changed since it was parsed", file_path.display());
        return None;
    }
    let declaration = find_declaration_in(tree.root_node(), &content, identifier)?;
    chunk_of(&declaration, &content)
}

/// The text and span of an already located declaration.
pub fn chunk_of(declaration: &Declaration, content: &str) -> Option<CodeChunk> {
    let position = declaration.position();
    slice_position(content, &position).map(|source_code| CodeChunk {
        source_code: source_code.to_string(),
        position,
    })
}

pub fn slice_position<'a>(content: &'a str, position: &SourcePosition) -> Option<&'a str> {
    content.get(position.start.offset..position.end.offset)
}
