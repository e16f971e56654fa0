//! Tree-sitter parser construction and parsing entry points.

use tree_sitter::{Parser, Tree};

/// Error raised while turning source text into a syntax tree.
#[derive(Debug, thiserror::Error)]
pub enum SyntaxError {
    #[error("swift grammar is incompatible with the linked tree-sitter: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("source file contains syntax errors")]
    Parse,
}

/// Create a parser configured for the Swift grammar.
pub fn parser() -> Result<Parser, SyntaxError> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_swift::LANGUAGE.into())?;
    Ok(parser)
}

/// Parse one Swift source file.
///
/// A tree containing any `ERROR` node is rejected: the tool rewrites
/// files byte-for-byte and must not guess around malformed input.
pub fn parse_source(source: &str) -> Result<Tree, SyntaxError> {
    let tree = parser()?.parse(source, None).ok_or(SyntaxError::Parse)?;
    if tree.root_node().has_error() {
        return Err(SyntaxError::Parse);
    }
    Ok(tree)
}
