//! [`SourceParser`] implementation backed by Tree-sitter.

use std::path::Path;
use tracing::debug;
use tree_sitter::{Node, Parser};

use cstyle_core::{ParseError, SourceParser, SyntaxNode};

use crate::language::Dialect;
use crate::lower::Lowering;

/// Parses C and C++ files with Tree-sitter and lowers them to
/// [`SyntaxNode`] trees.
///
/// A fresh `tree_sitter::Parser` is created per file, so one instance can
/// be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct TreeSitterParser {
    allow_syntax_errors: bool,
}

impl TreeSitterParser {
    /// Creates a parser that rejects files with syntax errors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lowers files even when Tree-sitter had to recover from errors.
    ///
    /// Unexpanded macros frequently confuse the grammar; with this set,
    /// whatever was recognised is still checked.
    #[must_use]
    pub fn allow_syntax_errors(mut self, allow: bool) -> Self {
        self.allow_syntax_errors = allow;
        self
    }

    /// Parses in-memory `source` as if it were the contents of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Language`] if the grammar cannot be loaded and
    /// [`ParseError::Syntax`] if the source has errors and they are not
    /// allowed.
    pub fn parse_source(
        &self,
        path: &Path,
        dialect: Dialect,
        source: &str,
    ) -> Result<SyntaxNode, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&dialect.language())
            .map_err(|e| ParseError::Language {
                language: dialect.language_id(),
                message: e.to_string(),
            })?;

        let src = source.as_bytes();
        let tree = parser.parse(src, None).ok_or_else(|| ParseError::Syntax {
            path: path.to_path_buf(),
            line: 1,
            column: 1,
        })?;
        let root = tree.root_node();

        if root.has_error() {
            let at = first_error(root).unwrap_or(root).start_position();
            if !self.allow_syntax_errors {
                return Err(ParseError::Syntax {
                    path: path.to_path_buf(),
                    line: at.row + 1,
                    column: at.column + 1,
                });
            }
            debug!(
                "{}:{}:{}: syntax error, checking recovered tree",
                path.display(),
                at.row + 1,
                at.column + 1
            );
        }

        Ok(Lowering::new(src, path).translation_unit(root))
    }
}

impl SourceParser for TreeSitterParser {
    fn parse(&self, path: &Path) -> Result<SyntaxNode, ParseError> {
        let dialect = Dialect::from_path(path).ok_or_else(|| ParseError::UnsupportedFile {
            path: path.to_path_buf(),
        })?;
        let source = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Parsing {} as {}", path.display(), dialect.language_id());

        if let Some(fallback) = dialect.header_fallback(path) {
            let strict = Self::new();
            match strict.parse_source(path, dialect, &source) {
                Err(ParseError::Syntax { .. }) => {
                    if let Ok(tree) = strict.parse_source(path, fallback, &source) {
                        debug!("{} parsed as {}", path.display(), fallback.language_id());
                        return Ok(tree);
                    }
                }
                other => return other,
            }
        }

        self.parse_source(path, dialect, &source)
    }
}

/// Leftmost `ERROR` or `MISSING` node.
fn first_error(root: Node<'_>) -> Option<Node<'_>> {
    let mut node = root;
    loop {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        let mut cursor = node.walk();
        let broken = node
            .children(&mut cursor)
            .find(|c| c.has_error() || c.is_missing());
        node = broken?;
    }
}
