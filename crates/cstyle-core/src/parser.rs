//! The seam to whatever produces syntax trees.

use std::path::{Path, PathBuf};

use crate::node::SyntaxNode;

/// Errors a parser may report for one file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },

    /// No grammar handles this file.
    #[error("unsupported file type: {path}")]
    UnsupportedFile {
        /// File that was rejected.
        path: PathBuf,
    },

    /// The grammar could not be loaded.
    #[error("failed to load {language} grammar: {message}")]
    Language {
        /// Language name.
        language: &'static str,
        /// Loader message.
        message: String,
    },

    /// The source does not parse.
    #[error("syntax error in {path} at {line}:{column}")]
    Syntax {
        /// File that failed.
        path: PathBuf,
        /// Line of the first error (1-indexed).
        line: usize,
        /// Column of the first error (1-indexed).
        column: usize,
    },
}

/// Produces one syntax tree per source file.
///
/// Implementations set each node's location file to the path they were
/// asked to parse, so the validator can tell local nodes apart.
pub trait SourceParser: Send + Sync {
    /// Parses `path` into a single-rooted tree.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the file cannot be read or parsed.
    fn parse(&self, path: &Path) -> Result<SyntaxNode, ParseError>;
}
