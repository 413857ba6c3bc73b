//! Core types for diagnostics and results.

use miette::{NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File the location belongs to, as given to the parser.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset in file (for miette integration).
    #[serde(default)]
    pub offset: usize,
    /// Length of the span in bytes.
    #[serde(default)]
    pub length: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Sets the byte offset and length for this location.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// Which stage of the check pipeline rejected a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckKind {
    /// Pointer variables must carry the configured prefix.
    PointerPrefix,
    /// One return statement per function when goto is preferred.
    GotoPreference,
    /// No goto statements unless goto is preferred.
    GotoHarmful,
    /// Identifiers must match the rule for their kind.
    NamingPattern,
}

impl CheckKind {
    /// Kebab-case name of the check.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PointerPrefix => "pointer-prefix",
            Self::GotoPreference => "goto-preference",
            Self::GotoHarmful => "goto-harmful",
            Self::NamingPattern => "naming-pattern",
        }
    }
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A style violation found in a local syntax node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Where the offending node is.
    pub location: Location,
    /// Check that produced this diagnostic.
    pub check: CheckKind,
    /// Human-readable reason.
    pub reason: String,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    #[must_use]
    pub fn new(location: Location, check: CheckKind, reason: impl Into<String>) -> Self {
        Self {
            location,
            check,
            reason: reason.into(),
        }
    }

    /// File the diagnostic points into.
    #[must_use]
    pub fn file(&self) -> &std::path::Path {
        &self.location.file
    }

    /// Line number (1-indexed).
    #[must_use]
    pub fn line(&self) -> usize {
        self.location.line
    }

    /// Column number (1-indexed).
    #[must_use]
    pub fn column(&self) -> usize {
        self.location.column
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.reason
        )
    }
}

/// Converts a [`Diagnostic`] to a miette diagnostic for rich error display.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("{reason}")]
pub struct DiagnosticReport {
    reason: String,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl DiagnosticReport {
    /// Attaches the file contents so the report can render a snippet.
    #[must_use]
    pub fn new(diagnostic: &Diagnostic, source: String) -> Self {
        let name = diagnostic.location.file.display().to_string();
        Self {
            reason: diagnostic.reason.clone(),
            source_code: NamedSource::new(name, source),
            span: SourceSpan::from((diagnostic.location.offset, diagnostic.location.length)),
            label_message: diagnostic.check.name().to_string(),
        }
    }
}

/// A file that could not be validated because parsing failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileFailure {
    /// File that failed.
    pub file: PathBuf,
    /// Parser error message.
    pub message: String,
}

/// Result of a validation run.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All diagnostics, in file order then pre-order.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of files that were parsed and checked.
    pub files_checked: usize,
    /// Files skipped because the parser rejected them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FileFailure>,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if any diagnostic was produced.
    #[must_use]
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Returns true if the run found nothing to report.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && self.failures.is_empty()
    }
}
