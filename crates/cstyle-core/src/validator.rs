//! Drives the check pipeline over the syntax trees of the input files.

use crate::check::{Pipeline, ReturnCounter};
use crate::config::Config;
use crate::node::SyntaxNode;
use crate::parser::{ParseError, SourceParser};
use crate::types::{Diagnostic, FileFailure, LintResult};

use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that abort a validation run.
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// A file failed to parse and `fail_on_parse_error` is set.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Builder for configuring a [`Validator`].
#[derive(Default)]
pub struct ValidatorBuilder {
    config: Option<Config>,
    pipeline: Option<Pipeline>,
    files: Vec<PathBuf>,
    fail_on_parse_error: bool,
}

impl ValidatorBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration (default: [`Config::default`]).
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Replaces the standard check pipeline.
    #[must_use]
    pub fn pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    /// Adds a file to check.
    #[must_use]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Adds several files to check, keeping their order.
    #[must_use]
    pub fn files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Sets whether to stop at the first parse failure (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the validator.
    #[must_use]
    pub fn build(self) -> Validator {
        Validator {
            config: self.config.unwrap_or_default(),
            pipeline: self.pipeline.unwrap_or_default(),
            files: self.files,
            fail_on_parse_error: self.fail_on_parse_error,
        }
    }
}

/// Checks the local nodes of each input file against the configuration.
///
/// Use [`Validator::builder()`] to construct an instance.
#[derive(Debug, Clone)]
pub struct Validator {
    config: Config,
    pipeline: Pipeline,
    files: Vec<PathBuf>,
    fail_on_parse_error: bool,
}

impl Validator {
    /// Creates a new builder for configuring a validator.
    #[must_use]
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::new()
    }

    /// Files under test, in the order given.
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether `node` comes from one of the files under test.
    #[must_use]
    pub fn is_local(&self, node: &SyntaxNode) -> bool {
        node.location
            .as_ref()
            .is_some_and(|loc| self.files.iter().any(|f| *f == loc.file))
    }

    /// Checks one syntax tree and returns its diagnostics in pre-order.
    ///
    /// Return-statement counting starts from zero for every tree.
    #[must_use]
    pub fn check_tree(&self, tree: &SyntaxNode) -> Vec<Diagnostic> {
        let mut returns = ReturnCounter::new();
        let mut diagnostics = Vec::new();

        for node in tree.walk_preorder().filter(|n| self.is_local(n)) {
            let Some(location) = node.location.as_ref() else {
                continue;
            };
            if let Some((check, reason)) = self.pipeline.run(&self.config, node, &mut returns) {
                debug!("{}:{}: {reason}", location.file.display(), location.line);
                diagnostics.push(Diagnostic::new(location.clone(), check, reason));
            }
        }

        diagnostics
    }

    /// Parses and checks every input file in order.
    ///
    /// Files that fail to parse produce no diagnostics; they are recorded in
    /// [`LintResult::failures`] unless `fail_on_parse_error` is set.
    ///
    /// # Errors
    ///
    /// Returns the first parse error when `fail_on_parse_error` is set.
    pub fn run(&self, parser: &dyn SourceParser) -> Result<LintResult, ValidatorError> {
        info!("Checking {} file(s)", self.files.len());

        let mut result = LintResult::new();
        for path in &self.files {
            debug!("Parsing: {}", path.display());
            match parser.parse(path) {
                Ok(tree) => {
                    result.diagnostics.extend(self.check_tree(&tree));
                    result.files_checked += 1;
                }
                Err(e) => {
                    warn!("Failed to parse {}: {e}", path.display());
                    if self.fail_on_parse_error {
                        return Err(e.into());
                    }
                    result.failures.push(FileFailure {
                        file: path.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Check complete: {} diagnostic(s) in {} file(s)",
            result.diagnostics.len(),
            result.files_checked
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::SyntaxKind;
    use crate::types::Location;

    fn at(line: usize) -> Location {
        Location::new("main.c", line, 1)
    }

    #[test]
    fn builder_keeps_file_order() {
        let v = Validator::builder().file("b.c").files(["a.c", "c.c"]).build();
        assert_eq!(
            v.files(),
            [PathBuf::from("b.c"), PathBuf::from("a.c"), PathBuf::from("c.c")]
        );
    }

    #[test]
    fn nodes_without_location_are_not_local() {
        let v = Validator::builder().file("main.c").build();
        assert!(!v.is_local(&SyntaxNode::new(SyntaxKind::GotoStmt, "")));
        assert!(v.is_local(&SyntaxNode::new(SyntaxKind::GotoStmt, "").at(at(1))));
    }

    #[test]
    fn header_nodes_are_skipped() {
        let v = Validator::builder().file("main.c").build();
        let tree = SyntaxNode::new(SyntaxKind::FunctionDecl, "main")
            .at(at(1))
            .with_child(
                SyntaxNode::new(SyntaxKind::GotoStmt, "").at(Location::new("/usr/include/x.h", 3, 1)),
            )
            .with_child(SyntaxNode::new(SyntaxKind::GotoStmt, "").at(at(2)));

        let diagnostics = v.check_tree(&tree);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location, at(2));
    }

    #[test]
    fn counter_restarts_per_tree() {
        let config = Config::parse("[Options]\nprefer_goto = true\n").unwrap();
        let v = Validator::builder().config(config).file("main.c").build();
        let tree = SyntaxNode::new(SyntaxKind::ReturnStmt, "").at(at(1));
        assert!(v.check_tree(&tree).is_empty());
        assert!(v.check_tree(&tree).is_empty());
    }
}
