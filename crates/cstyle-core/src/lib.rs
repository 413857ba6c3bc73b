//! # cstyle-core
//!
//! Validation engine for the cstyle C/C++ naming and style checker.
//!
//! This crate knows nothing about how C is parsed. It provides:
//!
//! - [`SyntaxNode`] and [`SyntaxKind`], the tree facade a parser fills in
//! - [`Options`] and [`RuleDatabase`], loaded together as a [`Config`]
//! - [`Pipeline`], the ordered pointer-prefix, goto and naming checks
//! - [`Validator`], which walks each tree and collects [`Diagnostic`]s
//! - [`SourceParser`], the trait a parser implements
//!
//! ## Example
//!
//! ```ignore
//! use cstyle_core::{Config, Validator};
//!
//! let config = Config::from_file("cstyle.toml".as_ref())?;
//! let validator = Validator::builder()
//!     .config(config)
//!     .files(["src/main.c"])
//!     .build();
//!
//! let result = validator.run(&parser)?;
//! for diagnostic in &result.diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod check;
mod config;
mod kind;
mod node;
pub mod options;
mod parser;
pub mod rules;
mod types;
mod validator;

pub use check::{Pipeline, ReturnCounter, Verdict};
pub use config::{Config, ConfigDocument, ConfigError};
pub use kind::{SyntaxKind, UnknownKind};
pub use node::{Preorder, SyntaxNode};
pub use options::{OptionValue, Options};
pub use parser::{ParseError, SourceParser};
pub use rules::{Rule, RuleDatabase};
pub use types::{CheckKind, Diagnostic, DiagnosticReport, FileFailure, LintResult, Location};
pub use validator::{Validator, ValidatorBuilder, ValidatorError};
