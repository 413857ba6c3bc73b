//! # cstyle-ts
//!
//! Tree-sitter front end for cstyle.
//!
//! Parses C and C++ sources with `tree-sitter-c` and `tree-sitter-cpp` and
//! lowers them into the [`cstyle_core::SyntaxNode`] trees the validator
//! walks:
//!
//! - [`Dialect`] maps file extensions to grammars
//! - [`TreeSitterParser`] implements [`cstyle_core::SourceParser`]
//!
//! ```ignore
//! use cstyle_core::Validator;
//! use cstyle_ts::TreeSitterParser;
//!
//! let result = Validator::builder()
//!     .file("src/main.c")
//!     .build()
//!     .run(&TreeSitterParser::new())?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod language;
mod lower;
mod parser;

pub use language::{is_supported, Dialect};
pub use parser::TreeSitterParser;
