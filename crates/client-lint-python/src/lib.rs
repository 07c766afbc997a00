//! # client-lint-python
//!
//! Tree-sitter based Python front end for client-lint.
//!
//! Lowers Python source into the `client-lint-core` syntax model:
//!
//! - [`PythonParser`] implements [`client_lint_core::SourceParser`]
//! - [`shape`] classifies `return` values structurally

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod parser;
pub mod shape;

pub use parser::PythonParser;
