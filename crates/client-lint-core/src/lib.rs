//! # client-lint-core
//!
//! Core framework for checking client API conventions on a parsed syntax
//! tree.
//!
//! This crate provides:
//!
//! - the language-neutral syntax model ([`Module`], [`ClassDef`], [`FunctionDef`])
//! - [`ContextStack`] for tracking the innermost enclosing class
//! - [`walk`], the pre-order traversal that invokes [`Rule`]s
//! - [`DiagnosticSink`] and [`Violation`] for reporting findings
//! - [`Analyzer`] for discovering, parsing and checking files
//!
//! ## Example
//!
//! ```ignore
//! use client_lint_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./sdk")
//!     .parser(PythonParser::new())
//!     .rule(ConstructorTakesConfiguration::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod message;
mod rule;
mod sink;
mod syntax;
mod types;
mod walker;

/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::{ContextStack, FileContext, Scope, VisitContext};
pub use message::MessageId;
pub use rule::{Rule, RuleBox};
pub use sink::DiagnosticSink;
pub use syntax::{
    ClassDef, FunctionDef, Module, ParamKind, Parameter, ParameterList, ParseError, ReturnShape,
    SourceParser, Span, Stmt, CLIENT_SUFFIX,
};
pub use types::{LintResult, Location, Severity, Suggestion, Violation, ViolationDiagnostic};
pub use walker::{walk, TraversalError};
