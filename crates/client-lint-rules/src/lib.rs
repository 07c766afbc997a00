//! # client-lint-rules
//!
//! Built-in client convention rules for client-lint.
//!
//! ## Available Rules
//!
//! | Code | Symbol | Checker |
//! |------|--------|---------|
//! | C4712 | `missing-configuration-constructor-parameter` | `constructor-configuration` |
//! | C4713 | `missing-configuration-factory-method` | `client-configuration-factory` |
//! | C4714 | `missing-configuration-factory-method-kwargs` | `client-configuration-factory` |
//! | C4715 | `service-method-incorrect-return-type` | `client-return-value` |
//!
//! A class is a client when its name ends with `Client`.
//!
//! ## Usage
//!
//! ```ignore
//! use client_lint_core::Analyzer;
//! use client_lint_python::PythonParser;
//! use client_lint_rules::{ConfigurationFactory, ConstructorTakesConfiguration};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./sdk")
//!     .parser(PythonParser::new())
//!     .rule(ConstructorTakesConfiguration::new())
//!     .rule(ConfigurationFactory::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod configuration_factory;
pub mod constructor_configuration;
mod presets;
pub mod return_shape;

pub use configuration_factory::ConfigurationFactory;
pub use constructor_configuration::ConstructorTakesConfiguration;
pub use presets::{all_rules, recommended_rules, rules_from_config, Preset};
pub use return_shape::ReturnMatchesName;

/// Re-export core types for convenience.
pub use client_lint_core::{Rule, Severity, Violation};
