//! Core analyzer for orchestrating lint execution.

use crate::config::Config;
use crate::context::FileContext;
use crate::rule::{Rule, RuleBox};
use crate::sink::DiagnosticSink;
use crate::syntax::{ParseError, SourceParser};
use crate::types::{LintResult, Violation};
use crate::utils::allowance::check_allow;
use crate::walker::{walk, TraversalError};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a source file.
    #[error("Parse error in {path}: {source}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Underlying parser error.
        source: ParseError,
    },

    /// A source file is not valid UTF-8.
    #[error("Cannot decode {path}: {source}")]
    Encoding {
        /// Path to the undecodable file.
        path: PathBuf,
        /// Underlying decoding error.
        source: std::string::FromUtf8Error,
    },

    /// The syntax tree walk hit a contract violation.
    #[error("Traversal error in {path}: {source}")]
    Traversal {
        /// Path to the file being walked.
        path: PathBuf,
        /// Underlying traversal error.
        source: TraversalError,
    },

    /// File discovery failed.
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// No source parser was configured.
    #[error("No source parser configured")]
    MissingParser,
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    parser: Option<Box<dyn SourceParser>>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Sets the language front end.
    #[must_use]
    pub fn parser<P: SourceParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Some(Box::new(parser));
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on parse errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if no parser was set, an exclude pattern is invalid,
    /// or the working directory cannot be resolved.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let parser = self.parser.ok_or(AnalyzerError::MissingParser)?;
        let config = self.config.unwrap_or_default();

        let root = self
            .root
            .unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());
        let excludes = exclude_patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Analyzer {
            root,
            parser,
            rules: self.rules,
            excludes,
            config,
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    parser: Box<dyn SourceParser>,
    rules: Vec<RuleBox>,
    excludes: Vec<glob::Pattern>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyzes all files under the root and returns the results.
    ///
    /// Files that are not UTF-8, or that fail to parse or traverse, are
    /// logged and counted as skipped, unless `fail_on_parse_error` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery or reading fails.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let mut result = LintResult::new();
        let files = self.discover_files()?;

        info!("Found {} files to analyze", files.len());

        for file_path in &files {
            let checked = read_source(file_path)
                .and_then(|content| self.check_source(file_path, &content));
            match checked {
                Ok(violations) => {
                    result.violations.extend(violations);
                    result.files_checked += 1;
                }
                Err(
                    e @ (AnalyzerError::Encoding { .. }
                    | AnalyzerError::Parse { .. }
                    | AnalyzerError::Traversal { .. }),
                ) => {
                    warn!("{e}");
                    if self.fail_on_parse_error {
                        return Err(e);
                    }
                    result.files_skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        result.sort_by_file();

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Checks one file's source text.
    ///
    /// Violations come back in visit order with configuration and inline
    /// suppressions applied.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Parse`] or [`AnalyzerError::Traversal`].
    pub fn check_source(&self, path: &Path, content: &str) -> Result<Vec<Violation>, AnalyzerError> {
        let ctx = FileContext::new(path, content, &self.root);
        debug!("Analyzing module {}", ctx.module_name());

        let module = self.parser.parse(content).map_err(|source| AnalyzerError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let active = self.active_rules();
        let mut sink = ConfiguredSink {
            config: &self.config,
            content,
            violations: Vec::new(),
        };

        walk(&module, &active, &ctx, &mut sink).map_err(|source| AnalyzerError::Traversal {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(sink.violations)
    }

    /// Rules whose checker and at least one message are enabled.
    fn active_rules(&self) -> Vec<&dyn Rule> {
        self.rules
            .iter()
            .filter(|rule| {
                let enabled = self.config.is_rule_enabled(rule.name())
                    && rule
                        .messages()
                        .iter()
                        .any(|id| self.config.is_message_enabled(*id));
                if !enabled {
                    debug!("Skipping disabled rule: {}", rule.name());
                }
                enabled
            })
            .map(|rule| &**rule)
            .collect()
    }

    /// Discovers all source files the parser handles.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let extensions = self.parser.extensions();

        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(self.config.analyzer.respect_gitignore);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let handled = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| extensions.contains(&ext));
            if !handled {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let relative_str = relative.to_string_lossy();

        self.excludes
            .iter()
            .any(|p| p.matches(&path_str) || p.matches(&relative_str))
    }
}

fn read_source(path: &Path) -> Result<String, AnalyzerError> {
    let bytes = std::fs::read(path)?;
    String::from_utf8(bytes).map_err(|source| AnalyzerError::Encoding {
        path: path.to_path_buf(),
        source,
    })
}

/// Applies message enable flags, severity overrides and inline suppressions.
struct ConfiguredSink<'a> {
    config: &'a Config,
    content: &'a str,
    violations: Vec<Violation>,
}

impl DiagnosticSink for ConfiguredSink<'_> {
    fn report(&mut self, mut violation: Violation) {
        if !self.config.is_message_enabled(violation.id) {
            return;
        }

        let allow = check_allow(self.content, violation.location.line, violation.id);
        if allow.is_allowed() {
            debug!(
                "Suppressed {} at line {} ({})",
                violation.symbol(),
                violation.location.line,
                allow.reason().unwrap_or("no reason given")
            );
            return;
        }

        if let Some(severity) = self.config.rule_severity(&violation.checker, violation.id) {
            violation.severity = severity;
        }
        self.violations.push(violation);
    }
}
