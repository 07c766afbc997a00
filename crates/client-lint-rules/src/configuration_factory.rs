//! Rule requiring clients to expose a `create_configuration` factory.
//!
//! A client class must define `create_configuration`, and the factory must
//! take `**kwargs` so callers can forward pipeline options unchanged.
//!
//! # Configuration
//!
//! - `method`: factory method name (default: `create_configuration`)

use client_lint_core::{
    ClassDef, DiagnosticSink, Location, MessageId, Rule, RuleConfig, Severity, Suggestion,
    Violation, VisitContext,
};

/// Checker name for client-configuration-factory.
pub const NAME: &str = "client-configuration-factory";

const DEFAULT_METHOD: &str = "create_configuration";

/// Flags clients without a configuration factory, or whose factory lacks `**kwargs`.
#[derive(Debug, Clone)]
pub struct ConfigurationFactory {
    /// Name of the factory method.
    pub method: String,
    /// Severity of reported violations.
    pub severity: Severity,
}

impl Default for ConfigurationFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationFactory {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            method: DEFAULT_METHOD.to_string(),
            severity: Severity::Warning,
        }
    }

    /// Creates a rule from its `[rules.client-configuration-factory]` table.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        let rule = Self::new().method_name(config.get_str("method", DEFAULT_METHOD));
        match config.severity {
            Some(severity) => rule.severity(severity),
            None => rule,
        }
    }

    /// Sets the factory method name.
    #[must_use]
    pub fn method_name(mut self, name: impl Into<String>) -> Self {
        self.method = name.into();
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for ConfigurationFactory {
    fn name(&self) -> &'static str {
        NAME
    }

    fn messages(&self) -> &'static [MessageId] {
        &[MessageId::MissingFactoryMethod, MessageId::MissingFactoryKwargs]
    }

    fn description(&self) -> &'static str {
        "Clients must define create_configuration(**kwargs)"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check_class(&self, ctx: &VisitContext<'_>, class: &ClassDef, sink: &mut dyn DiagnosticSink) {
        if !class.is_client_type() {
            return;
        }

        let file = &ctx.file.relative_path;
        match class.method(&self.method) {
            None => {
                let violation = Violation::new(
                    MessageId::MissingFactoryMethod,
                    NAME,
                    self.severity,
                    Location::from_span(file.clone(), class.span),
                );
                let violation = if self.method == DEFAULT_METHOD {
                    violation
                } else {
                    violation.with_message(format!("Is missing a {} method.", self.method))
                };
                sink.report(violation.with_suggestion(Suggestion::new(format!(
                    "Add `def {}(**kwargs)` returning the client's configuration",
                    self.method
                ))));
            }
            Some(factory) if !factory.has_variadic_keyword() => {
                sink.report(
                    Violation::new(
                        MessageId::MissingFactoryKwargs,
                        NAME,
                        self.severity,
                        Location::from_span(file.clone(), factory.span),
                    )
                    .with_suggestion(Suggestion::new(format!(
                        "Add `**kwargs` to `{}`",
                        self.method
                    ))),
                );
            }
            Some(_) => {}
        }
    }
}
