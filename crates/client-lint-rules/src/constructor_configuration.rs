//! Rule requiring client constructors to accept a configuration object.
//!
//! # Rationale
//!
//! Clients share pipeline settings through a configuration object. A
//! constructor that cannot take one forces callers to rebuild it from
//! loose keyword arguments.
//!
//! # Configuration
//!
//! - `parameter`: name the constructor must declare (default: `configuration`)
//!
//! # Suppression
//!
//! - `# client-lint: allow(missing-configuration-constructor-parameter)` comment

use client_lint_core::{
    DiagnosticSink, FunctionDef, Location, MessageId, Rule, RuleConfig, Severity, Suggestion,
    Violation, VisitContext,
};

/// Checker name for constructor-configuration.
pub const NAME: &str = "constructor-configuration";

const CONSTRUCTOR: &str = "__init__";
const DEFAULT_PARAMETER: &str = "configuration";

/// Flags client constructors that lack a `configuration` parameter.
#[derive(Debug, Clone)]
pub struct ConstructorTakesConfiguration {
    /// Parameter the constructor must declare.
    pub parameter: String,
    /// Severity of reported violations.
    pub severity: Severity,
}

impl Default for ConstructorTakesConfiguration {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstructorTakesConfiguration {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parameter: DEFAULT_PARAMETER.to_string(),
            severity: Severity::Warning,
        }
    }

    /// Creates a rule from its `[rules.constructor-configuration]` table.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        let rule = Self::new().parameter_name(config.get_str("parameter", DEFAULT_PARAMETER));
        match config.severity {
            Some(severity) => rule.severity(severity),
            None => rule,
        }
    }

    /// Sets the required parameter name.
    #[must_use]
    pub fn parameter_name(mut self, name: impl Into<String>) -> Self {
        self.parameter = name.into();
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for ConstructorTakesConfiguration {
    fn name(&self) -> &'static str {
        NAME
    }

    fn messages(&self) -> &'static [MessageId] {
        &[MessageId::MissingConfigParameter]
    }

    fn description(&self) -> &'static str {
        "Client constructors must accept a configuration parameter"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check_function(
        &self,
        ctx: &VisitContext<'_>,
        func: &FunctionDef,
        sink: &mut dyn DiagnosticSink,
    ) {
        if func.name != CONSTRUCTOR || !ctx.is_client_method() {
            return;
        }
        if func.has_parameter(&self.parameter) {
            return;
        }

        let location = Location::from_span(ctx.file.relative_path.clone(), func.span);
        let mut violation =
            Violation::new(MessageId::MissingConfigParameter, NAME, self.severity, location);
        if self.parameter != DEFAULT_PARAMETER {
            violation = violation.with_message(format!(
                "Is missing a {} parameter.",
                self.parameter
            ));
        }
        sink.report(violation.with_suggestion(Suggestion::new(format!(
            "Add `{}=None` to the constructor signature",
            self.parameter
        ))));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_lint_core::{walk, FileContext, SourceParser};
    use client_lint_python::PythonParser;
    use std::path::Path;

    fn check_with(rule: &ConstructorTakesConfiguration, code: &str) -> Vec<Violation> {
        let module = PythonParser::new().parse(code).expect("Failed to parse");
        let ctx = FileContext::new(Path::new("client.py"), code, Path::new(""));
        let mut violations = Vec::new();
        let rules: [&dyn Rule; 1] = [rule];
        walk(&module, &rules, &ctx, &mut violations).expect("balanced walk");
        violations
    }

    fn check_code(code: &str) -> Vec<Violation> {
        check_with(&ConstructorTakesConfiguration::new(), code)
    }

    #[test]
    fn test_detects_missing_parameter() {
        let violations = check_code(
            r#"
class SomeClient():

    def __init__(self, some, arguments, **kwargs):
        pass
"#,
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].code, "C4712");
        assert_eq!(violations[0].location.line, 4);
        assert_eq!(violations[0].location.column, 9);
    }

    #[test]
    fn test_accepts_keyword_only_parameter() {
        let violations = check_code(
            r#"
class SomeClient():
    def __init__(self, endpoint, *, configuration=None, **kwargs):
        pass
"#,
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_ignores_non_client_class() {
        let violations = check_code(
            r#"
class SomethingElse():
    def __init__(self, some, arguments, **kwargs):
        pass
"#,
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_ignores_init_nested_in_method() {
        let violations = check_code(
            r#"
class SomeClient():
    def __init__(self, configuration, **kwargs):
        def __init__(hello):
            pass
"#,
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_nested_class_uses_innermost_scope() {
        let violations = check_code(
            r#"
class OuterClient:
    def __init__(self, configuration):
        pass

    class Helper:
        def __init__(self):
            pass

    class InnerClient:
        def __init__(self):
            pass
"#,
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 11);
    }

    #[test]
    fn test_kwargs_named_configuration_does_not_count() {
        let violations = check_code(
            "class SomeClient:\n    def __init__(self, **configuration):\n        pass\n",
        );
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_missing_parameter_list_is_reported() {
        use client_lint_core::{ClassDef, Module, Span, Stmt};

        let init = FunctionDef::without_parameters("__init__", Span::new(2, 9, 0, 8));
        let class = ClassDef::new("SomeClient", Span::new(1, 7, 0, 10))
            .with_stmt(Stmt::Function(init));
        let module = Module::new(vec![Stmt::Class(class)]);

        let ctx = FileContext::new(Path::new("client.py"), "", Path::new(""));
        let rule = ConstructorTakesConfiguration::new();
        let rules: [&dyn Rule; 1] = [&rule];
        let mut violations = Vec::new();
        walk(&module, &rules, &ctx, &mut violations).expect("balanced walk");

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].id, MessageId::MissingConfigParameter);
        assert_eq!(violations[0].location.line, 2);
    }

    #[test]
    fn test_custom_parameter_name() {
        let rule = ConstructorTakesConfiguration::new().parameter_name("config");
        let violations = check_with(
            &rule,
            "class SomeClient:\n    def __init__(self, configuration):\n        pass\n",
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Is missing a config parameter.");
    }
}
