//! Rule trait for defining convention checks.

use crate::context::VisitContext;
use crate::message::MessageId;
use crate::sink::DiagnosticSink;
use crate::syntax::{ClassDef, FunctionDef};
use crate::types::Severity;

/// A convention check evaluated during the syntax tree walk.
///
/// The walker calls [`Rule::check_class`] when it enters a class and
/// [`Rule::check_function`] when it enters a function, in pre-order. Rules
/// hold no traversal state; everything they need arrives in the
/// [`VisitContext`].
///
/// # Example
///
/// ```ignore
/// use client_lint_core::{ClassDef, DiagnosticSink, MessageId, Rule, VisitContext};
///
/// pub struct NoEmptyClients;
///
/// impl Rule for NoEmptyClients {
///     fn name(&self) -> &'static str { "no-empty-clients" }
///     fn messages(&self) -> &'static [MessageId] { &[MessageId::MissingFactoryMethod] }
///
///     fn check_class(&self, ctx: &VisitContext<'_>, class: &ClassDef, sink: &mut dyn DiagnosticSink) {
///         // ...
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this checker (e.g., "constructor-configuration").
    fn name(&self) -> &'static str;

    /// Messages this checker can emit.
    fn messages(&self) -> &'static [MessageId];

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Called on class entry, after the class has been pushed on the context stack.
    fn check_class(
        &self,
        _ctx: &VisitContext<'_>,
        _class: &ClassDef,
        _sink: &mut dyn DiagnosticSink,
    ) {
    }

    /// Called on function entry, before its body is walked.
    fn check_function(
        &self,
        _ctx: &VisitContext<'_>,
        _func: &FunctionDef,
        _sink: &mut dyn DiagnosticSink,
    ) {
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn messages(&self) -> &'static [MessageId] {
            &[MessageId::IncorrectReturnType]
        }
    }

    #[test]
    fn test_rule_defaults() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.description(), "");
        assert_eq!(rule.default_severity(), Severity::Warning);
        assert_eq!(rule.messages(), &[MessageId::IncorrectReturnType]);
    }
}
