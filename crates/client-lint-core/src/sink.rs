//! Output channel for violations.

use crate::types::{LintResult, Violation};

/// Append-only channel that rules report violations to.
///
/// Violations arrive in visit order; implementations must not reorder them.
pub trait DiagnosticSink {
    /// Records one violation.
    fn report(&mut self, violation: Violation);
}

impl DiagnosticSink for Vec<Violation> {
    fn report(&mut self, violation: Violation) {
        self.push(violation);
    }
}

impl DiagnosticSink for LintResult {
    fn report(&mut self, violation: Violation) {
        self.violations.push(violation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageId;
    use crate::types::{Location, Severity};
    use std::path::PathBuf;

    fn violation(id: MessageId) -> Violation {
        Violation::new(
            id,
            "test",
            Severity::Warning,
            Location::new(PathBuf::from("a.py"), 1, 1),
        )
    }

    #[test]
    fn vec_sink_keeps_report_order() {
        let mut sink: Vec<Violation> = Vec::new();
        let dyn_sink: &mut dyn DiagnosticSink = &mut sink;
        dyn_sink.report(violation(MessageId::MissingFactoryMethod));
        dyn_sink.report(violation(MessageId::MissingConfigParameter));

        let ids: Vec<MessageId> = sink.iter().map(|v| v.id).collect();
        assert_eq!(
            ids,
            vec![
                MessageId::MissingFactoryMethod,
                MessageId::MissingConfigParameter
            ]
        );
    }

    #[test]
    fn lint_result_is_a_sink() {
        let mut result = LintResult::new();
        result.report(violation(MessageId::IncorrectReturnType));
        assert_eq!(result.violations.len(), 1);
    }
}
