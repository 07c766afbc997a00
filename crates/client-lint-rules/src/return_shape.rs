//! Rule checking that `get_*` and `list_*` client methods return what their
//! names promise.
//!
//! A `get_*` method returns one item; a `list_*` method returns a sequence
//! or pager. Evidence comes from the return annotation, `yield`, and the
//! literal shape of each `return` value. Values whose shape cannot be told
//! from syntax never decide.

use client_lint_core::{
    DiagnosticSink, FunctionDef, Location, MessageId, ReturnShape, Rule, Severity, Suggestion,
    Violation, VisitContext,
};

/// Checker name for client-return-value.
pub const NAME: &str = "client-return-value";

/// Outer type names that denote a sequence of items.
const SEQUENCE_TYPES: &[&str] = &[
    "list",
    "List",
    "Sequence",
    "MutableSequence",
    "Iterable",
    "Iterator",
    "AsyncIterable",
    "AsyncIterator",
    "Generator",
    "AsyncGenerator",
    "tuple",
    "Tuple",
    "set",
    "Set",
    "frozenset",
    "FrozenSet",
    "Collection",
    "ItemPaged",
    "AsyncItemPaged",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expectation {
    Single,
    Many,
}

impl Expectation {
    fn of(name: &str) -> Option<Self> {
        if name.starts_with("get_") {
            Some(Self::Single)
        } else if name.starts_with("list_") {
            Some(Self::Many)
        } else {
            None
        }
    }
}

/// Flags `get_*` methods returning sequences and `list_*` methods returning single values.
#[derive(Debug, Clone)]
pub struct ReturnMatchesName {
    /// Severity of reported violations.
    pub severity: Severity,
}

impl Default for ReturnMatchesName {
    fn default() -> Self {
        Self::new()
    }
}

impl ReturnMatchesName {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for ReturnMatchesName {
    fn name(&self) -> &'static str {
        NAME
    }

    fn messages(&self) -> &'static [MessageId] {
        &[MessageId::IncorrectReturnType]
    }

    fn description(&self) -> &'static str {
        "get_* methods return one item, list_* methods return a sequence"
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
        if !ctx.is_client_method() {
            return;
        }
        let Some(expected) = Expectation::of(&func.name) else {
            return;
        };
        let Some(reason) = contradiction(expected, func) else {
            return;
        };

        tracing::trace!(method = %func.name, reason, "Return shape contradicts name");
        let hint = match expected {
            Expectation::Single => "`get_*` methods should return a single item",
            Expectation::Many => "`list_*` methods should return a list or pager",
        };
        sink.report(
            Violation::new(
                MessageId::IncorrectReturnType,
                NAME,
                self.severity,
                Location::from_span(ctx.file.relative_path.clone(), func.span),
            )
            .with_suggestion(Suggestion::new(format!("{hint} ({reason})"))),
        );
    }
}

/// First piece of evidence that contradicts `expected`, if any.
fn contradiction(expected: Expectation, func: &FunctionDef) -> Option<&'static str> {
    let annotated = func.return_annotation.as_deref().map(outer_type_name);
    match expected {
        Expectation::Single => {
            if annotated.is_some_and(is_sequence_type) {
                return Some("annotated as a sequence");
            }
            if func.is_generator {
                return Some("yields values");
            }
            func.returns
                .contains(&ReturnShape::Collection)
                .then_some("returns a collection")
        }
        Expectation::Many => {
            if annotated.is_some_and(|name| !is_sequence_type(name)) {
                return Some("annotated as a single value");
            }
            func.returns
                .iter()
                .any(|shape| matches!(shape, ReturnShape::Scalar | ReturnShape::None))
                .then_some("returns a single value")
        }
    }
}

fn is_sequence_type(name: &str) -> bool {
    SEQUENCE_TYPES.contains(&name)
}

/// Unqualified outer type name of an annotation.
///
/// `"Optional[typing.List[str]]"` becomes `List`, `'ItemPaged[Blob]'` becomes
/// `ItemPaged`, `Blob | None` becomes `Blob`.
fn outer_type_name(annotation: &str) -> &str {
    let mut text = strip_quotes(annotation.trim());

    loop {
        if let Some(left) = split_optional_union(text) {
            text = left;
            continue;
        }
        let (head, args) = match text.find('[') {
            Some(open) => (&text[..open], Some(&text[open + 1..])),
            None => (text, None),
        };
        let head = head.trim();
        let name = head.rsplit('.').next().unwrap_or(head);
        match args {
            Some(inner) if name == "Optional" => {
                text = strip_quotes(inner.strip_suffix(']').unwrap_or(inner).trim());
            }
            _ => return name,
        }
    }
}

/// `X | None` or `None | X` at the top level yields `X`.
fn split_optional_union(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '|' if depth == 0 => {
                let (left, right) = (text[..i].trim(), text[i + 1..].trim());
                return Some(if left == "None" { right } else { left });
            }
            _ => {}
        }
    }
    None
}

fn strip_quotes(text: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|t| t.strip_suffix(quote))
        {
            return inner.trim();
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_lint_core::{walk, FileContext, SourceParser};
    use client_lint_python::PythonParser;
    use std::path::Path;

    fn check_code(code: &str) -> Vec<Violation> {
        let module = PythonParser::new().parse(code).expect("Failed to parse");
        let ctx = FileContext::new(Path::new("client.py"), code, Path::new(""));
        let rule = ReturnMatchesName::new();
        let rules: [&dyn Rule; 1] = [&rule];
        let mut violations = Vec::new();
        walk(&module, &rules, &ctx, &mut violations).expect("balanced walk");
        violations
    }

    #[test]
    fn test_outer_type_name() {
        assert_eq!(outer_type_name("List[str]"), "List");
        assert_eq!(outer_type_name("Optional[typing.List[str]]"), "List");
        assert_eq!(outer_type_name("'ItemPaged[Blob]'"), "ItemPaged");
        assert_eq!(outer_type_name("\"Optional['Blob']\""), "Blob");
        assert_eq!(outer_type_name("azure.core.paging.ItemPaged[Blob]"), "ItemPaged");
        assert_eq!(outer_type_name("Blob | None"), "Blob");
        assert_eq!(outer_type_name("None | list[Blob]"), "list");
        assert_eq!(outer_type_name("None"), "None");
    }

    #[test]
    fn test_get_returning_list_literal() {
        let violations = check_code(
            r#"
class BlobClient:
    def get_blob(self, name):
        return [name]
"#,
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].code, "C4715");
        assert_eq!(violations[0].location.line, 3);
    }

    #[test]
    fn test_get_annotated_as_sequence() {
        let violations = check_code(
            r#"
class BlobClient:
    def get_blobs(self) -> Optional[List[Blob]]:
        return self._fetch()
"#,
        );
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_get_generator() {
        let violations = check_code(
            "class BlobClient:\n    def get_blob(self):\n        yield self._blob\n",
        );
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_get_single_value_is_fine() {
        let violations = check_code(
            r#"
class BlobClient:
    def get_blob(self, name) -> Blob:
        if not name:
            return None
        return self._client.get(name)

    def get_properties(self):
        return {"etag": self._etag}
"#,
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_list_annotated_as_sequence_is_fine() {
        let violations = check_code(
            r#"
class BlobClient:
    def list_blobs(self) -> List[Blob]:
        return self._list()

    def list_containers(self) -> "ItemPaged[Container]":
        return ItemPaged(self._fetch)
"#,
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_list_annotated_as_single_value() {
        let violations = check_code(
            r#"
class BlobClient:
    def list_blobs(self) -> Blob:
        return self._list()

    def list_tags(self) -> None:
        pass
"#,
        );
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_list_returning_scalar_or_none() {
        let violations = check_code(
            r#"
class BlobClient:
    def list_names(self):
        return ",".join(self._names)

    def list_blobs(self):
        if self._empty:
            return None
        return self._list()

    def list_tags(self):
        return "a,b"
"#,
        );
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].location.line, 6);
        assert_eq!(violations[1].location.line, 11);
    }

    #[test]
    fn test_one_diagnostic_per_method() {
        let violations = check_code(
            r#"
class BlobClient:
    def get_blobs(self) -> List[Blob]:
        if self._cached:
            return [b for b in self._cache]
        yield from self._list()
"#,
        );
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_ignores_outside_client_methods() {
        let violations = check_code(
            r#"
def get_blob():
    return [1]

class BlobHelper:
    def get_blob(self):
        return [1]

class BlobClient:
    def close(self):
        return [1]

    def get_blob(self):
        def list_parts():
            return "x"
        return self._get()
"#,
        );
        assert!(violations.is_empty());
    }
}
