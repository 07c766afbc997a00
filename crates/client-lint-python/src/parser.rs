//! Python source lowering using Tree-sitter.

use client_lint_core::{
    ClassDef, FunctionDef, Module, ParamKind, Parameter, ParameterList, ParseError, ReturnShape,
    SourceParser, Span, Stmt,
};
use tree_sitter::{Language, Node, Parser};

use crate::shape;

/// Statements and clauses whose bodies may hold definitions without opening a scope.
const COMPOUND_KINDS: &[&str] = &[
    "block",
    "if_statement",
    "elif_clause",
    "else_clause",
    "for_statement",
    "while_statement",
    "try_statement",
    "except_clause",
    "except_group_clause",
    "finally_clause",
    "with_statement",
    "match_statement",
    "case_clause",
];

/// Nodes that open a new scope; returns and yields inside them belong elsewhere.
const SCOPE_KINDS: &[&str] = &["function_definition", "class_definition", "lambda"];

/// Lowers Python source into the client-lint syntax model.
pub struct PythonParser {
    language: Language,
}

impl PythonParser {
    /// Creates a new Python parser.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }
}

impl Default for PythonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser for PythonParser {
    fn language_id(&self) -> &'static str {
        "python"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["py", "pyi"]
    }

    fn parse(&self, source: &str) -> Result<Module, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::Setup(e.to_string()))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseError::Syntax("parser produced no tree".to_string()))?;
        let root = tree.root_node();
        if root.has_error() {
            tracing::debug!("Source contains syntax errors, lowering recovered tree");
        }

        let lowering = Lowering {
            src: source.as_bytes(),
        };
        Ok(Module::new(lowering.body(&root)))
    }
}

struct Lowering<'s> {
    src: &'s [u8],
}

impl Lowering<'_> {
    fn text(&self, node: &Node<'_>) -> String {
        node.utf8_text(self.src).unwrap_or("").to_owned()
    }

    fn span(node: &Node<'_>) -> Span {
        let start = node.start_position();
        Span::new(
            start.row + 1,
            start.column + 1,
            node.start_byte(),
            node.end_byte() - node.start_byte(),
        )
    }

    /// Definitions found among the statements of `node`.
    fn body(&self, node: &Node<'_>) -> Vec<Stmt> {
        let mut out = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if let Some(stmt) = self.stmt(&child) {
                out.push(stmt);
            }
        }
        out
    }

    fn stmt(&self, node: &Node<'_>) -> Option<Stmt> {
        match node.kind() {
            "class_definition" => self.class(node).map(Stmt::Class),
            "function_definition" => self.function(node).map(Stmt::Function),
            "decorated_definition" => node
                .child_by_field_name("definition")
                .and_then(|def| self.stmt(&def)),
            kind if COMPOUND_KINDS.contains(&kind) => {
                let mut inner = Vec::new();
                self.compound(node, &mut inner);
                (!inner.is_empty()).then_some(Stmt::Block(inner))
            }
            _ => None,
        }
    }

    /// Flattens nested clauses and blocks of a compound statement.
    fn compound(&self, node: &Node<'_>, out: &mut Vec<Stmt>) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if COMPOUND_KINDS.contains(&child.kind()) {
                self.compound(&child, out);
            } else if let Some(stmt) = self.stmt(&child) {
                out.push(stmt);
            }
        }
    }

    fn class(&self, node: &Node<'_>) -> Option<ClassDef> {
        let name = node.child_by_field_name("name")?;
        let mut class = ClassDef::new(self.text(&name), Self::span(&name));
        if let Some(body) = node.child_by_field_name("body") {
            class.body = self.body(&body);
        }
        Some(class)
    }

    fn function(&self, node: &Node<'_>) -> Option<FunctionDef> {
        let name = node.child_by_field_name("name")?;
        let mut func = FunctionDef::without_parameters(self.text(&name), Self::span(&name));

        func.parameters = node
            .child_by_field_name("parameters")
            .filter(|p| !p.is_missing())
            .map(|p| self.parameters(&p));
        func.return_annotation = node
            .child_by_field_name("return_type")
            .map(|t| self.text(&t));

        if let Some(body) = node.child_by_field_name("body") {
            func.body = self.body(&body);
            let mut flow = Flow::default();
            Self::scan_flow(&body, &mut flow);
            func.returns = flow.returns;
            func.is_generator = flow.yields;
        }

        Some(func)
    }

    fn parameters(&self, node: &Node<'_>) -> ParameterList {
        let mut list = ParameterList::default();
        let mut kind = ParamKind::PositionalOrKeyword;

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "identifier" => list.params.push(Parameter::new(self.text(&child)).kind(kind)),
                "default_parameter" | "typed_default_parameter" => {
                    if let Some(name) = child.child_by_field_name("name") {
                        list.params.push(Parameter::new(self.text(&name)).kind(kind));
                    }
                }
                "typed_parameter" => {
                    if self.typed_parameter(&child, kind, &mut list) {
                        kind = ParamKind::KeywordOnly;
                    }
                }
                "list_splat_pattern" => {
                    list.vararg = self.splat_name(&child);
                    kind = ParamKind::KeywordOnly;
                }
                "dictionary_splat_pattern" => list.kwarg = self.splat_name(&child),
                "keyword_separator" => kind = ParamKind::KeywordOnly,
                "positional_separator" => {
                    for param in &mut list.params {
                        param.kind = ParamKind::PositionalOnly;
                    }
                }
                _ => {}
            }
        }

        list
    }

    /// `name: T`, `*args: T` or `**kwargs: T`. Returns true for `*args`.
    fn typed_parameter(&self, node: &Node<'_>, kind: ParamKind, list: &mut ParameterList) -> bool {
        let mut cursor = node.walk();
        let Some(first) = node.named_children(&mut cursor).next() else {
            return false;
        };
        match first.kind() {
            "identifier" => list.params.push(Parameter::new(self.text(&first)).kind(kind)),
            "list_splat_pattern" => {
                list.vararg = self.splat_name(&first);
                return true;
            }
            "dictionary_splat_pattern" => list.kwarg = self.splat_name(&first),
            _ => {}
        }
        false
    }

    fn splat_name(&self, node: &Node<'_>) -> Option<String> {
        let mut cursor = node.walk();
        let name = node.named_children(&mut cursor).next();
        name.map(|n| self.text(&n))
    }

    /// Collects `return` shapes and `yield`s that belong to the enclosing function.
    fn scan_flow(node: &Node<'_>, flow: &mut Flow) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "return_statement" => {
                    flow.returns.push(shape::of_return(&child));
                    Self::scan_flow(&child, flow);
                }
                "yield" => {
                    flow.yields = true;
                    Self::scan_flow(&child, flow);
                }
                kind if SCOPE_KINDS.contains(&kind) => {}
                _ => Self::scan_flow(&child, flow),
            }
        }
    }
}

#[derive(Default)]
struct Flow {
    returns: Vec<ReturnShape>,
    yields: bool,
}
