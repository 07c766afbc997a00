//! Language-neutral syntax model consumed by rules.
//!
//! Front ends (see `client-lint-python`) lower a parsed source file into a
//! [`Module`]. The model keeps only what the client conventions look at:
//! class and function definitions, parameter lists, return shapes, and the
//! compound statements that contain nested definitions.

use thiserror::Error;

/// Suffix that marks a class as a client type.
pub const CLIENT_SUFFIX: &str = "Client";

/// Source position of a definition's name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset of the name.
    pub offset: usize,
    /// Length of the name in bytes.
    pub length: usize,
}

impl Span {
    /// Creates a span from explicit values.
    #[must_use]
    pub fn new(line: usize, column: usize, offset: usize, length: usize) -> Self {
        Self {
            line,
            column,
            offset,
            length,
        }
    }
}

/// A parsed source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Module {
    /// Top-level statements that carry definitions.
    pub body: Vec<Stmt>,
}

impl Module {
    /// Creates a module from its top-level statements.
    #[must_use]
    pub fn new(body: Vec<Stmt>) -> Self {
        Self { body }
    }
}

/// Statements the traversal cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `class Name: ...`
    Class(ClassDef),
    /// `def name(...): ...` (sync or async)
    Function(FunctionDef),
    /// Body of a compound statement (`if`, `try`, `with`, ...).
    ///
    /// Blocks group nested definitions but do not open a scope.
    Block(Vec<Stmt>),
}

/// A class definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDef {
    /// Class name.
    pub name: String,
    /// Statements in the class body.
    pub body: Vec<Stmt>,
    /// Location of the class name.
    pub span: Span,
}

impl ClassDef {
    /// Creates an empty class definition.
    #[must_use]
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            body: Vec::new(),
            span,
        }
    }

    /// Appends a statement to the class body.
    #[must_use]
    pub fn with_stmt(mut self, stmt: Stmt) -> Self {
        self.body.push(stmt);
        self
    }

    /// Whether the class name marks it as a client type.
    #[must_use]
    pub fn is_client_type(&self) -> bool {
        self.name.ends_with(CLIENT_SUFFIX)
    }

    /// Functions defined directly in the class body, in source order.
    ///
    /// Blocks are flattened; nested functions and nested classes are not.
    #[must_use]
    pub fn methods(&self) -> Vec<&FunctionDef> {
        let mut out = Vec::new();
        collect_functions(&self.body, &mut out);
        out
    }

    /// First method with the given name.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&FunctionDef> {
        self.methods().into_iter().find(|f| f.name == name)
    }
}

fn collect_functions<'a>(stmts: &'a [Stmt], out: &mut Vec<&'a FunctionDef>) {
    for stmt in stmts {
        match stmt {
            Stmt::Function(func) => out.push(func),
            Stmt::Block(inner) => collect_functions(inner, out),
            Stmt::Class(_) => {}
        }
    }
}

/// How a parameter may be passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Declared before a `/` separator.
    PositionalOnly,
    /// Regular parameter.
    PositionalOrKeyword,
    /// Declared after `*` or `*args`.
    KeywordOnly,
}

/// A named parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Passing convention.
    pub kind: ParamKind,
}

impl Parameter {
    /// Creates a positional-or-keyword parameter.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::PositionalOrKeyword,
        }
    }

    /// Sets the passing convention.
    #[must_use]
    pub fn kind(mut self, kind: ParamKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Parameters of a function signature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterList {
    /// Named parameters in declaration order.
    pub params: Vec<Parameter>,
    /// Name of the `*args` parameter, if any.
    pub vararg: Option<String>,
    /// Name of the `**kwargs` parameter, if any.
    pub kwarg: Option<String>,
}

impl ParameterList {
    /// Creates a list of positional-or-keyword parameters.
    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            params: names.into_iter().map(Parameter::new).collect(),
            vararg: None,
            kwarg: None,
        }
    }

    /// Sets the `**kwargs` parameter.
    #[must_use]
    pub fn with_kwarg(mut self, name: impl Into<String>) -> Self {
        self.kwarg = Some(name.into());
        self
    }

    /// Sets the `*args` parameter.
    #[must_use]
    pub fn with_vararg(mut self, name: impl Into<String>) -> Self {
        self.vararg = Some(name.into());
        self
    }

    /// Whether any named parameter is called `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.params.iter().any(|p| p.name == name)
    }

    /// Whether the signature collects arbitrary keyword arguments.
    #[must_use]
    pub fn has_variadic_keyword(&self) -> bool {
        self.kwarg.is_some()
    }
}

/// Structural shape of a `return` statement's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnShape {
    /// `return` with no value.
    Bare,
    /// `return None`
    None,
    /// List, tuple or set literal, comprehension, generator expression.
    Collection,
    /// String, number, boolean, dict literal or dict comprehension.
    Scalar,
    /// Anything whose shape cannot be told from syntax (calls, names, ...).
    Opaque,
}

/// A function or method definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDef {
    /// Function name.
    pub name: String,
    /// Signature, `None` when the front end could not recover it.
    pub parameters: Option<ParameterList>,
    /// Source text of the return annotation.
    pub return_annotation: Option<String>,
    /// Shapes of this function's own `return` statements.
    pub returns: Vec<ReturnShape>,
    /// Whether this function's own body contains `yield`.
    pub is_generator: bool,
    /// Statements in the body that carry nested definitions.
    pub body: Vec<Stmt>,
    /// Location of the function name.
    pub span: Span,
}

impl FunctionDef {
    /// Creates a function with the given signature.
    #[must_use]
    pub fn new(name: impl Into<String>, parameters: ParameterList, span: Span) -> Self {
        Self {
            name: name.into(),
            parameters: Some(parameters),
            return_annotation: None,
            returns: Vec::new(),
            is_generator: false,
            body: Vec::new(),
            span,
        }
    }

    /// Creates a function whose parameter list is missing.
    #[must_use]
    pub fn without_parameters(name: impl Into<String>, span: Span) -> Self {
        Self {
            parameters: None,
            ..Self::new(name, ParameterList::default(), span)
        }
    }

    /// Sets the return annotation text.
    #[must_use]
    pub fn returning(mut self, annotation: impl Into<String>) -> Self {
        self.return_annotation = Some(annotation.into());
        self
    }

    /// Records a `return` statement shape.
    #[must_use]
    pub fn with_return(mut self, shape: ReturnShape) -> Self {
        self.returns.push(shape);
        self
    }

    /// Appends a nested statement.
    #[must_use]
    pub fn with_stmt(mut self, stmt: Stmt) -> Self {
        self.body.push(stmt);
        self
    }

    /// Whether the function declares a parameter called `name`.
    ///
    /// A missing parameter list never satisfies the requirement.
    #[must_use]
    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.as_ref().is_some_and(|p| p.contains(name))
    }

    /// Whether the function takes `**kwargs`.
    #[must_use]
    pub fn has_variadic_keyword(&self) -> bool {
        self.parameters
            .as_ref()
            .is_some_and(ParameterList::has_variadic_keyword)
    }
}

/// Errors produced by a [`SourceParser`].
#[derive(Debug, Error)]
pub enum ParseError {
    /// The parser backend could not be initialised.
    #[error("parser setup failed: {0}")]
    Setup(String),
    /// The source could not be parsed at all.
    #[error("failed to parse source: {0}")]
    Syntax(String),
}

/// Turns source text into a [`Module`].
///
/// Implement this to plug a language front end into the analyzer.
pub trait SourceParser: Send + Sync {
    /// Language identifier (e.g., `"python"`).
    fn language_id(&self) -> &'static str;

    /// File extensions handled, without the dot (e.g., `&["py", "pyi"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Parses one file.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when no tree can be produced.
    fn parse(&self, source: &str) -> Result<Module, ParseError>;
}
