//! Context types for rule execution.

use std::path::{Path, PathBuf};

use crate::syntax::ClassDef;
use crate::walker::TraversalError;

/// Context about the file being checked.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            content,
            relative_path,
        }
    }

    /// Dotted module name derived from the relative path (`pkg/sub/__init__.py` -> `pkg.sub`).
    #[must_use]
    pub fn module_name(&self) -> String {
        let mut parts: Vec<String> = self
            .relative_path
            .with_extension("")
            .components()
            .filter_map(|c| match c {
                std::path::Component::Normal(s) => s.to_str().map(String::from),
                _ => None,
            })
            .collect();

        if parts.last().is_some_and(|last| last == "__init__") {
            parts.pop();
        }

        parts.join(".")
    }
}

/// Kind of scope that directly encloses a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Top level of the module.
    Module,
    /// A class body.
    Class,
    /// A function body.
    Function,
}

/// Tracks whether the innermost enclosing class is a client type.
///
/// One entry is pushed per class entered and popped when the class body
/// has been traversed. The stack is empty at module level.
#[derive(Debug, Default)]
pub struct ContextStack {
    frames: Vec<bool>,
}

impl ContextStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records entry into `class`.
    pub fn enter_class(&mut self, class: &ClassDef) {
        self.frames.push(class.is_client_type());
    }

    /// Records exit from the innermost class and returns its entry.
    ///
    /// # Errors
    ///
    /// Returns [`TraversalError::UnbalancedScope`] if no class is open.
    pub fn exit_class(&mut self) -> Result<bool, TraversalError> {
        self.frames.pop().ok_or(TraversalError::UnbalancedScope)
    }

    /// Whether the innermost enclosing class is a client type.
    #[must_use]
    pub fn current_is_client(&self) -> bool {
        self.frames.last().copied().unwrap_or(false)
    }

    /// Number of open classes.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Whether traversal is at module level.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// What a rule sees at each visit.
#[derive(Debug, Clone, Copy)]
pub struct VisitContext<'a> {
    /// File being checked.
    pub file: &'a FileContext<'a>,
    /// Scope that directly encloses the visited node.
    pub scope: Scope,
    /// Whether the innermost enclosing class is a client type.
    ///
    /// For a class visit this is the class itself.
    pub in_client: bool,
}

impl VisitContext<'_> {
    /// Whether the visited function is a method of a client class.
    #[must_use]
    pub fn is_client_method(&self) -> bool {
        self.in_client && self.scope == Scope::Class
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Span;

    #[test]
    fn module_name_from_path() {
        let root = Path::new("/repo");
        let path = Path::new("/repo/azure/storage/_client.py");
        let ctx = FileContext::new(path, "", root);
        assert_eq!(ctx.relative_path, PathBuf::from("azure/storage/_client.py"));
        assert_eq!(ctx.module_name(), "azure.storage._client");

        let init = Path::new("/repo/azure/storage/__init__.py");
        assert_eq!(FileContext::new(init, "", root).module_name(), "azure.storage");
    }

    #[test]
    fn empty_stack_is_not_client() {
        let stack = ContextStack::new();
        assert!(stack.is_empty());
        assert!(!stack.current_is_client());
    }

    #[test]
    fn innermost_class_wins() {
        let mut stack = ContextStack::new();
        stack.enter_class(&ClassDef::new("BlobClient", Span::default()));
        assert!(stack.current_is_client());

        stack.enter_class(&ClassDef::new("Options", Span::default()));
        assert!(!stack.current_is_client());
        assert_eq!(stack.depth(), 2);

        assert_eq!(stack.exit_class().ok(), Some(false));
        assert!(stack.current_is_client());
        assert_eq!(stack.exit_class().ok(), Some(true));
        assert!(stack.is_empty());
    }

    #[test]
    fn exit_on_empty_stack_is_an_error() {
        let mut stack = ContextStack::new();
        assert!(matches!(
            stack.exit_class(),
            Err(TraversalError::UnbalancedScope)
        ));
    }
}
