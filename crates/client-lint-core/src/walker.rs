//! Depth-first traversal that drives rule evaluation.

use thiserror::Error;

use crate::context::{ContextStack, FileContext, Scope, VisitContext};
use crate::rule::Rule;
use crate::sink::DiagnosticSink;
use crate::syntax::{ClassDef, FunctionDef, Module, Stmt};

/// Contract violations detected while walking a tree.
///
/// These end the current file's traversal only.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TraversalError {
    /// A class exit was recorded with no class open.
    #[error("class scope closed with no class open")]
    UnbalancedScope,
    /// The walk finished with classes still open.
    #[error("traversal finished with {0} class scope(s) still open")]
    UnclosedScope(usize),
}

/// Walks `module` in pre-order and runs `rules` at every class and function.
///
/// A fresh [`ContextStack`] is created for the walk; violations reach
/// `sink` in visit order, a class before its members.
///
/// # Errors
///
/// Returns [`TraversalError`] if class entries and exits do not balance.
pub fn walk(
    module: &Module,
    rules: &[&dyn Rule],
    file: &FileContext<'_>,
    sink: &mut dyn DiagnosticSink,
) -> Result<(), TraversalError> {
    let mut walker = Walker {
        rules,
        file,
        stack: ContextStack::new(),
    };

    walker.visit_stmts(&module.body, Scope::Module, sink)?;

    if !walker.stack.is_empty() {
        return Err(TraversalError::UnclosedScope(walker.stack.depth()));
    }
    Ok(())
}

struct Walker<'a, 'f> {
    rules: &'a [&'a dyn Rule],
    file: &'a FileContext<'f>,
    stack: ContextStack,
}

impl Walker<'_, '_> {
    fn visit_stmts(
        &mut self,
        stmts: &[Stmt],
        scope: Scope,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<(), TraversalError> {
        for stmt in stmts {
            match stmt {
                Stmt::Class(class) => self.visit_class(class, scope, sink)?,
                Stmt::Function(func) => self.visit_function(func, scope, sink)?,
                Stmt::Block(inner) => self.visit_stmts(inner, scope, sink)?,
            }
        }
        Ok(())
    }

    fn visit_class(
        &mut self,
        class: &ClassDef,
        scope: Scope,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<(), TraversalError> {
        self.stack.enter_class(class);

        let ctx = VisitContext {
            file: self.file,
            scope,
            in_client: self.stack.current_is_client(),
        };
        for rule in self.rules {
            rule.check_class(&ctx, class, sink);
        }

        self.visit_stmts(&class.body, Scope::Class, sink)?;
        self.stack.exit_class()?;
        Ok(())
    }

    fn visit_function(
        &mut self,
        func: &FunctionDef,
        scope: Scope,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<(), TraversalError> {
        let ctx = VisitContext {
            file: self.file,
            scope,
            in_client: self.stack.current_is_client(),
        };
        for rule in self.rules {
            rule.check_function(&ctx, func, sink);
        }

        self.visit_stmts(&func.body, Scope::Function, sink)
    }
}
