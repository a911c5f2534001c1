use std::fmt::Display;
use std::rc::Rc;

use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DeclarationKind {
    Variable,
    Function,
}

impl Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclarationKind::Variable => write!(f, "variable"),
            DeclarationKind::Function => write!(f, "function"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo by zero")]
    ModuloByZero,
}

/// Failures of a single [`Scope`](crate::scope::Scope) operation. They carry no
/// source position; the evaluator attaches one when converting them.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum ScopeError {
    #[error("{kind} `{name}` is already declared in this scope")]
    AlreadyDeclared { kind: DeclarationKind, name: Rc<str> },
    #[error("variable `{0}` is not declared")]
    UnboundVariable(Rc<str>),
}

#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum EvaluationError {
    #[error("line {line}: unknown variable `{name}`")]
    UnboundVariable { name: Rc<str>, line: usize },
    #[error("line {line}: unknown function `{name}`")]
    UnboundFunction { name: Rc<str>, line: usize },
    #[error("line {line}: {kind} `{name}` is already declared in this scope")]
    DuplicateDeclaration {
        kind: DeclarationKind,
        name: Rc<str>,
        line: usize,
    },
    #[error("line {line}: function `{name}` expects {expected} arguments, got {actual}")]
    ArityMismatch {
        name: Rc<str>,
        expected: usize,
        actual: usize,
        line: usize,
    },
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
    #[error("failed to write output: {0}")]
    Output(Rc<str>),
}

impl EvaluationError {
    pub fn from_scope(error: ScopeError, line: usize) -> Self {
        match error {
            ScopeError::AlreadyDeclared { kind, name } => {
                EvaluationError::DuplicateDeclaration { kind, name, line }
            }
            ScopeError::UnboundVariable(name) => EvaluationError::UnboundVariable { name, line },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let tests = vec![
            (
                EvaluationError::from_scope(ScopeError::UnboundVariable("x".into()), 3),
                "line 3: unknown variable `x`",
            ),
            (
                EvaluationError::from_scope(
                    ScopeError::AlreadyDeclared {
                        kind: DeclarationKind::Function,
                        name: "f".into(),
                    },
                    7,
                ),
                "line 7: function `f` is already declared in this scope",
            ),
            (
                EvaluationError::ArityMismatch {
                    name: "add".into(),
                    expected: 2,
                    actual: 3,
                    line: 1,
                },
                "line 1: function `add` expects 2 arguments, got 3",
            ),
            (
                EvaluationError::from(ArithmeticError::ModuloByZero),
                "modulo by zero",
            ),
        ];

        for (error, message) in tests {
            assert_eq!(error.to_string(), message);
        }
    }
}
