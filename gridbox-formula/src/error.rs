//! Formula error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("integer literal out of range at offset {offset}")]
    IntegerOutOfRange { offset: usize },

    #[error("syntax error at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },

    #[error("unknown function '{name}' at offset {offset}")]
    UnknownFunction { name: String, offset: usize },

    #[error("{function}() expects {expected}, got {got} argument(s)")]
    Arity {
        function: &'static str,
        expected: &'static str,
        got: usize,
    },

    #[error("unknown variable: {0}")]
    UnknownVariable(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("arithmetic overflow")]
    Overflow,

    #[error("formula nested more than {} levels deep at offset {offset}", crate::parser::MAX_DEPTH)]
    TooDeep { offset: usize },
}

impl FormulaError {
    pub(crate) fn syntax(offset: usize, message: impl Into<String>) -> Self {
        FormulaError::Syntax {
            offset,
            message: message.into(),
        }
    }
}
