//! Error types for program construction and evaluation.
//!
//! [`BuildError`] covers malformed programs and is reported while the program
//! is being assembled. [`EvalError`] covers conditions met while running; every
//! one of them is terminal for the run that produced it.

use crate::value::{Label, Value};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Unknown jump kind: `{0}`")]
    InvalidJumpKind(String),

    #[error("Unknown operation: `{0}`")]
    InvalidOperation(String),

    #[error("Re-defined label: `{0}`")]
    DuplicateLabel(Label),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("no such label {0}")]
    UnknownLabel(Label),

    #[error("variable `{0}` not declared")]
    UndefinedVariable(String),

    #[error("type mismatch: cannot apply `{op}` to {left} ({}) and {right} ({})", .left.kind(), .right.kind())]
    TypeMismatch {
        op: &'static str,
        left: Value,
        right: Value,
    },

    #[error("conditional test evaluated to non-boolean {0}")]
    NonBooleanTest(Value),

    #[error("integer overflow in `{left} {op} {right}`")]
    Overflow {
        op: &'static str,
        left: Value,
        right: Value,
    },

    #[error("failed to read value for `{name}`: {message}")]
    Input { name: String, message: String },
}
