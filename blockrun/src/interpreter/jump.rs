//! Block terminators.

use crate::error::{BuildError, EvalError};
use crate::interpreter::expr::Expr;
use crate::value::{Label, Value};
use crate::variables::Variables;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// The single outgoing control-flow edge of a basic block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Jump {
    /// Always continue at the target block.
    Unconditional(Label),
    /// Continue at `if_true` when `test` holds, otherwise at `if_false`.
    Conditional {
        test: Expr,
        if_true: Label,
        if_false: Label,
    },
    /// Stop the program with the value of the expression.
    Return(Expr),
}

/// Kind tag of a [`Jump`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Unconditional,
    Conditional,
    Return,
}

impl FromStr for JumpKind {
    type Err = BuildError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "unconditional" => Ok(JumpKind::Unconditional),
            "condition" | "conditional" => Ok(JumpKind::Conditional),
            "return" => Ok(JumpKind::Return),
            _ => Err(BuildError::InvalidJumpKind(tag.to_string())),
        }
    }
}

impl fmt::Display for JumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JumpKind::Unconditional => "unconditional",
            JumpKind::Conditional => "conditional",
            JumpKind::Return => "return",
        })
    }
}

/// What to do after a block has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue(Label),
    Halt(Value),
}

impl Jump {
    pub fn unconditional(target: Label) -> Self {
        Jump::Unconditional(target)
    }

    pub fn conditional(test: Expr, if_true: Label, if_false: Label) -> Self {
        Jump::Conditional {
            test,
            if_true,
            if_false,
        }
    }

    pub fn ret(result: Expr) -> Self {
        Jump::Return(result)
    }

    pub fn kind(&self) -> JumpKind {
        match self {
            Jump::Unconditional(_) => JumpKind::Unconditional,
            Jump::Conditional { .. } => JumpKind::Conditional,
            Jump::Return(_) => JumpKind::Return,
        }
    }

    /// Decides where control goes next.
    ///
    /// # Returns
    /// * `Ok(Flow::Continue(label))` - For unconditional and conditional jumps
    /// * `Ok(Flow::Halt(value))` - For a return
    /// * `Err(EvalError)` - If the test or result expression fails, or the
    ///   test is not a boolean
    pub fn evaluate(&self, vars: &Variables) -> Result<Flow, EvalError> {
        debug!("Executing {} jump", self.kind());

        match self {
            Jump::Unconditional(target) => Ok(Flow::Continue(*target)),
            Jump::Conditional {
                test,
                if_true,
                if_false,
            } => match test.evaluate(vars)? {
                Value::Bool(true) => Ok(Flow::Continue(*if_true)),
                Value::Bool(false) => Ok(Flow::Continue(*if_false)),
                other => Err(EvalError::NonBooleanTest(other)),
            },
            Jump::Return(result) => result.evaluate(vars).map(Flow::Halt),
        }
    }
}

impl fmt::Display for Jump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Jump::Unconditional(target) => write!(f, "goto {target}"),
            Jump::Conditional {
                test,
                if_true,
                if_false,
            } => write!(f, "if {test} goto {if_true} else {if_false}"),
            Jump::Return(result) => write!(f, "return {result}"),
        }
    }
}
