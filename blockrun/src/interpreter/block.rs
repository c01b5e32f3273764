//! Basic blocks and the assignments they hold.

use crate::error::EvalError;
use crate::interpreter::expr::Expr;
use crate::interpreter::jump::{Flow, Jump};
use crate::value::Label;
use crate::variables::Variables;
use smallvec::SmallVec;
use std::fmt;
use tracing::debug;

/// Binds the value of one expression to one variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    target: String,
    expr: Expr,
}

impl Assignment {
    pub fn new(target: &str, expr: Expr) -> Self {
        Self {
            target: target.to_string(),
            expr,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Evaluates the expression and stores the result, whatever its kind.
    pub fn evaluate(&self, vars: &mut Variables) -> Result<(), EvalError> {
        debug!("Executing assignment: {self}");
        let value = self.expr.evaluate(vars)?;
        vars.set(&self.target, value);
        Ok(())
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} := {}", self.target, self.expr)
    }
}

/// Straight-line assignments ending in exactly one jump.
///
/// A block is entered only through its label and left only through its jump;
/// it never falls through to the next declared block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicBlock {
    label: Label,
    assignments: SmallVec<[Assignment; 4]>,
    jump: Jump,
}

impl BasicBlock {
    pub fn new(label: Label, assignments: impl IntoIterator<Item = Assignment>, jump: Jump) -> Self {
        Self {
            label,
            assignments: assignments.into_iter().collect(),
            jump,
        }
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn jump(&self) -> &Jump {
        &self.jump
    }

    /// Runs the assignments in declaration order, then the terminating jump.
    ///
    /// # Returns
    /// * `Ok(Flow)` - The jump's decision, unchanged
    /// * `Err(EvalError)` - The first failure; later assignments are not run
    pub fn evaluate(&self, vars: &mut Variables) -> Result<Flow, EvalError> {
        debug!("Executing block {}", self.label);

        for assignment in &self.assignments {
            assignment.evaluate(vars)?;
        }

        self.jump.evaluate(vars)
    }
}

impl fmt::Display for BasicBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.label)?;
        for assignment in &self.assignments {
            writeln!(f, "    {assignment}")?;
        }
        write!(f, "    {}", self.jump)
    }
}
