//! Arithmetic and comparison expressions.
//!
//! An expression is a right-leaning chain: a leading operand optionally
//! followed by an operation and another expression. Tree shape is the only
//! precedence mechanism, so `x - y + 1` means `x - (y + 1)`.

use crate::error::{BuildError, EvalError};
use crate::value::Value;
use crate::variables::Variables;
use num_traits::{CheckedAdd, CheckedMul, CheckedSub};
use std::fmt;
use std::str::FromStr;

/// Leaf of an expression: a variable reference or a literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Var(String),
    Lit(Value),
}

impl Operand {
    fn evaluate(&self, vars: &Variables) -> Result<Value, EvalError> {
        match self {
            Operand::Var(name) => vars.get(name),
            Operand::Lit(value) => Ok(*value),
        }
    }
}

impl From<&str> for Operand {
    fn from(name: &str) -> Self {
        Operand::Var(name.to_string())
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Lit(value)
    }
}

impl From<i128> for Operand {
    fn from(value: i128) -> Self {
        Operand::Lit(Value::Int(value))
    }
}

impl From<bool> for Operand {
    fn from(value: bool) -> Self {
        Operand::Lit(Value::Bool(value))
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Var(name) => write!(f, "{name}"),
            Operand::Lit(value) => write!(f, "{value}"),
        }
    }
}

/// Binary operations supported by expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Mul,
    Add,
    Sub,
    Eq,
    Gt,
    Lt,
}

impl BinOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Mul => "*",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Eq => "==",
            BinOp::Gt => ">",
            BinOp::Lt => "<",
        }
    }
}

impl FromStr for BinOp {
    type Err = BuildError;

    fn from_str(symbol: &str) -> Result<Self, Self::Err> {
        match symbol {
            "*" => Ok(BinOp::Mul),
            "+" => Ok(BinOp::Add),
            "-" => Ok(BinOp::Sub),
            "==" => Ok(BinOp::Eq),
            ">" => Ok(BinOp::Gt),
            "<" => Ok(BinOp::Lt),
            _ => Err(BuildError::InvalidOperation(symbol.to_string())),
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Expression tree evaluated against the variable table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    operand: Operand,
    tail: Option<(BinOp, Box<Expr>)>,
}

impl Expr {
    /// Leaf referencing variable `name`.
    pub fn var(name: &str) -> Self {
        Self {
            operand: Operand::from(name),
            tail: None,
        }
    }

    /// Leaf holding a literal value.
    pub fn lit(value: impl Into<Value>) -> Self {
        Self {
            operand: Operand::Lit(value.into()),
            tail: None,
        }
    }

    /// Internal node `operand op rhs`.
    pub fn binary(operand: impl Into<Operand>, op: BinOp, rhs: Expr) -> Self {
        Self {
            operand: operand.into(),
            tail: Some((op, Box::new(rhs))),
        }
    }

    /// Like [`Expr::binary`], with the operation given by its symbol.
    ///
    /// # Returns
    /// * `Ok(Expr)` - The expression node
    /// * `Err(BuildError::InvalidOperation)` - If `symbol` is not a supported operation
    pub fn with_symbol(
        operand: impl Into<Operand>,
        symbol: &str,
        rhs: Expr,
    ) -> Result<Self, BuildError> {
        Ok(Self::binary(operand, symbol.parse()?, rhs))
    }

    /// Evaluates the expression.
    ///
    /// Both sides of every operation are evaluated, left operand first; no
    /// operation short-circuits.
    ///
    /// # Returns
    /// * `Ok(Value)` - The computed value
    /// * `Err(EvalError)` - If a variable is unbound or the operation fails
    pub fn evaluate(&self, vars: &Variables) -> Result<Value, EvalError> {
        let left = self.operand.evaluate(vars)?;
        match &self.tail {
            None => Ok(left),
            Some((op, rhs)) => {
                let right = rhs.evaluate(vars)?;
                op.eval(left, right)
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.operand)?;
        if let Some((op, rhs)) = &self.tail {
            if rhs.tail.is_some() {
                write!(f, " {op} ({rhs})")?;
            } else {
                write!(f, " {op} {rhs}")?;
            }
        }
        Ok(())
    }
}

/// Trait for evaluating binary operations on values.
pub trait BinaryEval {
    /// Evaluates a binary operation on two values.
    ///
    /// # Arguments
    /// * `left` - Left operand value
    /// * `right` - Right operand value
    ///
    /// # Returns
    /// * `Ok(Value)` - Result of the operation
    /// * `Err(EvalError)` - If the operands don't fit the operation or it overflows
    fn eval(&self, left: Value, right: Value) -> Result<Value, EvalError>;
}

impl BinaryEval for BinOp {
    fn eval(&self, left: Value, right: Value) -> Result<Value, EvalError> {
        match (left, right) {
            (Value::Int(l), Value::Int(r)) => eval_int_binop(*self, l, r),
            // Equality across kinds is false rather than a mismatch.
            (l, r) if *self == BinOp::Eq => Ok(Value::Bool(l == r)),
            _ => Err(EvalError::TypeMismatch {
                op: self.symbol(),
                left,
                right,
            }),
        }
    }
}

/// Evaluates a binary operation on integers.
fn eval_int_binop(op: BinOp, left: i128, right: i128) -> Result<Value, EvalError> {
    match op {
        BinOp::Eq => Ok(Value::Bool(left == right)),
        BinOp::Gt => Ok(Value::Bool(left > right)),
        BinOp::Lt => Ok(Value::Bool(left < right)),
        BinOp::Add | BinOp::Sub | BinOp::Mul => checked_arith(op, left, right)
            .map(Value::Int)
            .ok_or(EvalError::Overflow {
                op: op.symbol(),
                left: Value::Int(left),
                right: Value::Int(right),
            }),
    }
}

fn checked_arith<T>(op: BinOp, left: T, right: T) -> Option<T>
where
    T: CheckedAdd + CheckedSub + CheckedMul,
{
    match op {
        BinOp::Add => left.checked_add(&right),
        BinOp::Sub => left.checked_sub(&right),
        BinOp::Mul => left.checked_mul(&right),
        BinOp::Eq | BinOp::Gt | BinOp::Lt => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars() -> Variables {
        [("x", 12), ("y", 18)].into_iter().collect()
    }

    #[test]
    fn test_leaf_evaluation() {
        assert_eq!(Expr::var("x").evaluate(&vars()), Ok(Value::Int(12)));
        assert_eq!(Expr::lit(true).evaluate(&vars()), Ok(Value::Bool(true)));
    }

    #[test]
    fn test_undefined_variable() {
        let expr = Expr::binary("x", BinOp::Add, Expr::var("z"));
        assert_eq!(
            expr.evaluate(&vars()),
            Err(EvalError::UndefinedVariable("z".to_string()))
        );
    }

    #[test]
    fn test_arithmetic_and_comparisons() {
        let vars = vars();
        let eval = |op, rhs: Expr| Expr::binary("x", op, rhs).evaluate(&vars).unwrap();
        assert_eq!(eval(BinOp::Sub, Expr::var("y")), Value::Int(-6));
        assert_eq!(eval(BinOp::Mul, Expr::lit(3)), Value::Int(36));
        assert_eq!(eval(BinOp::Eq, Expr::lit(12)), Value::Bool(true));
        assert_eq!(eval(BinOp::Lt, Expr::var("y")), Value::Bool(true));
        assert_eq!(eval(BinOp::Gt, Expr::var("y")), Value::Bool(false));
    }

    #[test]
    fn test_right_leaning_chain() {
        // x - (y + 1)
        let expr = Expr::binary("x", BinOp::Sub, Expr::binary("y", BinOp::Add, Expr::lit(1)));
        assert_eq!(expr.evaluate(&vars()), Ok(Value::Int(-7)));
        assert_eq!(expr.to_string(), "x - (y + 1)");
    }

    #[test]
    fn test_right_operand_always_evaluated() {
        // The left side alone decides nothing: an unbound name on the right
        // still fails even for a comparison.
        let expr = Expr::binary(false, BinOp::Eq, Expr::var("missing"));
        assert!(matches!(
            expr.evaluate(&vars()),
            Err(EvalError::UndefinedVariable(_))
        ));
    }

    #[test]
    fn test_type_mismatch() {
        let expr = Expr::binary(true, BinOp::Add, Expr::lit(1));
        assert!(matches!(
            expr.evaluate(&vars()),
            Err(EvalError::TypeMismatch { op: "+", .. })
        ));
        let expr = Expr::binary(true, BinOp::Eq, Expr::lit(false));
        assert_eq!(expr.evaluate(&vars()), Ok(Value::Bool(false)));
        let expr = Expr::binary(true, BinOp::Lt, Expr::lit(1));
        assert!(matches!(
            expr.evaluate(&vars()),
            Err(EvalError::TypeMismatch { op: "<", .. })
        ));
    }

    #[test]
    fn test_equality_across_kinds() {
        let expr = Expr::binary(1, BinOp::Eq, Expr::lit(true));
        assert_eq!(expr.evaluate(&vars()), Ok(Value::Bool(false)));
        let expr = Expr::binary("x", BinOp::Eq, Expr::binary(false, BinOp::Eq, Expr::lit(false)));
        assert_eq!(expr.evaluate(&vars()), Ok(Value::Bool(false)));
    }

    #[test]
    fn test_display_parenthesizes_nested_tail() {
        let leaf = Expr::binary("x", BinOp::Mul, Expr::lit(2));
        assert_eq!(leaf.to_string(), "x * 2");
        let nested = Expr::binary(
            "a",
            BinOp::Eq,
            Expr::binary("b", BinOp::Sub, Expr::binary("c", BinOp::Add, Expr::lit(1))),
        );
        assert_eq!(nested.to_string(), "a == (b - (c + 1))");
    }

    #[test]
    fn test_overflow() {
        let expr = Expr::binary(i128::MAX, BinOp::Add, Expr::lit(1));
        assert!(matches!(
            expr.evaluate(&vars()),
            Err(EvalError::Overflow { op: "+", .. })
        ));
    }

    #[test]
    fn test_invalid_symbol() {
        assert_eq!(
            Expr::with_symbol("x", "/", Expr::var("y")),
            Err(BuildError::InvalidOperation("/".to_string()))
        );
        let expr = Expr::with_symbol("x", "==", Expr::var("y")).unwrap();
        assert_eq!(expr, Expr::binary("x", BinOp::Eq, Expr::var("y")));
    }
}
