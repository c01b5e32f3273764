//! Bundled sample program.

use crate::error::BuildError;
use crate::input::Read;
use crate::interpreter::block::{Assignment, BasicBlock};
use crate::interpreter::expr::{BinOp, Expr};
use crate::interpreter::jump::Jump;
use crate::interpreter::program::Program;
use crate::value::Label;

/// Subtraction-based greatest common divisor of the inputs `x` and `y`.
///
/// ```text
/// 1: if x == y goto 7 else 2
/// 2: if x < y goto 5 else 3
/// 3: x := x - y; goto 1
/// 5: y := y - x; goto 1
/// 7: return x
/// ```
pub fn gcd() -> Result<Program, BuildError> {
    let blocks = vec![
        BasicBlock::new(
            Label(1),
            [],
            Jump::conditional(Expr::binary("x", BinOp::Eq, Expr::var("y")), Label(7), Label(2)),
        ),
        BasicBlock::new(
            Label(2),
            [],
            Jump::conditional(Expr::binary("x", BinOp::Lt, Expr::var("y")), Label(5), Label(3)),
        ),
        BasicBlock::new(
            Label(3),
            [Assignment::new("x", Expr::binary("x", BinOp::Sub, Expr::var("y")))],
            Jump::unconditional(Label(1)),
        ),
        BasicBlock::new(
            Label(5),
            [Assignment::new("y", Expr::binary("y", BinOp::Sub, Expr::var("x")))],
            Jump::unconditional(Label(1)),
        ),
        BasicBlock::new(Label(7), [], Jump::ret(Expr::var("x"))),
    ];

    Program::new(Read::new(["x", "y"]), blocks)
}
