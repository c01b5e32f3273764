//! Blockrun Interpreter Library
//!
//! Interprets programs made of uniquely labeled basic blocks. Each block is a
//! straight-line list of assignments closed by exactly one jump: unconditional,
//! conditional, or return. Execution starts at the first declared block and
//! follows jumps until a return produces the final value.
//!
//! Programs are built directly from their parts; there is no textual syntax.
//!
//! # Examples
//! ```
//! use blockrun::{BasicBlock, Expr, Jump, Label, Program, Read, Value, ValueQueue};
//!
//! let program = Program::new(
//!     Read::new(["n"]),
//!     vec![BasicBlock::new(Label(0), [], Jump::ret(Expr::var("n")))],
//! )?;
//! let result = program.run(&mut ValueQueue::new([41]))?;
//! assert_eq!(result, Some(Value::Int(41)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod input;
pub mod interpreter;
pub mod sample;
pub mod value;
pub mod variables;

pub use error::{BuildError, EvalError};
pub use input::{InputSource, LineReader, Read, ValueQueue};
pub use interpreter::block::{Assignment, BasicBlock};
pub use interpreter::expr::{BinOp, BinaryEval, Expr, Operand};
pub use interpreter::jump::{Flow, Jump, JumpKind};
pub use interpreter::program::{Outcome, Program, Session, State};
pub use value::{Label, Value};
pub use variables::Variables;
