//! Core interpretation logic.
//!
//! Programs are labeled basic blocks. Each block runs its assignments against
//! the session's variable table and then its jump decides which block runs
//! next, or ends the program with a value.

pub mod block;
pub mod expr;
pub mod jump;
pub mod program;
