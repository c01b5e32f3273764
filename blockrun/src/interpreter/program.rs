//! The program driver.
//!
//! A [`Program`] owns the label table; each run gets its own [`Session`] that
//! owns the variable table and walks the blocks until a return or a failure.

use crate::error::{BuildError, EvalError};
use crate::input::{InputSource, Read};
use crate::interpreter::block::BasicBlock;
use crate::interpreter::jump::Flow;
use crate::value::{Label, Value};
use crate::variables::Variables;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::io::Write;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone)]
pub struct Program {
    read: Read,
    blocks: Vec<BasicBlock>,
    /// Label table: block label to index into `blocks`.
    labels: HashMap<Label, usize>,
}

impl Program {
    /// Builds a program whose entry point is the first block.
    ///
    /// # Returns
    /// * `Ok(Program)` - The program with its label table
    /// * `Err(BuildError::DuplicateLabel)` - If two blocks share a label
    pub fn new(read: Read, blocks: Vec<BasicBlock>) -> Result<Self, BuildError> {
        let mut labels = HashMap::with_capacity(blocks.len());
        for (idx, block) in blocks.iter().enumerate() {
            match labels.entry(block.label()) {
                Entry::Occupied(_) => return Err(BuildError::DuplicateLabel(block.label())),
                Entry::Vacant(slot) => {
                    slot.insert(idx);
                }
            }
        }
        Ok(Self {
            read,
            blocks,
            labels,
        })
    }

    pub fn read(&self) -> &Read {
        &self.read
    }

    pub fn blocks(&self) -> &[BasicBlock] {
        &self.blocks
    }

    /// Label of the entry block, or `None` for an empty program.
    pub fn entry(&self) -> Option<Label> {
        self.blocks.first().map(BasicBlock::label)
    }

    pub fn block(&self, label: Label) -> Option<&BasicBlock> {
        self.labels.get(&label).map(|idx| &self.blocks[*idx])
    }

    /// Runs the program to completion.
    ///
    /// # Returns
    /// * `Ok(Some(Value))` - The value of the return that was reached
    /// * `Ok(None)` - The program has no blocks; nothing was read or run
    /// * `Err(EvalError)` - The failure that ended the run
    pub fn run(&self, source: &mut dyn InputSource) -> Result<Option<Value>, EvalError> {
        match Session::start(self, source) {
            Some(session) => session.run().map(Some),
            None => Ok(None),
        }
    }

    /// Runs the program, reporting failures instead of returning them.
    ///
    /// A failed run writes exactly one diagnostic line to `diagnostics` and
    /// yields [`Outcome::Failed`].
    pub fn evaluate(&self, source: &mut dyn InputSource, diagnostics: &mut dyn Write) -> Outcome {
        match self.run(source) {
            Ok(None) => Outcome::Empty,
            Ok(Some(value)) => Outcome::Value(value),
            Err(err) => {
                error!("Evaluation failed: {}", err);
                if let Err(io_err) = writeln!(diagnostics, "{err}") {
                    warn!("Failed to emit diagnostic: {}", io_err);
                }
                Outcome::Failed
            }
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "read {}", self.read.names().join(", "))?;
        for block in &self.blocks {
            write!(f, "\n{block}")?;
        }
        Ok(())
    }
}

/// Result of [`Program::evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The program had no blocks.
    Empty,
    /// The program returned a value.
    Value(Value),
    /// The run failed; a diagnostic has been emitted.
    Failed,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Empty => f.write_str("none"),
            Outcome::Value(value) => write!(f, "{value}"),
            Outcome::Failed => f.write_str("failed"),
        }
    }
}

/// State of a running session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    /// The next step will evaluate the block with this label.
    Running(Label),
    Halted(Value),
    Error(EvalError),
}

impl State {
    pub fn is_running(&self) -> bool {
        matches!(self, State::Running(_))
    }
}

/// A single run of a program.
///
/// Owns the variable table for the lifetime of the run. The read step happens
/// once, in [`Session::start`]; every [`Session::step`] afterwards evaluates
/// exactly one block.
#[derive(Debug)]
pub struct Session<'a> {
    program: &'a Program,
    vars: Variables,
    state: State,
    steps: usize,
}

impl<'a> Session<'a> {
    /// Creates a session at the entry block and reads the program's inputs.
    ///
    /// Returns `None` for a program without blocks, in which case `source`
    /// is not touched. A failing read leaves the session in [`State::Error`].
    pub fn start(program: &'a Program, source: &mut dyn InputSource) -> Option<Self> {
        let entry = program.entry()?;
        info!("Starting evaluation at block {}", entry);

        let mut vars = Variables::new();
        let state = match program.read.evaluate(&mut vars, source) {
            Ok(()) => State::Running(entry),
            Err(err) => State::Error(err),
        };

        Some(Self {
            program,
            vars,
            state,
            steps: 0,
        })
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn variables(&self) -> &Variables {
        &self.vars
    }

    /// Number of steps taken so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Evaluates the current block and moves to the next state.
    ///
    /// Returns the label the step ran at, or `None` if the session had already
    /// halted or failed.
    pub fn step(&mut self) -> Option<Label> {
        let State::Running(label) = self.state else {
            return None;
        };
        self.steps += 1;

        self.state = match self.program.block(label) {
            None => State::Error(EvalError::UnknownLabel(label)),
            Some(block) => match block.evaluate(&mut self.vars) {
                Ok(Flow::Continue(next)) => {
                    debug!("Block {} continues at {}", label, next);
                    State::Running(next)
                }
                Ok(Flow::Halt(value)) => {
                    info!("Program returned {} from block {}", value, label);
                    State::Halted(value)
                }
                Err(err) => State::Error(err),
            },
        };
        Some(label)
    }

    /// Steps until the session halts or fails, or `max_steps` more steps have
    /// been taken.
    pub fn run_bounded(&mut self, max_steps: usize) -> &State {
        for _ in 0..max_steps {
            if self.step().is_none() {
                break;
            }
        }
        &self.state
    }

    /// Steps until the session halts or fails.
    ///
    /// There is no cycle detection: a program that never reaches a return
    /// does not terminate.
    pub fn run(mut self) -> Result<Value, EvalError> {
        loop {
            match self.state {
                State::Running(_) => {
                    self.step();
                }
                State::Halted(value) => return Ok(value),
                State::Error(err) => return Err(err),
            }
        }
    }
}
