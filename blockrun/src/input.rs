//! Input acquisition.
//!
//! The read step is a program's only boundary with the outside world. It asks
//! an [`InputSource`] for one value per declared variable, in declaration
//! order, before the first block runs.

use crate::error::EvalError;
use crate::value::Value;
use crate::variables::Variables;
use anyhow::{Context, Result, bail};
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::io::BufRead;
use tracing::debug;

/// Supplier of input values.
pub trait InputSource {
    /// Produces the value for variable `name`.
    ///
    /// Called once per declared variable, in declaration order.
    fn next_value(&mut self, name: &str) -> Result<Value>;
}

/// The read step: binds a fixed, ordered list of variables from a source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Read {
    names: SmallVec<[String; 4]>,
}

impl Read {
    pub fn new<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: names.into_iter().map(|n| n.as_ref().to_string()).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Requests one value per name from `source` and binds it into `vars`.
    ///
    /// # Returns
    /// * `Ok(())` - Every name was bound
    /// * `Err(EvalError::Input)` - The source failed; names before the failing
    ///   one stay bound
    pub fn evaluate(
        &self,
        vars: &mut Variables,
        source: &mut dyn InputSource,
    ) -> Result<(), EvalError> {
        for name in &self.names {
            let value = source.next_value(name).map_err(|e| EvalError::Input {
                name: name.clone(),
                message: format!("{e:#}"),
            })?;
            debug!("Read {name} = {value}");
            vars.set(name, value);
        }
        Ok(())
    }
}

/// Source handing out pre-supplied values in order.
#[derive(Debug, Clone, Default)]
pub struct ValueQueue {
    values: VecDeque<Value>,
}

impl ValueQueue {
    pub fn new<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

impl InputSource for ValueQueue {
    fn next_value(&mut self, _name: &str) -> Result<Value> {
        match self.values.pop_front() {
            Some(value) => Ok(value),
            None => bail!("no more input values"),
        }
    }
}

/// Source reading one integer per line.
#[derive(Debug)]
pub struct LineReader<R> {
    reader: R,
    line: String,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }
}

impl<R: BufRead> InputSource for LineReader<R> {
    fn next_value(&mut self, _name: &str) -> Result<Value> {
        self.line.clear();
        if self.reader.read_line(&mut self.line)? == 0 {
            bail!("unexpected end of input");
        }
        let text = self.line.trim();
        let value: i128 = text
            .parse()
            .with_context(|| format!("invalid integer `{text}`"))?;
        Ok(Value::Int(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_binds_in_order() {
        let read = Read::new(["x", "y"]);
        let mut vars = Variables::new();
        read.evaluate(&mut vars, &mut ValueQueue::new([12, 18]))
            .unwrap();
        assert_eq!(vars.get("x"), Ok(Value::Int(12)));
        assert_eq!(vars.get("y"), Ok(Value::Int(18)));
    }

    #[test]
    fn test_read_exhausted_source() {
        let read = Read::new(["x", "y"]);
        let mut vars = Variables::new();
        let err = read
            .evaluate(&mut vars, &mut ValueQueue::new([1]))
            .unwrap_err();
        assert!(matches!(err, EvalError::Input { ref name, .. } if name == "y"));
        assert_eq!(vars.get("x"), Ok(Value::Int(1)));
    }

    #[test]
    fn test_line_reader() {
        let mut source = LineReader::new(Cursor::new("7\n  13 \n"));
        assert_eq!(source.next_value("x").unwrap(), Value::Int(7));
        assert_eq!(source.next_value("y").unwrap(), Value::Int(13));
        assert!(source.next_value("z").is_err());
    }

    #[test]
    fn test_line_reader_rejects_garbage() {
        let mut source = LineReader::new(Cursor::new("seven\n"));
        let err = source.next_value("x").unwrap_err();
        assert!(format!("{err:#}").contains("invalid integer `seven`"));
    }
}
