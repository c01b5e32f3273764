//! The variable table.
//!
//! Maps variable names to their current values for a single run. The table is
//! created empty when a run starts, filled by the read step and by assignments,
//! and dropped with the run.

use crate::error::EvalError;
use crate::value::Value;
use std::collections::BTreeMap;
use tracing::trace;

/// Mapping from variable name to value, owned by one running session.
///
/// Backed by an ordered map so that iteration and snapshots are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    bindings: BTreeMap<String, Value>,
}

impl Variables {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the current value bound to `name`.
    ///
    /// # Returns
    /// * `Ok(Value)` - The bound value
    /// * `Err(EvalError::UndefinedVariable)` - If `name` was never bound
    pub fn get(&self, name: &str) -> Result<Value, EvalError> {
        self.bindings
            .get(name)
            .copied()
            .ok_or_else(|| EvalError::UndefinedVariable(name.to_string()))
    }

    /// Binds `name` to `value`, replacing any previous binding.
    pub fn set(&mut self, name: &str, value: Value) {
        trace!("{name} := {value}");
        if let Some(slot) = self.bindings.get_mut(name) {
            *slot = value;
        } else {
            self.bindings.insert(name.to_string(), value);
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterates over the bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> {
        self.bindings.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl<S: Into<String>, V: Into<Value>> FromIterator<(S, V)> for Variables {
    fn from_iter<T: IntoIterator<Item = (S, V)>>(iter: T) -> Self {
        Self {
            bindings: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}
