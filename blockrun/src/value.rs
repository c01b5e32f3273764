//! Runtime values and block labels.

use std::fmt;

/// Runtime value stored in the variable table and produced by expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value {
    /// Signed integer value. Arithmetic is checked against the `i128` range.
    Int(i128),
    /// Boolean value, produced by comparisons.
    Bool(bool),
}

impl Value {
    /// Try to interpret as an integer.
    pub fn as_int(&self) -> Option<i128> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Bool(_) => None,
        }
    }

    /// Try to interpret as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Int(_) => None,
        }
    }

    /// Name of the value's kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Bool(_) => "bool",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<i128> for Value {
    fn from(value: i128) -> Self {
        Value::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value.into())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

/// Identifier naming a basic block. Jumps target blocks by label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(pub u32);

impl From<u32> for Label {
    fn from(value: u32) -> Self {
        Label(value)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        let int_val = Value::from(42);
        assert_eq!(int_val.as_int(), Some(42));
        assert_eq!(int_val.as_bool(), None);

        let bool_val = Value::from(true);
        assert_eq!(bool_val.as_bool(), Some(true));
        assert_eq!(bool_val.as_int(), None);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Int(-7).to_string(), "-7");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Label(5).to_string(), "5");
    }

    #[test]
    fn test_value_equality_across_kinds() {
        assert_ne!(Value::Int(1), Value::Bool(true));
        assert_eq!(Value::from(3i64), Value::from(3i128));
    }
}
