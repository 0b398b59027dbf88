//! Variable representation
//!
//! A [`Variable`] is a name bound to a tagged [`VariableValue`].  Values are
//! replaced through [`Variable::update`], which keeps the name and refuses to
//! change the variant, so a variable declared as an integer stays an integer
//! for the whole run.
//!
//! # Variants
//!
//! - [`VariableValue::Int64`]: 64-bit signed integer
//! - [`VariableValue::Event`]: auto-reset event flag (signaled / unsignaled)

use crate::interpreter::errors::RuntimeError;
use std::fmt;

/// Runtime values a variable can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableValue {
    Int64(i64),
    Event { signaled: bool },
}

/// Variant tag, used in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Int64,
    Event,
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableKind::Int64 => write!(f, "long"),
            VariableKind::Event => write!(f, "AutoResetEvent"),
        }
    }
}

impl VariableValue {
    pub fn kind(&self) -> VariableKind {
        match self {
            VariableValue::Int64(_) => VariableKind::Int64,
            VariableValue::Event { .. } => VariableKind::Event,
        }
    }
}

impl fmt::Display for VariableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableValue::Int64(n) => write!(f, "{}", n),
            VariableValue::Event { signaled: true } => write!(f, "signaled"),
            VariableValue::Event { signaled: false } => write!(f, "unsignaled"),
        }
    }
}

/// A named value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable {
    name: String,
    value: VariableValue,
}

impl Variable {
    pub fn new(name: impl Into<String>, value: VariableValue) -> Self {
        Variable {
            name: name.into(),
            value,
        }
    }

    pub fn int64(name: impl Into<String>, value: i64) -> Self {
        Self::new(name, VariableValue::Int64(value))
    }

    pub fn event(name: impl Into<String>, signaled: bool) -> Self {
        Self::new(name, VariableValue::Event { signaled })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> VariableValue {
        self.value
    }

    pub fn kind(&self) -> VariableKind {
        self.value.kind()
    }

    /// Get the integer value, returns None if not an Int64
    pub fn as_int64(&self) -> Option<i64> {
        match self.value {
            VariableValue::Int64(n) => Some(n),
            _ => None,
        }
    }

    /// Get the event flag, returns None if not an Event
    pub fn as_event(&self) -> Option<bool> {
        match self.value {
            VariableValue::Event { signaled } => Some(signaled),
            _ => None,
        }
    }

    /// Expect an integer value, reporting the variable name otherwise
    pub fn expect_int64(&self) -> Result<i64, RuntimeError> {
        self.as_int64()
            .ok_or_else(|| RuntimeError::UnsupportedVariableType {
                name: self.name.clone(),
                expected: VariableKind::Int64,
                found: self.kind(),
            })
    }

    /// Produce a replacement of this variable carrying `new_value`'s value.
    ///
    /// The result always keeps `self`'s name; the name of `new_value` is
    /// ignored.  Fails if the two variables are of different variants.
    pub fn update(&self, new_value: &Variable) -> Result<Variable, RuntimeError> {
        if self.kind() != new_value.kind() {
            return Err(RuntimeError::UnsupportedVariableType {
                name: self.name.clone(),
                expected: self.kind(),
                found: new_value.kind(),
            });
        }

        Ok(Variable {
            name: self.name.clone(),
            value: new_value.value,
        })
    }

    /// Structural value comparison; names are not compared and values of
    /// different variants are never equal.
    pub fn value_equals(&self, other: &Variable) -> bool {
        self.value == other.value
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} = {}", self.kind(), self.name, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_keeps_name() {
        let counter = Variable::int64("counter", 1);
        let updated = counter.update(&Variable::int64("other", 7)).unwrap();

        assert_eq!(updated.name(), "counter");
        assert_eq!(updated.as_int64(), Some(7));
        // source untouched
        assert_eq!(counter.as_int64(), Some(1));
    }

    #[test]
    fn test_update_rejects_variant_change() {
        let counter = Variable::int64("counter", 1);
        let err = counter.update(&Variable::event("evt", true)).unwrap_err();

        assert_eq!(
            err,
            RuntimeError::UnsupportedVariableType {
                name: "counter".to_string(),
                expected: VariableKind::Int64,
                found: VariableKind::Event,
            }
        );
    }

    #[test]
    fn test_value_equals() {
        assert!(Variable::int64("a", 5).value_equals(&Variable::int64("b", 5)));
        assert!(!Variable::int64("a", 5).value_equals(&Variable::int64("a", 6)));
        assert!(Variable::event("a", true).value_equals(&Variable::event("b", true)));
        assert!(!Variable::int64("a", 0).value_equals(&Variable::event("a", false)));
    }

    #[test]
    fn test_expect_int64_on_event() {
        let evt = Variable::event("_notEmptyEvent", false);
        assert!(matches!(
            evt.expect_int64(),
            Err(RuntimeError::UnsupportedVariableType { ref name, .. }) if name == "_notEmptyEvent"
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Variable::int64("x", -3).to_string(), "long x = -3");
        assert_eq!(
            Variable::event("e", true).to_string(),
            "AutoResetEvent e = signaled"
        );
    }
}
