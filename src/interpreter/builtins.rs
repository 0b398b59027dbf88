//! Synchronization intrinsics
//!
//! Statements recognized by name rather than dispatched as calls:
//!
//! - `Interlocked.Increment(ref v)`: `v += 1`, result receives the new value
//! - `Interlocked.Read(ref v)`: result receives `v`, `v` untouched
//! - `Interlocked.CompareExchange(ref loc, value, comparand)`: `loc = value`
//!   when `loc == comparand`; result always receives the original `loc`
//! - `event.Set()`: signals an `AutoResetEvent` variable
//!
//! Every effect of an intrinsic lands within the single step that executes
//! it.  Any other target/method pair, including `event.WaitOne()`, is an
//! [`RuntimeError::UnsupportedInvocation`].

use crate::interpreter::constants::EVENT_SET_METHOD;
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::pointer::ThreadPointer;
use crate::interpreter::statements::StatementExecutor;
use crate::memory::variable::{Variable, VariableValue};
use tracing::debug;

impl StatementExecutor {
    pub(crate) fn atomic_increment(
        &self,
        pointer: ThreadPointer,
        variable: &str,
        result: &str,
    ) -> Result<ThreadPointer, RuntimeError> {
        let current = pointer.local_or_global(variable)?;
        // Interlocked arithmetic wraps on overflow
        let incremented = Variable::int64(current.name(), current.expect_int64()?.wrapping_add(1));

        let pointer = pointer.set_local_or_global(variable, &incremented)?;
        debug!(thread = pointer.thread_id(), variable = %incremented, "atomic increment");
        pointer.set_local_or_global(result, &incremented)
    }

    pub(crate) fn atomic_read(
        &self,
        pointer: ThreadPointer,
        variable: &str,
        result: &str,
    ) -> Result<ThreadPointer, RuntimeError> {
        let value = pointer.local_or_global(variable)?.clone();
        debug!(thread = pointer.thread_id(), variable = %value, "atomic read");
        pointer.set_local_or_global(result, &value)
    }

    pub(crate) fn compare_exchange(
        &self,
        pointer: ThreadPointer,
        location: &str,
        value: &str,
        comparand: &str,
        result: &str,
    ) -> Result<ThreadPointer, RuntimeError> {
        let original = pointer.local_or_global(location)?.clone();
        let comparand_value = pointer.local_or_global(comparand)?.clone();
        let new_value = pointer.local_or_global(value)?.clone();
        pointer.local_or_global(result)?;

        let mut pointer = pointer;
        if original.value_equals(&comparand_value) {
            debug!(thread = pointer.thread_id(), location, "compare-exchange matched, storing {}", new_value.value());
            pointer = pointer.set_local_or_global(location, &new_value)?;
        } else {
            debug!(thread = pointer.thread_id(), location, "compare-exchange did not match");
        }

        pointer.set_local_or_global(result, &original)
    }

    /// `target.method()` where `target` resolved to `variable`
    pub(crate) fn invoke_variable_method(
        &self,
        pointer: ThreadPointer,
        variable: &Variable,
        method: &str,
    ) -> Result<ThreadPointer, RuntimeError> {
        match (variable.value(), method) {
            (VariableValue::Event { .. }, EVENT_SET_METHOD) => {
                debug!(thread = pointer.thread_id(), event = variable.name(), "event signaled");
                pointer.set_local_or_global(variable.name(), &Variable::event(variable.name(), true))
            }
            _ => Err(RuntimeError::UnsupportedInvocation {
                target: variable.name().to_string(),
                method: method.to_string(),
            }),
        }
    }
}
