//! Thread pointer: one modeled thread's view of an execution context
//!
//! A [`ThreadPointer`] pairs a context with a thread id.  Reads resolve a
//! name in the thread's locals first and then in the globals; writes follow
//! the same precedence, so a local shadows a global of the same name for
//! both.
//!
//! Every mutating operation consumes the pointer and returns a new one bound
//! to a newly derived context; the old context is left as history.

use crate::interpreter::errors::RuntimeError;
use crate::memory::thread::{StatementPointer, ThreadId, ThreadState};
use crate::memory::variable::Variable;
use crate::snapshot::ExecutionContext;
use std::sync::Arc;
use tracing::trace;

#[derive(Debug, Clone)]
pub struct ThreadPointer {
    context: Arc<ExecutionContext>,
    thread_id: ThreadId,
}

impl ThreadPointer {
    /// Bind to `thread_id`, which must already be started in `context`
    pub fn new(context: Arc<ExecutionContext>, thread_id: ThreadId) -> Result<Self, RuntimeError> {
        if context.thread(thread_id).is_none() {
            return Err(RuntimeError::malformed(format!(
                "thread {} is not started",
                thread_id
            )));
        }
        Ok(ThreadPointer { context, thread_id })
    }

    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    pub fn context(&self) -> &Arc<ExecutionContext> {
        &self.context
    }

    pub fn into_context(self) -> Arc<ExecutionContext> {
        self.context
    }

    pub fn thread(&self) -> Result<&ThreadState, RuntimeError> {
        self.context
            .thread(self.thread_id)
            .ok_or_else(|| RuntimeError::malformed(format!("thread {} vanished", self.thread_id)))
    }

    pub fn call_stack(&self) -> Result<&[StatementPointer], RuntimeError> {
        Ok(self.thread()?.call_stack())
    }

    /// Current execution point; an empty call stack is a malformed dispatch
    pub fn current_pointer(&self) -> Result<&StatementPointer, RuntimeError> {
        self.thread()?.current().ok_or_else(|| {
            RuntimeError::malformed(format!(
                "thread {} call stack is empty",
                self.thread_id
            ))
        })
    }

    pub fn local(&self, name: &str) -> Option<&Variable> {
        self.thread().ok()?.locals().get(name)
    }

    pub fn try_local_or_global(&self, name: &str) -> Option<&Variable> {
        self.local(name).or_else(|| self.context.global(name))
    }

    pub fn local_or_global(&self, name: &str) -> Result<&Variable, RuntimeError> {
        self.try_local_or_global(name)
            .ok_or_else(|| RuntimeError::UndefinedVariable {
                name: name.to_string(),
            })
    }

    /// Write `new_value`'s value into the local `name`, or the global `name`
    /// if no such local exists.
    pub fn set_local_or_global(self, name: &str, new_value: &Variable) -> Result<Self, RuntimeError> {
        if let Some(old_local) = self.local(name) {
            let updated = old_local.update(new_value)?;
            return self.set_local(updated);
        }

        if let Some(old_global) = self.context.global(name) {
            let updated = old_global.update(new_value)?;
            trace!(thread = self.thread_id, variable = %updated, "global updated");
            let context = self.context.with_global(updated);
            return Ok(ThreadPointer {
                context,
                thread_id: self.thread_id,
            });
        }

        Err(RuntimeError::UndefinedVariable {
            name: name.to_string(),
        })
    }

    /// Insert or replace a local unconditionally
    pub fn set_local(self, variable: Variable) -> Result<Self, RuntimeError> {
        let thread = self.thread()?;
        let updated = thread.with_locals(thread.locals().with(variable));
        self.replace_thread(updated)
    }

    /// Shift the current frame's statement index by `shift`
    pub fn move_to_next(self, shift: isize) -> Result<Self, RuntimeError> {
        let thread = self.thread()?;
        let mut call_stack = thread.call_stack().to_vec();
        let frame = call_stack.last_mut().ok_or_else(|| {
            RuntimeError::malformed(format!("thread {} call stack is empty", self.thread_id))
        })?;

        let index = frame.index.checked_add_signed(shift).ok_or_else(|| {
            RuntimeError::malformed(format!(
                "jump by {} from {} leaves the method",
                shift, frame
            ))
        })?;
        frame.index = index;
        trace!(thread = self.thread_id, to = %frame, "pointer moved");

        let updated = thread.with_call_stack(call_stack);
        self.replace_thread(updated)
    }

    /// Pop the current frame; the thread is finished once its stack is empty
    pub fn return_from_method(self) -> Result<Self, RuntimeError> {
        let thread = self.thread()?;
        let mut call_stack = thread.call_stack().to_vec();
        let frame = call_stack.pop().ok_or_else(|| {
            RuntimeError::malformed(format!("thread {} call stack is empty", self.thread_id))
        })?;
        trace!(thread = self.thread_id, from = %frame, depth = call_stack.len(), "returned from method");

        let updated = thread.with_call_stack(call_stack);
        self.replace_thread(updated)
    }

    fn replace_thread(self, updated: ThreadState) -> Result<Self, RuntimeError> {
        let context = self.context.update_thread(updated)?;
        Ok(ThreadPointer {
            context,
            thread_id: self.thread_id,
        })
    }
}
