//! Per-thread state
//!
//! - [`StatementPointer`]: `(method, index)` location of a thread
//! - [`ThreadState`]: a modeled thread's call stack and locals
//!
//! The last call-stack entry is the thread's current execution point.  A
//! thread with an empty call stack has finished.

use super::variables::VariableSet;
use std::fmt;

/// Identifier of a modeled thread, assigned by start position
pub type ThreadId = usize;

/// Location of a statement within a method
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatementPointer {
    pub method: String,
    pub index: usize,
}

impl StatementPointer {
    pub fn new(method: impl Into<String>, index: usize) -> Self {
        StatementPointer {
            method: method.into(),
            index,
        }
    }
}

impl fmt::Display for StatementPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.method, self.index)
    }
}

/// State of one modeled thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadState {
    id: ThreadId,
    call_stack: Vec<StatementPointer>,
    locals: VariableSet,
}

impl ThreadState {
    /// A fresh thread positioned at `entry` with no locals
    pub fn start(id: ThreadId, entry: StatementPointer) -> Self {
        ThreadState {
            id,
            call_stack: vec![entry],
            locals: VariableSet::new(),
        }
    }

    pub fn id(&self) -> ThreadId {
        self.id
    }

    pub fn call_stack(&self) -> &[StatementPointer] {
        &self.call_stack
    }

    pub fn locals(&self) -> &VariableSet {
        &self.locals
    }

    /// Current execution point, None once the thread has finished
    pub fn current(&self) -> Option<&StatementPointer> {
        self.call_stack.last()
    }

    pub fn is_finished(&self) -> bool {
        self.call_stack.is_empty()
    }

    pub(crate) fn with_locals(&self, locals: VariableSet) -> Self {
        ThreadState {
            id: self.id,
            call_stack: self.call_stack.clone(),
            locals,
        }
    }

    pub(crate) fn with_call_stack(&self, call_stack: Vec<StatementPointer>) -> Self {
        ThreadState {
            id: self.id,
            call_stack,
            locals: self.locals.clone(),
        }
    }
}
