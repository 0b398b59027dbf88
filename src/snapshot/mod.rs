// Execution history as a chain of immutable snapshots

use crate::declaration::statement::Statement;
use crate::declaration::ClassDeclaration;
use crate::interpreter::errors::RuntimeError;
use crate::memory::thread::{StatementPointer, ThreadId, ThreadState};
use crate::memory::variable::Variable;
use crate::memory::variables::VariableSet;
use imbl::Vector;
use std::fmt;
use std::sync::Arc;

/// One generation of process state: globals, every started thread, and a
/// link to the generation it was derived from.
///
/// Contexts are shared as `Arc<ExecutionContext>` and never mutated after
/// construction.  Every operation returns a new context:
///
/// - [`start_thread`](Self::start_thread) and
///   [`update_thread`](Self::update_thread) append a generation whose
///   `previous` is the receiver.
/// - [`with_global`](Self::with_global) amends the receiver's generation: the
///   new context replaces it in the chain and keeps the same `previous`.
///
/// The chain is unbounded; callers bound run length through
/// [`InterpreterConfig::max_steps`](crate::interpreter::engine::InterpreterConfig).
#[derive(Clone)]
pub struct ExecutionContext {
    declaration: Arc<ClassDeclaration>,
    threads: Vector<ThreadState>,
    globals: VariableSet,
    previous: Option<Arc<ExecutionContext>>,
}

impl ExecutionContext {
    /// The initial generation: declared globals, no threads, no history
    pub fn new(declaration: Arc<ClassDeclaration>) -> Self {
        let globals = declaration.globals().iter().cloned().collect();
        ExecutionContext {
            declaration,
            threads: Vector::new(),
            globals,
            previous: None,
        }
    }

    pub fn declaration(&self) -> &Arc<ClassDeclaration> {
        &self.declaration
    }

    pub fn previous(&self) -> Option<&Arc<ExecutionContext>> {
        self.previous.as_ref()
    }

    pub fn threads(&self) -> impl Iterator<Item = &ThreadState> {
        self.threads.iter()
    }

    pub fn thread(&self, id: ThreadId) -> Option<&ThreadState> {
        self.threads.iter().find(|t| t.id() == id)
    }

    pub fn globals(&self) -> &VariableSet {
        &self.globals
    }

    pub fn global(&self, name: &str) -> Option<&Variable> {
        self.globals.get(name)
    }

    pub fn has_global(&self, name: &str) -> bool {
        self.globals.contains(name)
    }

    pub fn statement(&self, pointer: &StatementPointer) -> Result<&Statement, RuntimeError> {
        self.declaration.statement(pointer)
    }

    pub fn has_next_statement(&self, pointer: &StatementPointer) -> Result<bool, RuntimeError> {
        self.declaration.has_next_statement(pointer)
    }

    /// Append a generation with a new thread positioned at `entry`
    pub fn start_thread(
        self: &Arc<Self>,
        id: ThreadId,
        entry: StatementPointer,
    ) -> Result<Arc<Self>, RuntimeError> {
        if self.thread(id).is_some() {
            return Err(RuntimeError::malformed(format!(
                "thread {} is already started",
                id
            )));
        }

        let mut threads = self.threads.clone();
        threads.push_back(ThreadState::start(id, entry));
        Ok(self.append(threads, self.globals.clone()))
    }

    /// Append a generation where the thread with `updated.id()` is replaced
    pub fn update_thread(self: &Arc<Self>, updated: ThreadState) -> Result<Arc<Self>, RuntimeError> {
        let index = self
            .threads
            .iter()
            .position(|t| t.id() == updated.id())
            .ok_or_else(|| {
                RuntimeError::malformed(format!("thread {} was not found in context", updated.id()))
            })?;

        let mut threads = self.threads.clone();
        threads.set(index, updated);
        Ok(self.append(threads, self.globals.clone()))
    }

    /// Replacement for this generation with `variable` inserted into or
    /// replaced in the globals.  The history length does not change.
    pub fn with_global(&self, variable: Variable) -> Arc<Self> {
        Arc::new(ExecutionContext {
            declaration: Arc::clone(&self.declaration),
            threads: self.threads.clone(),
            globals: self.globals.with(variable),
            previous: self.previous.clone(),
        })
    }

    fn append(self: &Arc<Self>, threads: Vector<ThreadState>, globals: VariableSet) -> Arc<Self> {
        Arc::new(ExecutionContext {
            declaration: Arc::clone(&self.declaration),
            threads,
            globals,
            previous: Some(Arc::clone(self)),
        })
    }

    /// Every generation from the initial context up to and including this one
    pub fn generations(self: &Arc<Self>) -> Vec<Arc<ExecutionContext>> {
        let mut result = Vec::new();
        let mut current = Some(self);
        while let Some(context) = current {
            result.push(Arc::clone(context));
            current = context.previous.as_ref();
        }

        result.reverse();
        result
    }

    /// Number of generations in the chain ending here
    pub fn generation_count(&self) -> usize {
        let mut count = 1;
        let mut current = self.previous.as_ref();
        while let Some(context) = current {
            count += 1;
            current = context.previous.as_ref();
        }
        count
    }
}

/// Snapshot state is compared by value; `previous` by identity, so comparing
/// two contexts never walks the history.
impl PartialEq for ExecutionContext {
    fn eq(&self, other: &Self) -> bool {
        let same_previous = match (&self.previous, &other.previous) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };

        same_previous
            && (Arc::ptr_eq(&self.declaration, &other.declaration)
                || self.declaration == other.declaration)
            && self.threads == other.threads
            && self.globals == other.globals
    }
}

impl Eq for ExecutionContext {}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("declaration", &self.declaration.type_name())
            .field("threads", &self.threads)
            .field("globals", &self.globals)
            .field("has_previous", &self.previous.is_some())
            .finish()
    }
}

impl Drop for ExecutionContext {
    // Unlink uniquely owned ancestors one at a time; the default recursive
    // drop overflows the stack on long histories.
    fn drop(&mut self) {
        let mut previous = self.previous.take();
        while let Some(context) = previous {
            previous = Arc::into_inner(context).and_then(|mut inner| inner.previous.take());
        }
    }
}
