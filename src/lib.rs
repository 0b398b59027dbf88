//! # Introduction
//!
//! syncstep executes methods made of a small, flat statement vocabulary that
//! models synchronization primitives (atomic increment, atomic read,
//! compare-and-exchange, event signal) and records an immutable snapshot of
//! the whole process state after every step.  The snapshot history can be
//! walked oldest-first to see how shared state evolved.
//!
//! ## Execution pipeline
//!
//! ```text
//! ClassDeclaration → Interpreter → StatementExecutor → ExecutionContext chain
//! ```
//!
//! 1. [`declaration`]: the statement and class model consumed by the
//!    interpreter.  Control flow is encoded as signed jump offsets over a flat
//!    statement list.
//! 2. [`memory`]: tagged [`memory::variable::Variable`]s, name-keyed
//!    variable sets and per-thread state (call stack and locals).
//! 3. [`snapshot`]: the [`snapshot::ExecutionContext`] history chain.
//! 4. [`interpreter`]: thread pointers, the statement dispatcher, the
//!    synchronization intrinsics and the driver.
//!
//! ## Supported statements
//!
//! Declarations, literal and decrement assignments, `if (a == b)`,
//! `while (true)`, `while (a == b)`, relative skips, `return`,
//! `Interlocked.Increment/Read/CompareExchange`, and `event.Set()`.

pub mod declaration;
pub mod interpreter;
pub mod memory;
pub mod snapshot;
