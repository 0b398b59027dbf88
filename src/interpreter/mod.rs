//! Interpreter execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: the driver, its configuration and thread schedules
//! - [`pointer`]: thread pointers with local/global variable resolution
//! - [`statements`]: the single-step statement dispatcher
//! - [`errors`]: runtime error types
//!
//! # Execution Model
//!
//! The driver repeatedly asks the dispatcher to execute one statement of a
//! runnable thread.  Each step derives new [`crate::snapshot::ExecutionContext`]
//! generations and leaves every earlier generation untouched, so the whole
//! history stays inspectable after the run.
//!
//! # Intrinsics
//!
//! Atomic operations and event signals are implemented directly on the
//! dispatcher (`builtins`) rather than as callable methods.

pub mod engine;
pub mod errors;
pub mod pointer;
pub mod statements;

mod builtins;
mod constants;
mod jumps;
