//! State model for the interpreter
//!
//! This module provides the values a run manipulates:
//! - [`variable`]: named, tagged values (`long`, `AutoResetEvent`)
//! - [`variables`]: name-keyed variable sets used for globals and locals
//! - [`thread`]: statement pointers and per-thread call stack and locals
//!
//! # Scoping
//!
//! Globals are shared by every modeled thread; locals belong to exactly one
//! thread.  A local shadows a global of the same name for both reads and
//! writes.

pub mod thread;
pub mod variable;
pub mod variables;
