//! Runtime error types for the interpreter
//!
//! This module defines [`RuntimeError`], which represents every failure a run
//! can hit.  All runtime errors are fatal: state is deterministic, so a retry
//! would reproduce the same failure.  They propagate out of the step that
//! raised them and end the run.

use crate::memory::variable::VariableKind;

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// Name resolves to neither a local nor a global
    #[error("Undefined variable '{name}'")]
    UndefinedVariable { name: String },

    /// Operation requires a specific variant and received another
    #[error("Variable '{name}' has type {found}, expected {expected}")]
    UnsupportedVariableType {
        name: String,
        expected: VariableKind,
        found: VariableKind,
    },

    /// Literal text cannot be parsed as a 64-bit integer
    #[error("Unsupported literal '{literal}'")]
    UnsupportedLiteral { literal: String },

    /// Target/method combination outside the intrinsic set
    #[error("Unsupported invocation {target}.{method}()")]
    UnsupportedInvocation { target: String, method: String },

    /// Structural violation of the statement model (empty call stack,
    /// index out of range, unknown method or thread)
    #[error("Malformed program: {message}")]
    MalformedProgram { message: String },

    /// The configured step budget ran out before every thread finished
    #[error("Step limit exceeded: {limit} statements executed")]
    StepLimitExceeded { limit: usize },
}

impl RuntimeError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        RuntimeError::MalformedProgram {
            message: message.into(),
        }
    }
}
