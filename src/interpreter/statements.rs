//! Statement execution implementation
//!
//! [`StatementExecutor`] runs exactly one statement of one thread per call to
//! [`StatementExecutor::execute_step`] and returns the pointer bound to the
//! resulting context.
//!
//! # Thread states
//!
//! A thread is runnable while its call stack is non-empty and finished once
//! it is empty; there are no other states and nothing blocks.
//!
//! # Control flow
//!
//! Branches and loops never nest.  `if` and `while` fall into their body when
//! the operands are equal and otherwise jump over it (for `while`, also over
//! the trailing back-jump).  "Advance" ends the frame when the method has
//! no statement after the current one.

use crate::declaration::statement::Statement;
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::pointer::ThreadPointer;
use crate::memory::variable::Variable;
use std::sync::Arc;
use tracing::debug;

/// Single-step statement dispatcher
#[derive(Debug, Clone, Copy, Default)]
pub struct StatementExecutor;

impl StatementExecutor {
    pub fn new() -> Self {
        StatementExecutor
    }

    /// Whether the pointer's thread is still runnable
    pub fn can_execute(&self, pointer: &ThreadPointer) -> bool {
        pointer.thread().is_ok_and(|thread| !thread.is_finished())
    }

    /// Execute the statement at the thread's current pointer
    pub fn execute_step(&self, pointer: ThreadPointer) -> Result<ThreadPointer, RuntimeError> {
        let current = pointer.current_pointer()?.clone();
        let declaration = Arc::clone(pointer.context().declaration());
        let statement = declaration.statement(&current)?;

        debug!(
            thread = pointer.thread_id(),
            at = %current,
            statement = statement.kind(),
            "executing statement"
        );

        match statement {
            Statement::VariableDeclaration { variable } => {
                let pointer = pointer.set_local(variable.clone())?;
                self.advance(pointer)
            }

            Statement::SetLiteral { variable, literal } => {
                let value = parse_literal(literal)?;
                let pointer =
                    pointer.set_local_or_global(variable, &Variable::int64(variable.as_str(), value))?;
                self.advance(pointer)
            }

            Statement::SetDecremented { variable, source } => {
                let value = pointer.local_or_global(source)?.expect_int64()?;
                let decremented = Variable::int64(variable.as_str(), value.wrapping_sub(1));
                let pointer = pointer.set_local_or_global(variable, &decremented)?;
                self.advance(pointer)
            }

            Statement::If {
                left,
                right,
                true_branch_len,
            } => {
                if self.operands_equal(&pointer, left, right)? {
                    debug!(thread = pointer.thread_id(), "if ({} == {}) is true, entering body", left, right);
                    self.advance(pointer)
                } else {
                    debug!(
                        thread = pointer.thread_id(),
                        skip = true_branch_len,
                        "if ({} == {}) is false, skipping body",
                        left,
                        right
                    );
                    self.skip_and_advance(pointer, *true_branch_len)
                }
            }

            // The condition is constant; the loop is left only through a
            // return inside the body.
            Statement::WhileTrue { .. } => self.advance(pointer),

            Statement::While {
                left,
                right,
                body_len,
            } => {
                if self.operands_equal(&pointer, left, right)? {
                    debug!(thread = pointer.thread_id(), "while ({} == {}) is true, entering body", left, right);
                    self.advance(pointer)
                } else {
                    // body plus the trailing back-jump
                    let skip = body_len.checked_add(1).ok_or_else(|| {
                        RuntimeError::malformed(format!("while body of {} statements overflows", body_len))
                    })?;
                    debug!(
                        thread = pointer.thread_id(),
                        skip,
                        "while ({} == {}) is false, leaving loop",
                        left,
                        right
                    );
                    self.skip_and_advance(pointer, skip)
                }
            }

            Statement::Skip { offset } => pointer.move_to_next(*offset),

            Statement::AtomicIncrement { variable, result } => {
                let pointer = self.atomic_increment(pointer, variable, result)?;
                self.advance(pointer)
            }

            Statement::AtomicRead { variable, result } => {
                let pointer = self.atomic_read(pointer, variable, result)?;
                self.advance(pointer)
            }

            Statement::CompareExchange {
                location,
                value,
                comparand,
                result,
            } => {
                let pointer = self.compare_exchange(pointer, location, value, comparand, result)?;
                self.advance(pointer)
            }

            Statement::Invoke { target, method, .. } => {
                let variable = pointer.try_local_or_global(target).cloned().ok_or_else(|| {
                    RuntimeError::UnsupportedInvocation {
                        target: target.clone(),
                        method: method.clone(),
                    }
                })?;
                let pointer = self.invoke_variable_method(pointer, &variable, method)?;
                self.advance(pointer)
            }

            Statement::Return => pointer.return_from_method(),
        }
    }

    /// `left == right`, resolving left before right
    fn operands_equal(
        &self,
        pointer: &ThreadPointer,
        left: &str,
        right: &str,
    ) -> Result<bool, RuntimeError> {
        let left = pointer.local_or_global(left)?;
        let right = pointer.local_or_global(right)?;
        Ok(left.value_equals(right))
    }
}

fn parse_literal(literal: &str) -> Result<i64, RuntimeError> {
    literal
        .trim()
        .parse::<i64>()
        .map_err(|_| RuntimeError::UnsupportedLiteral {
            literal: literal.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal() {
        assert_eq!(parse_literal("1"), Ok(1));
        assert_eq!(parse_literal(" -42 "), Ok(-42));
        assert_eq!(parse_literal("9223372036854775807"), Ok(i64::MAX));
        assert_eq!(
            parse_literal("1.5"),
            Err(RuntimeError::UnsupportedLiteral {
                literal: "1.5".to_string()
            })
        );
        assert!(parse_literal("true").is_err());
        assert!(parse_literal("9223372036854775808").is_err());
    }
}
