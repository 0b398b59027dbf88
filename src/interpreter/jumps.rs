use crate::interpreter::errors::RuntimeError;
use crate::interpreter::pointer::ThreadPointer;
use crate::interpreter::statements::StatementExecutor;
use tracing::trace;

impl StatementExecutor {
    /// Move to `index + 1`, or end the frame when the method has no statement
    /// there.  Falling off the end of a method is an implicit return.
    pub(crate) fn advance(&self, pointer: ThreadPointer) -> Result<ThreadPointer, RuntimeError> {
        let current = pointer.current_pointer()?;
        if pointer.context().has_next_statement(current)? {
            pointer.move_to_next(1)
        } else {
            trace!(thread = pointer.thread_id(), at = %current, "end of method reached");
            pointer.return_from_method()
        }
    }

    /// Jump over `count` statements, then advance once more to land after them
    pub(crate) fn skip_and_advance(
        &self,
        pointer: ThreadPointer,
        count: usize,
    ) -> Result<ThreadPointer, RuntimeError> {
        let shift = isize::try_from(count).map_err(|_| {
            RuntimeError::malformed(format!("skip count {} does not fit a jump offset", count))
        })?;
        let pointer = pointer.move_to_next(shift)?;
        self.advance(pointer)
    }
}
