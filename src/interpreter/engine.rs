// Driver: runs modeled threads to completion and returns the final context

use crate::declaration::ClassDeclaration;
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::pointer::ThreadPointer;
use crate::interpreter::statements::StatementExecutor;
use crate::memory::thread::{StatementPointer, ThreadId};
use crate::snapshot::ExecutionContext;
use std::sync::Arc;
use tracing::{info, warn};

/// Thread id used by [`Interpreter::execute`]
pub const SINGLE_THREAD_ID: ThreadId = 1;

/// Order in which modeled threads are stepped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Schedule {
    /// Start each thread only after the previous one has finished, in start
    /// order.  No two threads' steps interleave.
    #[default]
    Sequential,

    /// Start every thread up front, then execute one statement of each
    /// runnable thread per round, in thread id order.
    RoundRobin,
}

#[derive(Debug, Clone, Default)]
pub struct InterpreterConfig {
    /// Upper bound on statements executed across all threads of one run.
    /// `None` runs until every thread finishes.
    pub max_steps: Option<usize>,
    pub schedule: Schedule,
}

/// Runs one or more threads of a class declaration from given entry points
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    config: InterpreterConfig,
    executor: StatementExecutor,
}

/// Statement budget for one run
struct StepBudget {
    limit: Option<usize>,
    used: usize,
}

impl StepBudget {
    fn new(limit: Option<usize>) -> Self {
        StepBudget { limit, used: 0 }
    }

    fn consume(&mut self) -> Result<(), RuntimeError> {
        if let Some(limit) = self.limit {
            if self.used >= limit {
                warn!(limit, "step limit exceeded, aborting run");
                return Err(RuntimeError::StepLimitExceeded { limit });
            }
        }
        self.used += 1;
        Ok(())
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_config(InterpreterConfig::default())
    }

    pub fn with_config(config: InterpreterConfig) -> Self {
        Interpreter {
            config,
            executor: StatementExecutor::new(),
        }
    }

    /// Run a single thread (id [`SINGLE_THREAD_ID`]) from `start`
    pub fn execute(
        &self,
        declaration: impl Into<Arc<ClassDeclaration>>,
        start: StatementPointer,
    ) -> Result<Arc<ExecutionContext>, RuntimeError> {
        let context = Arc::new(ExecutionContext::new(declaration.into()));
        let mut budget = StepBudget::new(self.config.max_steps);

        let context = self.run_thread(context, SINGLE_THREAD_ID, &start, &mut budget)?;

        info!(
            thread = SINGLE_THREAD_ID,
            steps = budget.used,
            generations = context.generation_count(),
            "run completed"
        );
        Ok(context)
    }

    /// Run one thread per entry in `starts`; thread ids are list positions
    pub fn execute_all(
        &self,
        declaration: impl Into<Arc<ClassDeclaration>>,
        starts: &[StatementPointer],
    ) -> Result<Arc<ExecutionContext>, RuntimeError> {
        let context = Arc::new(ExecutionContext::new(declaration.into()));
        let mut budget = StepBudget::new(self.config.max_steps);

        let context = match self.config.schedule {
            Schedule::Sequential => self.run_sequential(context, starts, &mut budget)?,
            Schedule::RoundRobin => self.run_round_robin(context, starts, &mut budget)?,
        };

        info!(
            threads = starts.len(),
            steps = budget.used,
            generations = context.generation_count(),
            "run completed"
        );
        Ok(context)
    }

    fn run_sequential(
        &self,
        mut context: Arc<ExecutionContext>,
        starts: &[StatementPointer],
        budget: &mut StepBudget,
    ) -> Result<Arc<ExecutionContext>, RuntimeError> {
        for (thread_id, start) in starts.iter().enumerate() {
            context = self.run_thread(context, thread_id, start, budget)?;
        }

        Ok(context)
    }

    /// Start `thread_id` at `start` and step it until it finishes
    fn run_thread(
        &self,
        context: Arc<ExecutionContext>,
        thread_id: ThreadId,
        start: &StatementPointer,
        budget: &mut StepBudget,
    ) -> Result<Arc<ExecutionContext>, RuntimeError> {
        let context = self.start_thread(&context, thread_id, start)?;
        let mut pointer = ThreadPointer::new(context, thread_id)?;

        while self.executor.can_execute(&pointer) {
            budget.consume()?;
            pointer = self.executor.execute_step(pointer)?;
        }

        Ok(pointer.into_context())
    }

    fn run_round_robin(
        &self,
        mut context: Arc<ExecutionContext>,
        starts: &[StatementPointer],
        budget: &mut StepBudget,
    ) -> Result<Arc<ExecutionContext>, RuntimeError> {
        for (thread_id, start) in starts.iter().enumerate() {
            context = self.start_thread(&context, thread_id, start)?;
        }

        loop {
            let mut progressed = false;

            for thread_id in 0..starts.len() {
                let pointer = ThreadPointer::new(context, thread_id)?;
                if self.executor.can_execute(&pointer) {
                    budget.consume()?;
                    context = self.executor.execute_step(pointer)?.into_context();
                    progressed = true;
                } else {
                    context = pointer.into_context();
                }
            }

            if !progressed {
                return Ok(context);
            }
        }
    }

    fn start_thread(
        &self,
        context: &Arc<ExecutionContext>,
        thread_id: ThreadId,
        start: &StatementPointer,
    ) -> Result<Arc<ExecutionContext>, RuntimeError> {
        info!(thread = thread_id, entry = %start, "starting thread");
        context.start_thread(thread_id, start.clone())
    }
}
