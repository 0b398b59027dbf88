// Shared fixtures for integration tests
#![allow(dead_code)]

use std::sync::Arc;
use syncstep::declaration::statement::{Method, Statement};
use syncstep::declaration::ClassDeclaration;
use syncstep::interpreter::engine::Interpreter;
use syncstep::interpreter::errors::RuntimeError;
use syncstep::memory::thread::StatementPointer;
use syncstep::memory::variable::Variable;
use syncstep::snapshot::ExecutionContext;

pub fn declare(name: &str, value: i64) -> Statement {
    Statement::VariableDeclaration {
        variable: Variable::int64(name, value),
    }
}

pub fn set_literal(variable: &str, literal: &str) -> Statement {
    Statement::SetLiteral {
        variable: variable.to_string(),
        literal: literal.to_string(),
    }
}

pub fn if_equal(left: &str, right: &str, true_branch_len: usize) -> Statement {
    Statement::If {
        left: left.to_string(),
        right: right.to_string(),
        true_branch_len,
    }
}

pub fn invoke(target: &str, method: &str) -> Statement {
    Statement::Invoke {
        target: target.to_string(),
        method: method.to_string(),
        result: None,
    }
}

/// ```text
/// long newValue;
/// newValue = Interlocked.Increment(ref _setCount);
/// long tempValue = 1;
/// if (newValue == tempValue) { _notEmptyEvent.Set(); }
/// ```
pub fn set_method() -> Method {
    Method::new(
        "Set",
        vec![
            declare("newValue", 0),
            Statement::AtomicIncrement {
                variable: "_setCount".to_string(),
                result: "newValue".to_string(),
            },
            declare("tempValue", 1),
            set_literal("tempValue", "1"),
            if_equal("newValue", "tempValue", 1),
            invoke("_notEmptyEvent", "Set"),
        ],
    )
}

/// ```text
/// while (true) {
///     long currCount = 0;
///     long zeroValue = 0;
///     while (currCount == zeroValue) {
///         currCount = Interlocked.Read(ref _setCount);
///         if (currCount == zeroValue) { _notEmptyEvent.WaitOne(); }
///     }
///     long decrementedValue = currCount - 1;
///     long updatedValue;
///     updatedValue = Interlocked.CompareExchange(ref _setCount, currCount, decrementedValue);
///     if (_setCount == currCount) { return; }
/// }
/// ```
pub fn wait_method() -> Method {
    Method::new(
        "Wait",
        vec![
            Statement::WhileTrue { body_len: 15 },
            declare("currCount", 0),
            set_literal("currCount", "0"),
            declare("zeroValue", 0),
            set_literal("zeroValue", "0"),
            Statement::While {
                left: "currCount".to_string(),
                right: "zeroValue".to_string(),
                body_len: 3,
            },
            Statement::AtomicRead {
                variable: "_setCount".to_string(),
                result: "currCount".to_string(),
            },
            if_equal("currCount", "zeroValue", 1),
            invoke("_notEmptyEvent", "WaitOne"),
            Statement::Skip { offset: -4 },
            declare("decrementedValue", 0),
            Statement::SetDecremented {
                variable: "decrementedValue".to_string(),
                source: "currCount".to_string(),
            },
            declare("updatedValue", 0),
            Statement::CompareExchange {
                location: "_setCount".to_string(),
                value: "currCount".to_string(),
                comparand: "decrementedValue".to_string(),
                result: "updatedValue".to_string(),
            },
            if_equal("_setCount", "currCount", 1),
            Statement::Return,
            Statement::Skip { offset: -16 },
        ],
    )
}

pub fn sample_class() -> ClassDeclaration {
    ClassDeclaration::new(
        "SampleClass",
        vec![
            Variable::int64("_setCount", 0),
            Variable::event("_notEmptyEvent", false),
        ],
        vec![set_method(), wait_method()],
    )
}

/// Class with one method `Run` holding `statements`
pub fn single_method_class(globals: Vec<Variable>, statements: Vec<Statement>) -> ClassDeclaration {
    ClassDeclaration::new("Fixture", globals, vec![Method::new("Run", statements)])
}

/// Run `statements` as method `Run` on the single-thread id
pub fn run(
    globals: Vec<Variable>,
    statements: Vec<Statement>,
) -> Result<Arc<ExecutionContext>, RuntimeError> {
    Interpreter::new().execute(
        single_method_class(globals, statements),
        StatementPointer::new("Run", 0),
    )
}

pub fn global_int(context: &ExecutionContext, name: &str) -> Option<i64> {
    context.global(name).and_then(Variable::as_int64)
}

pub fn local_int(context: &ExecutionContext, thread: usize, name: &str) -> Option<i64> {
    context
        .thread(thread)
        .and_then(|t| t.locals().get(name))
        .and_then(Variable::as_int64)
}
