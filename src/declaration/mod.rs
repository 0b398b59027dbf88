//! Program model consumed by the interpreter
//!
//! A [`ClassDeclaration`] is produced once by a front end and never mutated:
//! - [`statement`]: the closed [`statement::Statement`] vocabulary and
//!   [`statement::Method`]
//! - [`ClassDeclaration`]: type name, declared globals with initial values,
//!   and methods indexed by name
//!
//! # Well-formedness
//!
//! Jump offsets and branch lengths are trusted.  A pointer that names an
//! unknown method or an index past the end of a method is reported as
//! [`RuntimeError::MalformedProgram`] when it is dereferenced.

pub mod statement;

use crate::interpreter::errors::RuntimeError;
use crate::memory::thread::StatementPointer;
use crate::memory::variable::Variable;
use rustc_hash::FxHashMap;
use statement::{Method, Statement};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDeclaration {
    type_name: String,
    globals: Vec<Variable>,
    methods: Vec<Method>,
    /// Method name -> index into `methods`
    method_index: FxHashMap<String, usize>,
}

impl ClassDeclaration {
    pub fn new(type_name: impl Into<String>, globals: Vec<Variable>, methods: Vec<Method>) -> Self {
        // Index methods for fast lookup; a later duplicate shadows an earlier one
        let method_index = methods
            .iter()
            .enumerate()
            .map(|(i, method)| (method.name.clone(), i))
            .collect();

        ClassDeclaration {
            type_name: type_name.into(),
            globals,
            methods,
            method_index,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Declared member variables with their initial values
    pub fn globals(&self) -> &[Variable] {
        &self.globals
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn method(&self, name: &str) -> Option<&Method> {
        self.method_index.get(name).map(|&i| &self.methods[i])
    }

    fn expect_method(&self, name: &str) -> Result<&Method, RuntimeError> {
        self.method(name)
            .ok_or_else(|| RuntimeError::MalformedProgram {
                message: format!("method '{}' is not declared in '{}'", name, self.type_name),
            })
    }

    /// Statement addressed by `pointer`
    pub fn statement(&self, pointer: &StatementPointer) -> Result<&Statement, RuntimeError> {
        let method = self.expect_method(&pointer.method)?;
        method
            .statements
            .get(pointer.index)
            .ok_or_else(|| RuntimeError::MalformedProgram {
                message: format!(
                    "statement index {} is out of range for method '{}' with {} statements",
                    pointer.index,
                    method.name,
                    method.statements.len()
                ),
            })
    }

    /// Whether the method of `pointer` has a statement at `index + 1`
    pub fn has_next_statement(&self, pointer: &StatementPointer) -> Result<bool, RuntimeError> {
        let method = self.expect_method(&pointer.method)?;
        Ok(pointer.index + 1 < method.statements.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declaration() -> ClassDeclaration {
        ClassDeclaration::new(
            "Sample",
            vec![Variable::int64("_count", 0)],
            vec![Method::new("Run", vec![Statement::Return, Statement::Return])],
        )
    }

    #[test]
    fn test_statement_lookup() {
        let declaration = declaration();
        let statement = declaration.statement(&StatementPointer::new("Run", 1)).unwrap();
        assert_eq!(statement, &Statement::Return);
    }

    #[test]
    fn test_statement_out_of_range() {
        let declaration = declaration();
        assert!(matches!(
            declaration.statement(&StatementPointer::new("Run", 2)),
            Err(RuntimeError::MalformedProgram { .. })
        ));
        assert!(matches!(
            declaration.statement(&StatementPointer::new("Missing", 0)),
            Err(RuntimeError::MalformedProgram { .. })
        ));
    }

    #[test]
    fn test_has_next_statement() {
        let declaration = declaration();
        assert!(declaration.has_next_statement(&StatementPointer::new("Run", 0)).unwrap());
        assert!(!declaration.has_next_statement(&StatementPointer::new("Run", 1)).unwrap());
    }
}
