// Statement definitions for the flat method bodies

use crate::memory::variable::Variable;

/// One instruction of a method body.
///
/// Bodies never nest: a branch or loop records how many of the following
/// statements form its body, and [`Statement::Skip`] jumps by a signed offset
/// relative to its own index.  A loop is laid out as
///
/// ```text
/// i          While { body_len: n } / WhileTrue { body_len: n }
/// i+1..=i+n  body
/// i+n+1      Skip { offset: -(n + 1) }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `long x;` / `AutoResetEvent e;` binds a new local
    VariableDeclaration { variable: Variable },

    /// `x = 42;` with the literal kept as written
    SetLiteral { variable: String, literal: String },

    /// `x = source - 1;`
    SetDecremented { variable: String, source: String },

    /// `if (left == right) { ... }`
    If {
        left: String,
        right: String,
        true_branch_len: usize,
    },

    /// `while (true) { ... }`
    WhileTrue { body_len: usize },

    /// `while (left == right) { ... }`
    While {
        left: String,
        right: String,
        body_len: usize,
    },

    /// Relative jump; negative offsets return to a loop head
    Skip { offset: isize },

    /// `result = Interlocked.Increment(ref variable);`
    AtomicIncrement { variable: String, result: String },

    /// `result = Interlocked.Read(ref variable);`
    AtomicRead { variable: String, result: String },

    /// `result = Interlocked.CompareExchange(ref location, value, comparand);`
    CompareExchange {
        location: String,
        value: String,
        comparand: String,
        result: String,
    },

    /// `target.method();` on a variable, e.g. `_event.Set()`
    Invoke {
        target: String,
        method: String,
        /// Assignment target written by the front end; never read or written
        /// by the executor
        result: Option<String>,
    },

    Return,
}

impl Statement {
    /// Short kind name for logs and diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Statement::VariableDeclaration { .. } => "VariableDeclaration",
            Statement::SetLiteral { .. } => "SetLiteral",
            Statement::SetDecremented { .. } => "SetDecremented",
            Statement::If { .. } => "If",
            Statement::WhileTrue { .. } => "WhileTrue",
            Statement::While { .. } => "While",
            Statement::Skip { .. } => "Skip",
            Statement::AtomicIncrement { .. } => "AtomicIncrement",
            Statement::AtomicRead { .. } => "AtomicRead",
            Statement::CompareExchange { .. } => "CompareExchange",
            Statement::Invoke { .. } => "Invoke",
            Statement::Return => "Return",
        }
    }
}

/// A named method and its flat statement list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub statements: Vec<Statement>,
}

impl Method {
    pub fn new(name: impl Into<String>, statements: Vec<Statement>) -> Self {
        Method {
            name: name.into(),
            statements,
        }
    }
}
