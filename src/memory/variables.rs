//! Name-keyed variable sets
//!
//! [`VariableSet`] holds globals and per-thread locals.  Names are unique
//! within a set and declaration order is preserved.  The backing
//! `imbl::Vector` shares structure between clones, so deriving a new snapshot
//! with one replaced variable does not copy the rest of the set.

use super::variable::Variable;
use imbl::Vector;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableSet {
    variables: Vector<Variable>,
}

impl VariableSet {
    pub fn new() -> Self {
        VariableSet {
            variables: Vector::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Insert `variable`, replacing any existing variable of the same name
    /// in place.
    pub fn insert(&mut self, variable: Variable) {
        match self.variables.iter().position(|v| v.name() == variable.name()) {
            Some(index) => {
                self.variables.set(index, variable);
            }
            None => self.variables.push_back(variable),
        }
    }

    /// Copy of this set with `variable` inserted or replaced
    pub fn with(&self, variable: Variable) -> Self {
        let mut updated = self.clone();
        updated.insert(variable);
        updated
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl FromIterator<Variable> for VariableSet {
    /// Later variables replace earlier ones of the same name.
    fn from_iter<I: IntoIterator<Item = Variable>>(iter: I) -> Self {
        let mut set = VariableSet::new();
        for variable in iter {
            set.insert(variable);
        }
        set
    }
}
