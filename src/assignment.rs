//! Truth assignments over SAT atoms

use crate::atom::Atom;
use crate::engine::SATSolver;

/// A total function from atoms `1..=len` to truth values
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    values: Vec<bool>,
}

impl Assignment {
    /// Creates an assignment from per-atom values (index 0 is atom 1)
    pub fn from_values(values: Vec<bool>) -> Self {
        Self { values }
    }

    /// Reads the model of a solver that has just returned SAT
    pub fn from_solver<S: SATSolver + ?Sized>(solver: &S, num_vars: u32) -> Self {
        let values = (1..=num_vars).map(|var| solver.value_of(var)).collect();
        Self { values }
    }

    /// Creates an assignment from a signed literal model
    ///
    /// A positive literal sets its atom true, a negative one false. Atoms
    /// that never appear default to false. Zero entries are skipped.
    pub fn from_literals(literals: &[i32]) -> Self {
        let len = literals
            .iter()
            .map(|lit| lit.unsigned_abs() as usize)
            .max()
            .unwrap_or(0);
        let mut values = vec![false; len];
        for &lit in literals {
            if lit > 0 {
                values[lit as usize - 1] = true;
            }
        }
        Self { values }
    }

    /// Returns the value of an atom, or None if outside the assignment
    pub fn value(&self, atom: Atom) -> Option<bool> {
        self.values.get(atom.id() as usize - 1).copied()
    }

    /// Returns the truth value of a signed literal
    pub fn literal_value(&self, lit: i32) -> Option<bool> {
        let atom = Atom::from_literal(lit)?;
        self.value(atom).map(|v| if lit > 0 { v } else { !v })
    }

    /// Number of atoms covered
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no atoms are covered
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns an iterator over the atoms set to true
    pub fn true_atoms(&self) -> impl Iterator<Item = Atom> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, &v)| if v { Atom::new(i as u32 + 1) } else { None })
    }
}
