//! SAT solver trait and implementations

pub mod rustsat_adapter;

use crate::assignment::Assignment;
use crate::cnf::CNF;
use crate::error::{ColoringError, Result};

/// Core SAT solver trait
///
/// This trait defines the interface that all SAT solver backends must implement.
/// Variables are 1-indexed, and literals are represented as signed integers
/// (positive for true, negative for false).
pub trait SATSolver {
    /// Adds the given number of variables to the solver
    fn add_variables(&mut self, num_vars: u32);

    /// Adds a clause to the solver
    ///
    /// Returns false if the backend rejected the clause
    ///
    /// # Arguments
    /// * `lits` - Slice of literals (1-indexed, negated by sign)
    fn add_clause(&mut self, lits: &[i32]) -> bool;

    /// Solves the current formula
    ///
    /// Returns true if satisfiable, false if unsatisfiable
    ///
    /// # Errors
    /// Returns `Backend` if the solver fails without a verdict
    fn solve(&mut self) -> Result<bool>;

    /// Returns the assignment of a variable in the solution
    ///
    /// Only valid after solve() returns true.
    /// Variables are 1-indexed.
    fn value_of(&self, var: u32) -> bool;

    /// Returns the number of variables in the solver
    fn num_variables(&self) -> u32;

    /// Returns the number of clauses added
    fn num_clauses(&self) -> u32;
}

/// Outcome of a single solver call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The formula has a model
    Sat(Assignment),
    /// The formula has no model
    Unsat,
}

/// Loads a CNF into the solver and runs it once
///
/// This is the only blocking step of the pipeline. There is no timeout;
/// callers that need one must wrap the solver.
///
/// # Errors
/// Returns `Backend` if the solver already holds variables or clauses, if it
/// rejects a clause, or if solving fails
pub fn run<S: SATSolver + ?Sized>(solver: &mut S, cnf: &CNF) -> Result<Verdict> {
    if solver.num_variables() != 0 || solver.num_clauses() != 0 {
        return Err(ColoringError::Backend(format!(
            "solver is not fresh: {} variables, {} clauses",
            solver.num_variables(),
            solver.num_clauses()
        )));
    }

    solver.add_variables(cnf.num_variables);

    for (idx, clause) in cnf.clauses.iter().enumerate() {
        if !solver.add_clause(clause) {
            tracing::warn!(?clause, "backend rejected clause");
            return Err(ColoringError::Backend(format!("backend rejected clause {}", idx)));
        }
    }

    if solver.solve()? {
        Ok(Verdict::Sat(Assignment::from_solver(&*solver, cnf.num_variables)))
    } else {
        Ok(Verdict::Unsat)
    }
}

/// A solver that replays a fixed verdict
///
/// It records the clauses it is given but never looks at them. Tests use
/// it to feed the decoder models that a real solver would not produce.
pub struct ScriptedSolver {
    num_vars: u32,
    clauses: Vec<Vec<i32>>,
    model: Option<Vec<bool>>,
}

impl ScriptedSolver {
    /// Creates a solver that answers SAT with the given model
    ///
    /// Index 0 of `model` is variable 1; missing variables read as false.
    pub fn sat(model: Vec<bool>) -> Self {
        Self {
            num_vars: 0,
            clauses: Vec::new(),
            model: Some(model),
        }
    }

    /// Creates a solver that always answers UNSAT
    pub fn unsat() -> Self {
        Self {
            num_vars: 0,
            clauses: Vec::new(),
            model: None,
        }
    }

    /// Returns the clauses received so far
    pub fn clauses(&self) -> &[Vec<i32>] {
        &self.clauses
    }
}

impl SATSolver for ScriptedSolver {
    fn add_variables(&mut self, num_vars: u32) {
        self.num_vars += num_vars;
    }

    fn add_clause(&mut self, lits: &[i32]) -> bool {
        self.clauses.push(lits.to_vec());
        true
    }

    fn solve(&mut self) -> Result<bool> {
        Ok(self.model.is_some())
    }

    fn value_of(&self, var: u32) -> bool {
        match &self.model {
            Some(model) if var > 0 => model.get(var as usize - 1).copied().unwrap_or(false),
            _ => false,
        }
    }

    fn num_variables(&self) -> u32 {
        self.num_vars
    }

    fn num_clauses(&self) -> u32 {
        self.clauses.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_solver_basic() {
        let mut solver = ScriptedSolver::sat(vec![true, false]);

        solver.add_variables(3);
        assert_eq!(solver.num_variables(), 3);

        solver.add_clause(&[1, 2]);
        solver.add_clause(&[-1, 3]);
        assert_eq!(solver.num_clauses(), 2);

        assert!(solver.solve().unwrap());
    }

    #[test]
    fn scripted_solver_value() {
        let solver = ScriptedSolver::sat(vec![true, false]);

        assert!(solver.value_of(1));
        assert!(!solver.value_of(2));

        // Out of bounds returns false
        assert!(!solver.value_of(0));
        assert!(!solver.value_of(3));
    }

    #[test]
    fn scripted_solver_unsat() {
        let mut solver = ScriptedSolver::unsat();
        assert!(!solver.solve().unwrap());
        assert!(!solver.value_of(1));
    }

    #[test]
    fn run_reads_full_model() {
        let mut cnf = CNF::new();
        cnf.add_clause(vec![1, -3]);

        let mut solver = ScriptedSolver::sat(vec![true, false]);
        let verdict = run(&mut solver, &cnf).unwrap();

        // Model is padded to the CNF's variable count
        assert_eq!(
            verdict,
            Verdict::Sat(Assignment::from_values(vec![true, false, false]))
        );
        assert_eq!(solver.clauses(), &[vec![1, -3]]);
    }

    #[test]
    fn run_rejects_used_solver() {
        let mut cnf = CNF::new();
        cnf.add_clause(vec![1]);

        let mut solver = ScriptedSolver::sat(vec![true]);
        run(&mut solver, &cnf).unwrap();

        assert!(matches!(run(&mut solver, &cnf), Err(ColoringError::Backend(_))));
        assert_eq!(solver.num_clauses(), 1);
    }

    #[test]
    fn run_unsat() {
        let mut cnf = CNF::new();
        cnf.add_clause(vec![1]);
        cnf.add_clause(vec![-1]);

        let mut solver = ScriptedSolver::unsat();
        assert_eq!(run(&mut solver, &cnf).unwrap(), Verdict::Unsat);
    }
}
