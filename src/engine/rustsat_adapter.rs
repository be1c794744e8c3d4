//! Adapters for rustsat solver backends
//!
//! Provides adapters to use rustsat-compatible SAT solvers with colorsat.

use rustsat::solvers::{SolverResult, Solve};
use rustsat::types::{Assignment as RsAssignment, Clause, Lit, TernaryVal, Var};

use std::fmt;

use super::SATSolver;
use crate::error::{ColoringError, Result};

/// Adapter that wraps rustsat solvers to implement our SATSolver trait
///
/// This allows any rustsat-compatible solver to be used with colorsat.
///
/// # Example
///
/// ```ignore
/// use rustsat_batsat::BasicSolver;
/// let solver = RustSatAdapter::new(BasicSolver::default());
/// ```
pub struct RustSatAdapter<S> {
    solver: S,
    num_vars: u32,
    num_clauses: u32,
    /// Model captured after the last SAT answer
    model: Option<RsAssignment>,
}

impl<S> RustSatAdapter<S> {
    /// Creates a new adapter wrapping the given solver
    pub fn new(solver: S) -> Self {
        Self {
            solver,
            num_vars: 0,
            num_clauses: 0,
            model: None,
        }
    }
}

/// Returns None for 0, which is not a literal
fn to_lit(lit: i32) -> Option<Lit> {
    let var = Var::new(lit.unsigned_abs().checked_sub(1)?);
    Some(if lit > 0 { var.pos_lit() } else { var.neg_lit() })
}

/// Maps a backend answer to SAT/UNSAT, anything else is a failure
fn verdict<E: fmt::Display>(result: std::result::Result<SolverResult, E>) -> Result<bool> {
    match result {
        Ok(SolverResult::Sat) => Ok(true),
        Ok(SolverResult::Unsat) => Ok(false),
        Ok(_) => Err(ColoringError::Backend("solver returned no verdict".to_string())),
        Err(e) => Err(ColoringError::Backend(e.to_string())),
    }
}

impl<S: Solve> SATSolver for RustSatAdapter<S> {
    fn add_variables(&mut self, num_vars: u32) {
        // RustSat auto-creates variables as needed when clauses are added
        // Just track the count for our interface
        self.num_vars += num_vars;
    }

    fn add_clause(&mut self, lits: &[i32]) -> bool {
        let lits_vec: Option<Vec<Lit>> = lits.iter().map(|&lit| to_lit(lit)).collect();
        let Some(lits_vec) = lits_vec else {
            return false;
        };
        let clause = Clause::from(&lits_vec[..]);
        self.num_clauses += 1;
        self.solver.add_clause(clause).is_ok()
    }

    fn solve(&mut self) -> Result<bool> {
        self.model = None;
        if !verdict(self.solver.solve())? {
            return Ok(false);
        }
        if self.num_vars > 0 {
            let high = Var::new(self.num_vars - 1);
            let model = self
                .solver
                .solution(high)
                .map_err(|e| ColoringError::Backend(e.to_string()))?;
            self.model = Some(model);
        }
        Ok(true)
    }

    fn value_of(&self, var: u32) -> bool {
        if var == 0 || var > self.num_vars {
            return false;
        }
        match &self.model {
            Some(model) => matches!(model.var_value(Var::new(var - 1)), TernaryVal::True),
            None => false,
        }
    }

    fn num_variables(&self) -> u32 {
        self.num_vars
    }

    fn num_clauses(&self) -> u32 {
        self.num_clauses
    }
}
