//! Main solver API
//!
//! The solver encodes a coloring problem to SAT, runs a SAT backend once and
//! decodes the model into a coloring.

use std::fmt;
use std::hash::Hash;
use std::time::{Duration, Instant};

use rustsat_batsat::BasicSolver;

use crate::atom::AtomRegistry;
use crate::cnf::{ClauseBuilder, CNF};
use crate::decoder::{decode, Coloring};
use crate::engine::{self, rustsat_adapter::RustSatAdapter, SATSolver, Verdict};
use crate::error::{ColoringError, Result};
use crate::graph::Graph;

/// Solver options
#[derive(Debug, Clone)]
pub struct Options {
    /// Pin the first node to color 0 (one extra unit clause)
    pub symmetry_breaking: bool,
    /// Check every SAT model against the CNF before decoding
    pub verify_model: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            symmetry_breaking: false,
            verify_model: true,
        }
    }
}

/// Graph coloring solver (uses batsat by default)
pub struct Solver {
    options: Options,
}

impl Solver {
    /// Creates a new solver with the given options (uses batsat backend)
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Returns the options of this solver
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Encodes a k-coloring problem without solving it
    ///
    /// # Errors
    /// Returns `InvalidPalette` if `colors == 0` and the graph has nodes
    pub fn encode<N>(&self, graph: &Graph<N>, colors: usize) -> Result<(AtomRegistry<N>, CNF)>
    where
        N: Clone + Eq + Hash + fmt::Debug,
    {
        if colors == 0 && !graph.is_empty() {
            return Err(ColoringError::InvalidPalette {
                colors,
                nodes: graph.node_count(),
            });
        }

        let registry = AtomRegistry::from_graph(graph, colors)?;
        tracing::debug!(
            nodes = registry.node_count(),
            colors,
            atoms = registry.total_atoms(),
            "registered atoms"
        );

        let cnf = ClauseBuilder::new(graph, &registry)
            .symmetry_breaking(self.options.symmetry_breaking)
            .build()?;
        tracing::debug!(
            variables = cnf.num_variables,
            clauses = cnf.num_clauses(),
            "encoded coloring problem"
        );

        Ok((registry, cnf))
    }

    /// Colors `graph` with at most `colors` colors using the batsat backend
    ///
    /// Returns a Solution indicating SAT/UNSAT and containing
    /// statistics and (if SAT) a coloring.
    pub fn solve<N>(&self, graph: &Graph<N>, colors: usize) -> Result<Solution<N>>
    where
        N: Clone + Eq + Hash + fmt::Debug,
    {
        let mut sat_solver = RustSatAdapter::new(BasicSolver::default());
        self.solve_with(&mut sat_solver, graph, colors)
    }

    /// Colors `graph` with a custom SAT solver
    ///
    /// # Errors
    /// Returns `Backend` if `sat_solver` already holds variables or clauses,
    /// rejects a clause or fails to solve
    pub fn solve_with<S, N>(
        &self,
        sat_solver: &mut S,
        graph: &Graph<N>,
        colors: usize,
    ) -> Result<Solution<N>>
    where
        S: SATSolver,
        N: Clone + Eq + Hash + fmt::Debug,
    {
        // Step 1: Allocate atoms and generate clauses
        let translation_start = Instant::now();
        let (registry, cnf) = self.encode(graph, colors)?;
        let translation_time = translation_start.elapsed();

        // Step 2: Run SAT solver
        let solving_start = Instant::now();
        let verdict = engine::run(sat_solver, &cnf)?;
        let solving_time = solving_start.elapsed();

        let stats = Statistics {
            translation_time,
            solving_time,
            num_variables: cnf.num_variables,
            num_clauses: cnf.num_clauses() as u32,
        };

        // Step 3: Decode the model
        match verdict {
            Verdict::Sat(assignment) => {
                tracing::debug!(solving_ms = stats.solving_time(), "solver returned SAT");
                if self.options.verify_model {
                    if let Some(idx) = cnf.first_violated(&assignment) {
                        tracing::warn!(clause = ?cnf.clauses[idx], "model falsifies clause");
                        return Err(ColoringError::FalsifiedClause(idx));
                    }
                }
                let coloring = decode(&assignment, &registry)?;
                Ok(Solution::Sat { coloring, stats })
            }
            Verdict::Unsat => {
                tracing::debug!(solving_ms = stats.solving_time(), "solver returned UNSAT");
                Ok(Solution::Unsat { stats })
            }
        }
    }

    /// Finds the smallest palette that colors `graph`, trying up to `max_colors`
    ///
    /// The empty graph has chromatic number 0. Returns None if no palette of
    /// size at most `max_colors` works.
    pub fn chromatic_number<N>(
        &self,
        graph: &Graph<N>,
        max_colors: usize,
    ) -> Result<Option<(usize, Coloring<N>)>>
    where
        N: Clone + Eq + Hash + fmt::Debug,
    {
        if graph.is_empty() {
            return Ok(Some((0, Coloring::new())));
        }

        // Colorable with k implies colorable with any k' > k, so the first
        // SAT answer is the minimum.
        for colors in 1..=max_colors {
            match self.solve(graph, colors)? {
                Solution::Sat { coloring, .. } => {
                    tracing::debug!(colors, "found chromatic number");
                    return Ok(Some((colors, coloring)));
                }
                Solution::Unsat { .. } => {
                    tracing::trace!(colors, "palette too small");
                }
            }
        }
        Ok(None)
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

/// Outcome of a coloring problem
#[derive(Debug)]
pub enum Solution<N: Eq + Hash> {
    /// The graph is k-colorable
    Sat {
        /// A proper coloring
        coloring: Coloring<N>,
        /// Solving statistics
        stats: Statistics,
    },
    /// The graph is not k-colorable
    Unsat {
        /// Solving statistics
        stats: Statistics,
    },
}

impl<N: Eq + Hash> Solution<N> {
    /// Returns true if a coloring exists
    pub fn is_sat(&self) -> bool {
        matches!(self, Solution::Sat { .. })
    }

    /// Returns true if no coloring exists
    pub fn is_unsat(&self) -> bool {
        matches!(self, Solution::Unsat { .. })
    }

    /// Returns the coloring if the solution is SAT
    pub fn coloring(&self) -> Option<&Coloring<N>> {
        match self {
            Solution::Sat { coloring, .. } => Some(coloring),
            Solution::Unsat { .. } => None,
        }
    }

    /// Consumes the solution, returning the coloring if SAT
    pub fn into_coloring(self) -> Option<Coloring<N>> {
        match self {
            Solution::Sat { coloring, .. } => Some(coloring),
            Solution::Unsat { .. } => None,
        }
    }

    /// Returns the statistics
    pub fn statistics(&self) -> &Statistics {
        match self {
            Solution::Sat { stats, .. } => stats,
            Solution::Unsat { stats } => stats,
        }
    }
}

/// Statistics collected during solving
#[derive(Debug, Clone)]
pub struct Statistics {
    translation_time: Duration,
    solving_time: Duration,
    num_variables: u32,
    num_clauses: u32,
}

impl Statistics {
    /// Returns translation time in milliseconds
    pub fn translation_time(&self) -> u64 {
        self.translation_time.as_millis() as u64
    }

    /// Returns solving time in milliseconds
    pub fn solving_time(&self) -> u64 {
        self.solving_time.as_millis() as u64
    }

    /// Returns total time in milliseconds
    pub fn total_time(&self) -> u64 {
        self.translation_time() + self.solving_time()
    }

    /// Returns number of variables
    pub fn num_variables(&self) -> u32 {
        self.num_variables
    }

    /// Returns number of clauses
    pub fn num_clauses(&self) -> u32 {
        self.num_clauses
    }
}
