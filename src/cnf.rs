//! Coloring constraints in conjunctive normal form
//!
//! The clause builder emits three families of clauses:
//! - at-least-one color per node (one k-literal clause)
//! - at-most-one color per node (k(k-1)/2 binary clauses)
//! - distinct colors across every edge (k binary clauses per edge)

use std::fmt;
use std::hash::Hash;
use std::io::{self, Write};

use crate::assignment::Assignment;
use crate::atom::AtomRegistry;
use crate::error::Result;
use crate::graph::Graph;

/// CNF representation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CNF {
    /// Number of variables
    pub num_variables: u32,
    /// CNF clauses (each clause is a vec of literals, negative = negated)
    pub clauses: Vec<Vec<i32>>,
}

impl CNF {
    /// Creates a new empty CNF
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty CNF that declares `num_variables` variables up front
    pub fn with_variables(num_variables: u32) -> Self {
        Self {
            num_variables,
            clauses: Vec::new(),
        }
    }

    /// Adds a clause to the CNF
    pub fn add_clause(&mut self, clause: Vec<i32>) {
        // Update max variable
        for &lit in &clause {
            let var = lit.unsigned_abs();
            if var > self.num_variables {
                self.num_variables = var;
            }
        }
        self.clauses.push(clause);
    }

    /// Number of clauses
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Returns the index of the first clause the assignment falsifies
    ///
    /// A literal outside the assignment counts as false.
    pub fn first_violated(&self, assignment: &Assignment) -> Option<usize> {
        self.clauses.iter().position(|clause| {
            !clause
                .iter()
                .any(|&lit| assignment.literal_value(lit) == Some(true))
        })
    }

    /// Returns true if every clause has a true literal under the assignment
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.first_violated(assignment).is_none()
    }

    /// Writes this CNF in DIMACS format
    pub fn write_dimacs<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "p cnf {} {}", self.num_variables, self.clauses.len())?;
        for clause in &self.clauses {
            for lit in clause {
                write!(out, "{} ", lit)?;
            }
            writeln!(out, "0")?;
        }
        Ok(())
    }

    /// Renders this CNF as a DIMACS string
    pub fn to_dimacs(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_dimacs(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Closed-form clause count: `n * (1 + k(k-1)/2) + e * k`
pub fn expected_clause_count(nodes: usize, edges: usize, palette: usize) -> usize {
    nodes * (1 + palette * palette.saturating_sub(1) / 2) + edges * palette
}

/// Builds the coloring CNF for a graph and a registry over its nodes
pub struct ClauseBuilder<'a, N> {
    graph: &'a Graph<N>,
    registry: &'a AtomRegistry<N>,
    symmetry_breaking: bool,
}

impl<'a, N: Clone + Eq + Hash + fmt::Debug> ClauseBuilder<'a, N> {
    /// Creates a builder; every graph node must be registered
    pub fn new(graph: &'a Graph<N>, registry: &'a AtomRegistry<N>) -> Self {
        Self {
            graph,
            registry,
            symmetry_breaking: false,
        }
    }

    /// Pins the first node to color 0
    ///
    /// Colorings are closed under palette permutation, so this adds one unit
    /// clause without changing satisfiability.
    pub fn symmetry_breaking(mut self, enabled: bool) -> Self {
        self.symmetry_breaking = enabled;
        self
    }

    /// Generates all clauses
    ///
    /// # Errors
    /// Returns `OutOfRange` if a graph node is missing from the registry
    pub fn build(&self) -> Result<CNF> {
        let k = self.registry.palette_size();
        let mut cnf = CNF::with_variables(self.registry.total_atoms() as u32);

        for node in self.graph.nodes() {
            self.exactly_one_color(&mut cnf, node, k)?;
        }

        for (u, v) in self.graph.edges() {
            for color in 0..k {
                let a = self.registry.atom_of(u, color)?;
                let b = self.registry.atom_of(v, color)?;
                cnf.add_clause(vec![a.neg(), b.neg()]);
            }
        }

        if self.symmetry_breaking && k > 0 {
            if let Some(first) = self.graph.nodes().first() {
                cnf.add_clause(vec![self.registry.atom_of(first, 0)?.pos()]);
            }
        }

        tracing::trace!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            colors = k,
            clauses = cnf.num_clauses(),
            "built coloring clauses"
        );

        Ok(cnf)
    }

    /// At-least-one clause followed by the pairwise at-most-one clauses
    ///
    /// With k = 0 the at-least-one clause is empty, which makes the formula
    /// unsatisfiable.
    fn exactly_one_color(&self, cnf: &mut CNF, node: &N, k: usize) -> Result<()> {
        let atoms = (0..k)
            .map(|color| self.registry.atom_of(node, color))
            .collect::<Result<Vec<_>>>()?;

        cnf.add_clause(atoms.iter().map(|a| a.pos()).collect());

        for (i, a) in atoms.iter().enumerate() {
            for b in &atoms[i + 1..] {
                cnf.add_clause(vec![a.neg(), b.neg()]);
            }
        }
        Ok(())
    }
}
