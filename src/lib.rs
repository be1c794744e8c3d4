//! # colorsat
//!
//! Graph k-coloring by reduction to boolean satisfiability.
//!
//! Every (node, color) pair becomes a propositional atom. The encoder emits
//! CNF clauses forcing exactly one color per node and distinct colors across
//! every edge, hands the formula to a SAT solver, and decodes a satisfying
//! assignment back into a per-node color.
//!
//! ## Example
//!
//! ```rust,ignore
//! use colorsat::graph::Graph;
//! use colorsat::solver::{Options, Solver};
//!
//! let graph = Graph::from_edges([("A", "B"), ("B", "C"), ("A", "C")])?;
//!
//! let solver = Solver::new(Options::default());
//! let solution = solver.solve(&graph, 3)?;
//!
//! if let Some(coloring) = solution.coloring() {
//!     for (node, color) in coloring.iter() {
//!         println!("{node} -> {color}");
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2024_compatibility)]

/// Undirected graphs over opaque node identifiers
pub mod graph;

/// Bijection between (node, color) pairs and SAT atoms
pub mod atom;

/// CNF container, clause generation and DIMACS output
pub mod cnf;

/// SAT solver trait and backends
pub mod engine;

/// Truth assignments returned by a solver
pub mod assignment;

/// Assignment to coloring conversion
pub mod decoder;

/// Main solver API
pub mod solver;

/// Error types
pub mod error {
    //! Error types for colorsat

    use thiserror::Error;

    /// Errors that can occur while encoding, solving or decoding
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum ColoringError {
        /// Zero colors requested for a graph that has nodes
        #[error("invalid palette: {colors} colors cannot color {nodes} nodes")]
        InvalidPalette {
            /// Requested palette size
            colors: usize,
            /// Number of nodes needing a color
            nodes: usize,
        },

        /// Atom lookup for an unregistered node or a color outside the palette
        #[error("no atom for node {node} with color {color} (palette size {palette})")]
        OutOfRange {
            /// Debug rendering of the node
            node: String,
            /// Requested color index
            color: usize,
            /// Palette size of the registry
            palette: usize,
        },

        /// Inverse lookup of an atom id the registry never issued
        #[error("unknown atom: {0}")]
        UnknownAtom(u32),

        /// Solver model violates the exactly-one-color invariant
        #[error("malformed assignment: node {node} has {true_colors} true colors")]
        MalformedAssignment {
            /// Debug rendering of the offending node
            node: String,
            /// Number of colors the model set to true for that node
            true_colors: usize,
        },

        /// Solver model falsifies a clause of the formula it was given
        #[error("model falsifies clause {0}")]
        FalsifiedClause(usize),

        /// Edge from a node to itself
        #[error("self-loop on node {0}")]
        SelfLoop(String),

        /// More atoms requested than a signed 32-bit literal can address
        #[error("capacity exceeded: {0}")]
        CapacityExceeded(String),

        /// The SAT backend reported a failure
        #[error("solver backend: {0}")]
        Backend(String),
    }

    /// Result type for colorsat operations
    pub type Result<T> = std::result::Result<T, ColoringError>;
}

// Re-export commonly used types
pub use error::{ColoringError, Result};
