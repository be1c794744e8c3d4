//! Atom allocation for the coloring encoding
//!
//! Each registered node owns a contiguous block of `k` atoms, one per color.
//! Blocks are handed out in registration order starting at 1 (DIMACS
//! convention: 0 is not a literal, a negative literal is a negation).

use rustc_hash::FxHashMap;
use std::fmt;
use std::hash::Hash;
use std::ops::Range;

use crate::error::{ColoringError, Result};
use crate::graph::Graph;

/// A propositional atom standing for one (node, color) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Atom(u32);

impl Atom {
    /// Wraps a raw variable id, returning None for 0
    pub fn new(id: u32) -> Option<Self> {
        (id != 0).then_some(Self(id))
    }

    /// Returns the atom referenced by a signed literal
    pub fn from_literal(lit: i32) -> Option<Self> {
        Self::new(lit.unsigned_abs())
    }

    /// Returns the raw variable id
    pub fn id(self) -> u32 {
        self.0
    }

    /// Positive literal of this atom
    pub fn pos(self) -> i32 {
        self.0 as i32
    }

    /// Negative literal of this atom
    pub fn neg(self) -> i32 {
        -(self.0 as i32)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bijection between (node, color) pairs and atoms
///
/// Node `i` (in registration order) with color `c` maps to atom
/// `i * k + c + 1`, so the issued atoms always form `[1, nodes * k]` and
/// inverse lookup is a division.
pub struct AtomRegistry<N> {
    palette: usize,
    nodes: Vec<N>,
    indices: FxHashMap<N, usize>,
}

impl<N: Clone + Eq + Hash + fmt::Debug> AtomRegistry<N> {
    /// Creates a registry for a palette of `palette` colors
    pub fn new(palette: usize) -> Self {
        Self {
            palette,
            nodes: Vec::new(),
            indices: FxHashMap::default(),
        }
    }

    /// Creates a registry with every node of `graph` registered in order
    ///
    /// # Errors
    /// Returns `CapacityExceeded` if the atoms do not fit in a literal
    pub fn from_graph(graph: &Graph<N>, palette: usize) -> Result<Self> {
        let mut registry = Self::new(palette);
        for node in graph.nodes() {
            registry.register(node)?;
        }
        Ok(registry)
    }

    /// Registers a node, allocating its block of atoms
    ///
    /// Idempotent: a node already registered gets its existing block back.
    /// Returns the range of raw atom ids (empty when the palette is empty).
    ///
    /// # Errors
    /// Returns `CapacityExceeded` if the block would exceed `i32::MAX`
    pub fn register(&mut self, node: &N) -> Result<Range<u32>> {
        if let Some(&idx) = self.indices.get(node) {
            return Ok(self.block(idx));
        }

        let idx = self.nodes.len();
        let fits = (idx + 1)
            .checked_mul(self.palette)
            .is_some_and(|end| end <= i32::MAX as usize);
        if !fits {
            return Err(ColoringError::CapacityExceeded(format!(
                "{} nodes with {} colors",
                idx + 1,
                self.palette
            )));
        }

        self.indices.insert(node.clone(), idx);
        self.nodes.push(node.clone());
        Ok(self.block(idx))
    }

    fn block(&self, idx: usize) -> Range<u32> {
        let start = (idx * self.palette) as u32 + 1;
        start..start + self.palette as u32
    }

    /// Returns the atom for `node` colored with `color`
    ///
    /// # Errors
    /// Returns `OutOfRange` if the node is unregistered or `color >= k`
    pub fn atom_of(&self, node: &N, color: usize) -> Result<Atom> {
        match self.indices.get(node) {
            Some(&idx) if color < self.palette => {
                Ok(Atom((idx * self.palette + color) as u32 + 1))
            }
            _ => Err(ColoringError::OutOfRange {
                node: format!("{:?}", node),
                color,
                palette: self.palette,
            }),
        }
    }

    /// Returns the (node, color) pair an atom stands for
    ///
    /// # Errors
    /// Returns `UnknownAtom` if the atom was never issued
    pub fn pair_of(&self, atom: Atom) -> Result<(&N, usize)> {
        let offset = atom.0 as usize - 1;
        if atom.0 as usize > self.total_atoms() {
            return Err(ColoringError::UnknownAtom(atom.0));
        }
        Ok((&self.nodes[offset / self.palette], offset % self.palette))
    }

    /// Returns the atoms of `node` ordered by color
    ///
    /// # Errors
    /// Returns `OutOfRange` if the node is unregistered
    pub fn atoms_of(&self, node: &N) -> Result<impl Iterator<Item = Atom>> {
        match self.indices.get(node) {
            Some(&idx) => Ok(self.block(idx).map(Atom)),
            None => Err(ColoringError::OutOfRange {
                node: format!("{:?}", node),
                color: 0,
                palette: self.palette,
            }),
        }
    }

    /// Returns the palette size `k`
    pub fn palette_size(&self) -> usize {
        self.palette
    }

    /// Returns the number of registered nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the registered nodes in registration order
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// Returns the number of atoms issued so far
    pub fn total_atoms(&self) -> usize {
        self.nodes.len() * self.palette
    }
}
