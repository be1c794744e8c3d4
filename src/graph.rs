//! Undirected graph over opaque node identifiers
//!
//! Nodes keep their insertion order. That order is what the atom registry
//! walks, so the same input always produces the same encoding.

use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use std::hash::Hash;

use crate::error::{ColoringError, Result};

/// An undirected simple graph
///
/// Edges are unordered pairs of distinct nodes. Adding `(u, v)` after
/// `(v, u)` is a no-op, and self-loops are rejected.
#[derive(Clone)]
pub struct Graph<N> {
    nodes: Vec<N>,
    indices: FxHashMap<N, usize>,
    /// Endpoint indices, smaller index first
    edges: Vec<(usize, usize)>,
    edge_set: FxHashSet<(usize, usize)>,
}

impl<N: Clone + Eq + Hash + fmt::Debug> Graph<N> {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            indices: FxHashMap::default(),
            edges: Vec::new(),
            edge_set: FxHashSet::default(),
        }
    }

    /// Builds a graph from a list of edges, inserting endpoints as they appear
    ///
    /// # Errors
    /// Returns `SelfLoop` if any edge joins a node to itself
    pub fn from_edges<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, N)>,
    {
        let mut graph = Self::new();
        for (u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    /// Adds a node, returning true if it was not already present
    pub fn add_node(&mut self, node: N) -> bool {
        self.intern(node).1
    }

    /// Adds an undirected edge, inserting missing endpoints
    ///
    /// Returns true if the edge was new.
    ///
    /// # Errors
    /// Returns `SelfLoop` if `u == v`; the graph is left unchanged
    pub fn add_edge(&mut self, u: N, v: N) -> Result<bool> {
        if u == v {
            return Err(ColoringError::SelfLoop(format!("{:?}", u)));
        }

        let (a, _) = self.intern(u);
        let (b, _) = self.intern(v);
        let key = if a < b { (a, b) } else { (b, a) };

        if !self.edge_set.insert(key) {
            return Ok(false);
        }
        self.edges.push(key);
        Ok(true)
    }

    fn intern(&mut self, node: N) -> (usize, bool) {
        if let Some(&idx) = self.indices.get(&node) {
            return (idx, false);
        }
        let idx = self.nodes.len();
        self.indices.insert(node.clone(), idx);
        self.nodes.push(node);
        (idx, true)
    }

    /// Returns the nodes in insertion order
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// Returns an iterator over the edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N)> + '_ {
        self.edges
            .iter()
            .map(move |&(a, b)| (&self.nodes[a], &self.nodes[b]))
    }

    /// Returns the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if the node is present
    pub fn contains_node(&self, node: &N) -> bool {
        self.indices.contains_key(node)
    }

    /// Returns true if `u` and `v` are adjacent
    pub fn contains_edge(&self, u: &N, v: &N) -> bool {
        match (self.indices.get(u), self.indices.get(v)) {
            (Some(&a), Some(&b)) => {
                let key = if a < b { (a, b) } else { (b, a) };
                self.edge_set.contains(&key)
            }
            _ => false,
        }
    }

    /// Returns the insertion index of a node
    pub fn index_of(&self, node: &N) -> Option<usize> {
        self.indices.get(node).copied()
    }

    /// Returns the number of edges incident to `node` (0 if absent)
    pub fn degree(&self, node: &N) -> usize {
        match self.indices.get(node) {
            Some(&idx) => self
                .edges
                .iter()
                .filter(|&&(a, b)| a == idx || b == idx)
                .count(),
            None => 0,
        }
    }
}

impl<N: Clone + Eq + Hash + fmt::Debug> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: fmt::Debug> fmt::Debug for Graph<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edges: Vec<(&N, &N)> = self
            .edges
            .iter()
            .map(|&(a, b)| (&self.nodes[a], &self.nodes[b]))
            .collect();
        f.debug_struct("Graph")
            .field("nodes", &self.nodes)
            .field("edges", &edges)
            .finish()
    }
}
