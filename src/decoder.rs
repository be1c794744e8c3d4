//! Turns a satisfying assignment back into a coloring

use rustc_hash::FxHashMap;
use std::fmt;
use std::hash::Hash;

use crate::assignment::Assignment;
use crate::atom::AtomRegistry;
use crate::error::{ColoringError, Result};
use crate::graph::Graph;

/// A map from node to color index, in registration order
#[derive(Clone, PartialEq, Eq)]
pub struct Coloring<N: Eq + Hash> {
    order: Vec<N>,
    colors: FxHashMap<N, usize>,
}

impl<N: Clone + Eq + Hash + fmt::Debug> Coloring<N> {
    /// Creates an empty coloring
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            colors: FxHashMap::default(),
        }
    }

    /// Assigns a color to a node, returning the previous color if any
    pub fn insert(&mut self, node: N, color: usize) -> Option<usize> {
        let previous = self.colors.insert(node.clone(), color);
        if previous.is_none() {
            self.order.push(node);
        }
        previous
    }

    /// Returns the color of a node
    pub fn color_of(&self, node: &N) -> Option<usize> {
        self.colors.get(node).copied()
    }

    /// Number of colored nodes
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no node is colored
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns an iterator over (node, color) pairs in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&N, usize)> + '_ {
        self.order.iter().map(move |node| (node, self.colors[node]))
    }

    /// Number of distinct colors in use
    pub fn num_colors_used(&self) -> usize {
        let mut seen: Vec<usize> = self.colors.values().copied().collect();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }

    /// Returns the edges whose endpoints share a color or are uncolored
    pub fn conflicts<'g>(&self, graph: &'g Graph<N>) -> Vec<(&'g N, &'g N)> {
        graph
            .edges()
            .filter(|(u, v)| match (self.color_of(u), self.color_of(v)) {
                (Some(a), Some(b)) => a == b,
                _ => true,
            })
            .collect()
    }

    /// Returns true if every node of `graph` is colored and no edge conflicts
    pub fn is_proper(&self, graph: &Graph<N>) -> bool {
        graph.nodes().iter().all(|n| self.colors.contains_key(n))
            && self.conflicts(graph).is_empty()
    }
}

impl<N: Clone + Eq + Hash + fmt::Debug> Default for Coloring<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Eq + Hash + fmt::Debug> fmt::Debug for Coloring<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.order.iter().map(|node| (node, self.colors[node])))
            .finish()
    }
}

/// Decodes an assignment into a coloring
///
/// Every registered node must have exactly one true atom. Anything else is
/// a solver contract breach and is reported rather than repaired, so no
/// partial coloring is ever returned.
///
/// # Errors
/// Returns `MalformedAssignment` naming the first offending node
pub fn decode<N>(assignment: &Assignment, registry: &AtomRegistry<N>) -> Result<Coloring<N>>
where
    N: Clone + Eq + Hash + fmt::Debug,
{
    let mut coloring = Coloring::new();

    for node in registry.nodes() {
        let mut chosen = None;
        let mut true_colors = 0;

        for (color, atom) in registry.atoms_of(node)?.enumerate() {
            match assignment.value(atom) {
                Some(true) => {
                    true_colors += 1;
                    chosen = Some(color);
                }
                Some(false) => {}
                None => {
                    tracing::warn!(
                        atom = atom.id(),
                        len = assignment.len(),
                        "assignment is not total"
                    );
                    return Err(malformed(node, true_colors));
                }
            }
        }

        match chosen {
            Some(color) if true_colors == 1 => {
                coloring.insert(node.clone(), color);
            }
            _ => return Err(malformed(node, true_colors)),
        }
    }

    Ok(coloring)
}

fn malformed<N: fmt::Debug>(node: &N, true_colors: usize) -> ColoringError {
    ColoringError::MalformedAssignment {
        node: format!("{:?}", node),
        true_colors,
    }
}
