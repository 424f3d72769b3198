//! Dense vertex numbering for relation endpoints.
//!
//! Index assignment follows hash-set iteration order, so two indexes built
//! from the same relations may number vertices differently. Within one
//! [`NodeIndex`] the mapping is a fixed bijection onto `0..len()`.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::relation::Relation;

/// Bijection between the distinct endpoints of a relation list and
/// `0..len()`.
///
/// # Examples
/// ```
/// use corefcheck_core::{NodeIndex, Relation};
///
/// let relations = [Relation::new("e1", "e2", "after"), Relation::new("e2", "e3", "after")];
/// let index = NodeIndex::from_relations(&relations);
/// assert_eq!(index.len(), 3);
/// let e2 = index.index_of(&"e2").expect("endpoint indexed");
/// assert_eq!(index.node(e2), Some(&"e2"));
/// ```
#[derive(Clone, Debug)]
pub struct NodeIndex<N> {
    indices: HashMap<N, usize>,
    nodes: Vec<N>,
}

impl<N: Clone + Eq + Hash> NodeIndex<N> {
    /// Indexes every source and target in `relations`; labels are ignored.
    #[must_use]
    pub fn from_relations<L>(relations: &[Relation<N, L>]) -> Self {
        let distinct: HashSet<&N> = relations
            .iter()
            .flat_map(|relation| [&relation.source, &relation.target])
            .collect();

        let nodes: Vec<N> = distinct.into_iter().cloned().collect();
        let indices = nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (node.clone(), index))
            .collect();
        Self { indices, nodes }
    }

    /// Returns the vertex number assigned to `node`.
    #[must_use]
    pub fn index_of(&self, node: &N) -> Option<usize> {
        self.indices.get(node).copied()
    }
}

impl<N> NodeIndex<N> {
    /// Returns the identifier numbered `index`.
    #[must_use]
    pub fn node(&self, index: usize) -> Option<&N> {
        self.nodes.get(index)
    }

    /// Number of distinct endpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Reports whether the relation list had no endpoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over `(index, identifier)` in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &N)> {
        self.nodes.iter().enumerate()
    }
}
