//! Directed graph over indexed vertices and its transitive closure.
//!
//! Coreference chains and temporal `after` links are transitive: if `a → b`
//! and `b → c` are asserted, `a → c` is implied. The closure computed here is
//! the full reachability relation, used to check whether a relation list has
//! already been closed by its producer.
//!
//! Traversal runs from every vertex with an explicit work stack, so chain
//! length is bounded by heap memory rather than call-stack depth.

mod matrix;

use std::hash::Hash;

use tracing::debug;

use crate::{node_index::NodeIndex, relation::Relation};

pub use self::matrix::ReachabilityMatrix;

/// Adjacency-list digraph over vertices `0..vertex_count`.
///
/// # Examples
/// ```
/// use corefcheck_core::TransitiveGraph;
///
/// let mut graph = TransitiveGraph::new(3);
/// graph.add_edge(0, 1);
/// graph.add_edge(1, 2);
/// let closure = graph.transitive_closure();
/// assert!(closure.reaches(0, 2));
/// assert!(!closure.reaches(2, 0));
/// ```
#[derive(Clone, Debug, Default)]
pub struct TransitiveGraph {
    adjacency: Vec<Vec<usize>>,
    dropped_edges: usize,
}

impl TransitiveGraph {
    /// Creates a graph with `vertex_count` vertices and no edges.
    #[must_use]
    pub fn new(vertex_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertex_count],
            dropped_edges: 0,
        }
    }

    /// Builds the graph of `relations` over the vertices numbered by `index`.
    ///
    /// Relations whose endpoints are absent from `index` contribute no edge.
    #[must_use]
    pub fn from_relations<N, L>(index: &NodeIndex<N>, relations: &[Relation<N, L>]) -> Self
    where
        N: Clone + Eq + Hash,
    {
        let mut graph = Self::new(index.len());
        for relation in relations {
            if let (Some(source), Some(target)) = (
                index.index_of(&relation.source),
                index.index_of(&relation.target),
            ) {
                graph.add_edge(source, target);
            }
        }
        graph
    }

    /// Appends the directed edge `source → target`.
    ///
    /// Endpoints are not validated. Parallel edges are harmless. An edge
    /// whose source lies outside the vertex range is discarded; one whose
    /// target does is kept but never followed.
    pub fn add_edge(&mut self, source: usize, target: usize) {
        match self.adjacency.get_mut(source) {
            Some(neighbours) => neighbours.push(target),
            None => {
                self.dropped_edges += 1;
                debug!(source, target, "discarding edge from out-of-range vertex");
            }
        }
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of stored edges, parallel edges included.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Number of edges discarded because their source was out of range.
    #[must_use]
    pub const fn dropped_edges(&self) -> usize {
        self.dropped_edges
    }

    /// Direct successors of `vertex`, in insertion order.
    #[must_use]
    pub fn neighbours(&self, vertex: usize) -> &[usize] {
        self.adjacency
            .get(vertex)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Computes full reachability: every vertex reaches itself and
    /// everything along any directed path, cycles included.
    ///
    /// Costs `O(V · (V + E))`. The graph is not modified, so repeated calls
    /// return equal matrices.
    #[must_use]
    pub fn transitive_closure(&self) -> ReachabilityMatrix {
        let mut closure = ReachabilityMatrix::unreachable(self.vertex_count());
        let mut stack = Vec::new();
        for source in 0..self.vertex_count() {
            closure.mark(source, source);
            stack.push(source);
            while let Some(vertex) = stack.pop() {
                for &next in self.neighbours(vertex) {
                    if closure.mark(source, next) {
                        stack.push(next);
                    }
                }
            }
        }
        closure
    }
}
