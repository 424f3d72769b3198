//! Completeness of transitive relation lists.
//!
//! A producer that asserts `a → b` and `b → c` for a transitive relation is
//! expected to assert `a → c` as well. The closure of the listed relations is
//! compared against the relations themselves; every reachable pair that was
//! not listed is unresolved.

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use tracing::debug;

use crate::{
    graph::TransitiveGraph, natural::natural_key, node_index::NodeIndex, relation::Relation,
};

/// Returns every `(source, target)` pair, `source != target`, implied by
/// `relations` but absent from them, sorted by the natural order of the
/// endpoints.
pub(super) fn missing_links<N, L>(relations: &[Relation<N, L>]) -> Vec<(N, N)>
where
    N: Clone + Display + Eq + Hash,
{
    let index = NodeIndex::from_relations(relations);
    let graph = TransitiveGraph::from_relations(&index, relations);
    let closure = graph.transitive_closure();
    debug!(
        vertices = index.len(),
        edges = graph.edge_count(),
        "computed relation closure"
    );

    let listed: HashSet<(&N, &N)> = relations.iter().map(Relation::endpoints).collect();
    let (nodes, reach) = (&index, &closure);
    let mut missing: Vec<(N, N)> = nodes
        .iter()
        .flat_map(move |(from, source)| {
            reach
                .reachable_from(from)
                .filter(move |&to| to != from)
                .filter_map(move |to| nodes.node(to))
                .map(move |target| (source, target))
        })
        .filter(|pair| !listed.contains(pair))
        .map(|(source, target)| (source.clone(), target.clone()))
        .collect();
    missing.sort_by_cached_key(|(source, target)| {
        (
            natural_key(&source.to_string()),
            natural_key(&target.to_string()),
        )
    });
    missing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relations(pairs: &[(&'static str, &'static str)]) -> Vec<Relation<&'static str, &'static str>> {
        pairs
            .iter()
            .map(|&(source, target)| Relation::new(source, target, "after"))
            .collect()
    }

    #[test]
    fn chain_is_missing_its_shortcut() {
        let missing = missing_links(&relations(&[("e1", "e2"), ("e2", "e3")]));
        assert_eq!(missing, vec![("e1", "e3")]);
    }

    #[test]
    fn closed_relations_have_nothing_missing() {
        let missing = missing_links(&relations(&[("e1", "e2"), ("e2", "e3"), ("e1", "e3")]));
        assert!(missing.is_empty());
    }

    #[test]
    fn cycle_requires_every_ordered_pair() {
        let missing = missing_links(&relations(&[("e1", "e2"), ("e2", "e1")]));
        assert!(missing.is_empty());

        let missing = missing_links(&relations(&[("e1", "e2"), ("e2", "e3"), ("e3", "e1")]));
        assert_eq!(
            missing,
            vec![("e1", "e3"), ("e2", "e1"), ("e3", "e2")]
        );
    }

    #[test]
    fn missing_pairs_use_natural_order() {
        let missing = missing_links(&relations(&[
            ("e10", "e2"),
            ("e2", "e3"),
            ("e9", "e10"),
        ]));
        assert_eq!(
            missing,
            vec![("e9", "e2"), ("e9", "e3"), ("e10", "e3")]
        );
    }
}
