//! Pairwise disjointness of clusters.

use std::collections::{BTreeMap, HashSet};
use std::fmt::Display;
use std::hash::{BuildHasher, Hash};

use super::{ClusterViolation, render_sorted};

/// Lazily yields one [`ClusterViolation::Overlap`] per pair of clusters that
/// share a mention.
///
/// Pairs are visited as `(i, j)` with `i` before `j` in map order, so the
/// first item is the same on every run over the same clustering.
pub(super) fn overlapping_pairs<C, M, S>(
    clusters: &BTreeMap<C, HashSet<M, S>>,
) -> impl Iterator<Item = ClusterViolation> + '_
where
    C: Display,
    M: Display + Eq + Hash,
    S: BuildHasher,
{
    clusters
        .iter()
        .enumerate()
        .flat_map(move |(position, (first_id, first))| {
            clusters
                .iter()
                .skip(position + 1)
                .filter_map(move |(second_id, second)| {
                    let mut shared = first.intersection(second).peekable();
                    shared.peek()?;
                    Some(ClusterViolation::Overlap {
                        first: first_id.to_string(),
                        second: second_id.to_string(),
                        first_members: render_sorted(first),
                        second_members: render_sorted(second),
                        shared: render_sorted(shared),
                    })
                })
        })
}
