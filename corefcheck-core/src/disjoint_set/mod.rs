//! Incremental union-find over arbitrary hashable identifiers.
//!
//! Mentions arrive as unordered pairs ("these two co-refer") rather than as
//! a dense `0..n` range, so the structure keys both the leader map and the
//! group map by the identifiers themselves. Group membership is kept
//! explicitly: a merge moves the smaller group into the larger one and
//! repoints every moved member at the surviving leader, so reading a group
//! never needs a `find` traversal.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Partition of items into disjoint groups, built from pairwise links.
///
/// # Examples
/// ```
/// use corefcheck_core::DisjointSet;
///
/// let mut set = DisjointSet::new();
/// set.add("e1", "e2");
/// set.add("e3", "e2");
/// assert_eq!(set.leader(&"e3"), set.leader(&"e1"));
/// assert_eq!(set.group_count(), 1);
/// assert_eq!(set.len(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct DisjointSet<T> {
    leader: HashMap<T, T>,
    group: HashMap<T, HashSet<T>>,
}

impl<T> Default for DisjointSet<T> {
    fn default() -> Self {
        Self {
            leader: HashMap::new(),
            group: HashMap::new(),
        }
    }
}

impl<T: Clone + Eq + Hash> DisjointSet<T> {
    /// Creates an empty partition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `a` and `b` belong to the same group.
    ///
    /// Unknown items are created on the fly. When `a` and `b` already lead
    /// different groups, the smaller group is absorbed into the larger; on a
    /// tie `a`'s group survives. Re-adding a known pair is a no-op.
    pub fn add(&mut self, a: T, b: T) {
        let leader_a = self.leader.get(&a).cloned();
        let leader_b = self.leader.get(&b).cloned();
        match (leader_a, leader_b) {
            (None, None) => {
                self.leader.insert(b.clone(), a.clone());
                self.leader.insert(a.clone(), a.clone());
                self.group.insert(a.clone(), HashSet::from([a, b]));
            }
            (Some(leader), None) => self.attach(leader, b),
            (None, Some(leader)) => self.attach(leader, a),
            (Some(left), Some(right)) if left == right => {}
            (Some(left), Some(right)) => self.merge(left, right),
        }
    }

    /// Registers `item` as a singleton group unless it is already known.
    pub fn insert(&mut self, item: T) {
        if self.leader.contains_key(&item) {
            return;
        }
        self.leader.insert(item.clone(), item.clone());
        self.group.insert(item.clone(), HashSet::from([item]));
    }

    fn attach(&mut self, leader: T, item: T) {
        if let Some(members) = self.group.get_mut(&leader) {
            members.insert(item.clone());
        }
        self.leader.insert(item, leader);
    }

    fn merge(&mut self, left: T, right: T) {
        let size = |leader: &T| self.group.get(leader).map_or(0, HashSet::len);
        let (survivor, absorbed) = if size(&left) < size(&right) {
            (right, left)
        } else {
            (left, right)
        };

        let Some(moved) = self.group.remove(&absorbed) else {
            return;
        };
        for member in &moved {
            self.leader.insert(member.clone(), survivor.clone());
        }
        if let Some(members) = self.group.get_mut(&survivor) {
            members.extend(moved);
        }
    }

    /// Returns the representative of `item`'s group.
    #[must_use]
    pub fn leader(&self, item: &T) -> Option<&T> {
        self.leader.get(item)
    }

    /// Returns the members of the group led by `leader`.
    ///
    /// Yields `None` when `leader` is not currently a representative.
    #[must_use]
    pub fn group(&self, leader: &T) -> Option<&HashSet<T>> {
        self.group.get(leader)
    }

    /// Returns the members of the group containing `item`.
    #[must_use]
    pub fn group_of(&self, item: &T) -> Option<&HashSet<T>> {
        self.leader(item).and_then(|leader| self.group(leader))
    }

    /// Reports whether both items are known and share a group.
    #[must_use]
    pub fn same_group(&self, a: &T, b: &T) -> bool {
        match (self.leader(a), self.leader(b)) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        }
    }

    /// Reports whether `item` has been inserted.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.leader.contains_key(item)
    }

    /// Iterates over `(leader, members)` for every group, in no particular
    /// order.
    pub fn groups(&self) -> impl Iterator<Item = (&T, &HashSet<T>)> {
        self.group.iter()
    }

    /// Consumes the partition and yields `(leader, members)` for every group.
    pub fn into_groups(self) -> impl Iterator<Item = (T, HashSet<T>)> {
        self.group.into_iter()
    }

    /// Number of items ever inserted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.leader.len()
    }

    /// Reports whether no item has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leader.is_empty()
    }

    /// Number of disjoint groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.group.len()
    }
}

impl<T: Clone + Eq + Hash> Extend<(T, T)> for DisjointSet<T> {
    fn extend<I: IntoIterator<Item = (T, T)>>(&mut self, pairs: I) {
        for (a, b) in pairs {
            self.add(a, b);
        }
    }
}

impl<T: Clone + Eq + Hash> FromIterator<(T, T)> for DisjointSet<T> {
    fn from_iter<I: IntoIterator<Item = (T, T)>>(pairs: I) -> Self {
        let mut set = Self::new();
        set.extend(pairs);
        set
    }
}

#[cfg(test)]
mod tests;
