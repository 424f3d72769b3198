//! Unit and property tests for the hash-keyed disjoint set.

use std::collections::{BTreeSet, HashSet};

use proptest::prelude::*;
use rstest::rstest;

use super::DisjointSet;
use crate::test_utils::suite_proptest_config;

type Partition = BTreeSet<BTreeSet<u8>>;

fn partition(set: &DisjointSet<u8>) -> Partition {
    set.groups()
        .map(|(_, members)| members.iter().copied().collect())
        .collect()
}

fn build(pairs: &[(u8, u8)]) -> DisjointSet<u8> {
    pairs.iter().copied().collect()
}

/// Connected components computed by repeated relabelling, used as an
/// oracle for the incremental structure.
fn oracle_partition(pairs: &[(u8, u8)]) -> Partition {
    let mut groups: Vec<BTreeSet<u8>> = Vec::new();
    for &(a, b) in pairs {
        let (touching, rest): (Vec<_>, Vec<_>) = groups
            .into_iter()
            .partition(|group| group.contains(&a) || group.contains(&b));
        let mut merged: BTreeSet<u8> = touching.into_iter().flatten().collect();
        merged.insert(a);
        merged.insert(b);
        groups = rest;
        groups.push(merged);
    }
    groups.into_iter().collect()
}

fn assert_leader_invariants(set: &DisjointSet<u8>, items: &HashSet<u8>) {
    for item in items {
        let leader = set.leader(item).expect("every inserted item has a leader");
        let members = set.group(leader).expect("every leader owns a group");
        assert!(members.contains(item), "{item} missing from its group");
        assert!(members.contains(leader), "leader {leader} outside its group");
    }
}

#[test]
fn fresh_pair_is_led_by_first_item() {
    let mut set = DisjointSet::new();
    set.add("a", "b");
    assert_eq!(set.leader(&"a"), Some(&"a"));
    assert_eq!(set.leader(&"b"), Some(&"a"));
    assert_eq!(set.group(&"a").map(HashSet::len), Some(2));
}

#[rstest]
#[case::attach_to_left(&[("a", "b"), ("a", "c")])]
#[case::attach_to_right(&[("a", "b"), ("c", "b")])]
fn single_known_item_pulls_newcomer_into_group(#[case] pairs: &[(&'static str, &'static str)]) {
    let set: DisjointSet<&str> = pairs.iter().copied().collect();
    assert_eq!(set.group_count(), 1);
    assert_eq!(set.leader(&"c"), Some(&"a"));
}

#[test]
fn pair_within_one_group_is_a_no_op() {
    let mut set = DisjointSet::new();
    set.extend([("a", "b"), ("b", "c")]);
    let before = set.group(&"a").cloned();
    set.add("c", "a");
    assert_eq!(set.group(&"a").cloned(), before);
    assert_eq!(set.group_count(), 1);
}

#[test]
fn merge_keeps_larger_group_leader() {
    let mut set = DisjointSet::new();
    set.extend([("x", "y")]);
    set.extend([("a", "b"), ("a", "c")]);
    set.add("x", "a");

    assert_eq!(set.group_count(), 1);
    for item in ["a", "b", "c", "x", "y"] {
        assert_eq!(set.leader(&item), Some(&"a"), "{item} must follow leader a");
    }
    assert!(set.group(&"x").is_none(), "absorbed group must be removed");
}

#[test]
fn tied_merge_keeps_first_argument_group() {
    let mut set = DisjointSet::new();
    set.extend([("a", "b"), ("c", "d")]);
    set.add("d", "b");
    assert_eq!(set.leader(&"a"), Some(&"c"));
    assert_eq!(set.group_of(&"b").map(HashSet::len), Some(4));
}

#[test]
fn self_pair_creates_singleton() {
    let mut set = DisjointSet::new();
    set.add(7_u8, 7);
    assert_eq!(set.len(), 1);
    assert_eq!(set.group(&7).map(HashSet::len), Some(1));
}

#[test]
fn insert_registers_singletons_without_disturbing_groups() {
    let mut set = DisjointSet::new();
    set.add(1_u8, 2);
    set.insert(2);
    set.insert(9);
    assert_eq!(set.group_count(), 2);
    assert_eq!(set.leader(&9), Some(&9));
    assert!(set.same_group(&1, &2));
    assert!(!set.same_group(&1, &9));
}

#[test]
fn unknown_items_have_no_group() {
    let set: DisjointSet<u8> = DisjointSet::new();
    assert!(set.is_empty());
    assert!(!set.contains(&3));
    assert!(set.group_of(&3).is_none());
    assert!(!set.same_group(&3, &3));
}

proptest! {
    #![proptest_config(suite_proptest_config(256))]

    #[test]
    fn added_pairs_share_a_leader(pairs in prop::collection::vec((0_u8..32, 0_u8..32), 0..64)) {
        let set = build(&pairs);
        for (a, b) in &pairs {
            prop_assert_eq!(set.leader(a), set.leader(b));
        }
    }

    #[test]
    fn groups_partition_every_inserted_item(
        pairs in prop::collection::vec((0_u8..32, 0_u8..32), 0..64),
    ) {
        let set = build(&pairs);
        let items: HashSet<u8> = pairs.iter().flat_map(|&(a, b)| [a, b]).collect();

        let mut seen = HashSet::new();
        for (_, members) in set.groups() {
            for member in members {
                prop_assert!(seen.insert(*member), "{} appears in two groups", member);
            }
        }
        prop_assert_eq!(&seen, &items);
        prop_assert_eq!(set.len(), items.len());
        assert_leader_invariants(&set, &items);
    }

    #[test]
    fn partition_matches_component_oracle(
        pairs in prop::collection::vec((0_u8..24, 0_u8..24), 0..48),
    ) {
        prop_assert_eq!(partition(&build(&pairs)), oracle_partition(&pairs));
    }

    #[test]
    fn partition_ignores_pair_order_and_repeats(
        (pairs, shuffled) in prop::collection::vec((0_u8..24, 0_u8..24), 0..48)
            .prop_flat_map(|pairs| (Just(pairs.clone()), Just(pairs).prop_shuffle())),
    ) {
        let mut repeated = build(&pairs);
        repeated.extend(pairs.iter().copied());
        let flipped: Vec<_> = shuffled.iter().map(|&(a, b)| (b, a)).collect();

        let expected = partition(&build(&pairs));
        prop_assert_eq!(partition(&repeated), expected.clone());
        prop_assert_eq!(partition(&build(&flipped)), expected);
    }
}
