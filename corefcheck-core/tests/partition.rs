//! End-to-end checks over a grouped document.

mod common;

use common::Document;
use corefcheck_core::{
    ClusterValidator, ClusterViolation, DisjointSet, EmptySpanPolicy, NodeIndex, Relation,
    TransitiveGraph, ensure_unique,
};
use rstest::{fixture, rstest};

#[fixture]
fn document() -> Document {
    Document::lovelace()
}

#[rstest]
fn grouped_links_form_a_valid_partition(document: Document) {
    let clusters = document.clusters();
    assert_eq!(clusters.len(), 2);
    ensure_unique(document.spans.keys()).expect("mention ids are unique");

    let validator = ClusterValidator::new();
    let mut findings = Vec::new();
    assert!(!validator.transitive_not_resolved(&clusters, &mut findings));
    for members in clusters.values() {
        let duplicate = validator
            .within_cluster_span_duplicate(members, &document.spans, &mut findings)
            .expect("every clustered mention has a span");
        assert!(!duplicate);
    }
    assert!(findings.is_empty());
    assert_eq!(validator.check_all(&clusters, &document.spans), Ok(None));
}

#[rstest]
fn shared_mention_breaks_disjointness(document: Document) {
    let mut clusters = document.clusters();
    if let Some(second) = clusters.get_mut(&1) {
        second.insert("m2");
    }
    let violations = ClusterValidator::new()
        .collect_all(&clusters, &document.spans)
        .expect("every clustered mention has a span");
    assert!(matches!(
        violations.as_slice(),
        [ClusterViolation::Overlap { shared, .. }] if shared == &["m2"]
    ));
}

#[rstest]
fn repeated_span_is_caught_after_grouping(mut document: Document) {
    document.spans.insert("m5", vec!["Babbage"]);
    let found = ClusterValidator::new()
        .with_empty_span_policy(EmptySpanPolicy::Skip)
        .check_all(&document.clusters(), &document.spans)
        .expect("every clustered mention has a span");
    assert!(matches!(
        found,
        Some(ClusterViolation::DuplicateSpan { ref tokens, .. }) if tokens == &["Babbage"]
    ));
}

#[rstest]
fn coreference_links_are_not_transitively_closed(document: Document) {
    let mut findings = Vec::new();
    let missing = ClusterValidator::new().unresolved_links(&document.links, &mut findings);
    assert_eq!(missing, vec![("m1", "m3")]);
    assert_eq!(findings.len(), 1);
}

#[test]
fn closure_agrees_with_grouping_on_symmetric_links() {
    let links: Vec<Relation<u32, ()>> = [(1, 2), (2, 3), (4, 5)]
        .into_iter()
        .flat_map(|(a, b)| [Relation::new(a, b, ()), Relation::new(b, a, ())])
        .collect();
    let index = NodeIndex::from_relations(&links);
    let reach = TransitiveGraph::from_relations(&index, &links).transitive_closure();
    let groups: DisjointSet<u32> = links.iter().map(|link| (link.source, link.target)).collect();

    for (from, a) in index.iter() {
        for (to, b) in index.iter() {
            assert_eq!(reach.reaches(from, to), groups.same_group(a, b), "{a} -> {b}");
        }
    }
}
