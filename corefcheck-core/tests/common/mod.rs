//! Fixtures shared by the integration suites.

use std::collections::{BTreeMap, HashMap, HashSet};

use corefcheck_core::{DisjointSet, Relation};

/// A small annotated document: mention spans plus `coref` links between
/// mentions.
pub struct Document {
    pub spans: HashMap<&'static str, Vec<&'static str>>,
    pub links: Vec<Relation<&'static str, &'static str>>,
}

impl Document {
    /// Two entities: "Ada Lovelace"/"she"/"the countess" and "Babbage"/"he".
    pub fn lovelace() -> Self {
        let spans = HashMap::from([
            ("m1", vec!["Ada", "Lovelace"]),
            ("m2", vec!["she"]),
            ("m3", vec!["the", "countess"]),
            ("m4", vec!["Babbage"]),
            ("m5", vec!["he"]),
        ]);
        let links = vec![
            Relation::new("m1", "m2", "coref"),
            Relation::new("m2", "m3", "coref"),
            Relation::new("m4", "m5", "coref"),
        ];
        Self { spans, links }
    }

    /// Groups the linked mentions into clusters numbered by their smallest
    /// member.
    pub fn clusters(&self) -> BTreeMap<usize, HashSet<&'static str>> {
        let groups: DisjointSet<&'static str> = self
            .links
            .iter()
            .map(|relation| (relation.source, relation.target))
            .collect();
        let mut members: Vec<HashSet<&'static str>> =
            groups.into_groups().map(|(_, group)| group).collect();
        members.sort_by_key(|group| group.iter().min().copied());
        members.into_iter().enumerate().collect()
    }
}
