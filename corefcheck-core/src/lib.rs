//! Structural validation for coreference and relation annotations.
//!
//! Scoring a clustering only makes sense when it is a true partition of the
//! mentions. This crate supplies the checks that guard that precondition
//! ([`ClusterValidator`]) together with the building blocks they rest on:
//! a hash-keyed [`DisjointSet`] for grouping linked mentions and a
//! [`TransitiveGraph`] whose [`ReachabilityMatrix`] exposes implied
//! relations.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod disjoint_set;
mod error;
mod graph;
mod natural;
mod node_index;
mod relation;
mod validate;

#[cfg(test)]
mod test_utils;

pub use crate::{
    disjoint_set::DisjointSet,
    error::{Result, ValidationError, ValidationErrorCode},
    graph::{ReachabilityMatrix, TransitiveGraph},
    natural::{NaturalKey, natural_key, sort_naturally},
    node_index::NodeIndex,
    relation::Relation,
    validate::{
        ClusterInvariant, ClusterValidator, ClusterViolation, DiagnosticSink, EmptySpanPolicy,
        TracingSink, ensure_unique,
    },
};
