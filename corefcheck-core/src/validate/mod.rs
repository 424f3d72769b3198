//! Partition checks run on a clustering before it is scored.
//!
//! A submitted clustering must be a proper equivalence partition: no mention
//! may sit in two clusters, and no cluster may hold two mentions covering
//! exactly the same tokens. Relation lists that claim to be transitive must
//! also already contain every implied link.
//!
//! Findings are [`ClusterViolation`] values handed to a [`DiagnosticSink`];
//! the boolean results only summarise them. A cluster that references a
//! mention with no known span is a [`ValidationError`] instead, because such
//! input cannot be scored at all.

mod closure;
mod overlap;
mod sink;
mod span;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Display;
use std::hash::{BuildHasher, Hash};

use thiserror::Error;

use crate::{
    error::{Result, ValidationError},
    natural::sort_naturally,
    relation::Relation,
};

pub use self::sink::{DiagnosticSink, TracingSink};

use self::span::{SpanScan, scan_spans};

/// How mentions without a resolved span take part in duplicate detection.
///
/// Two mentions with empty spans trivially "share" a span. Whether that
/// should count as a duplicate is ambiguous, so the behaviour is chosen
/// explicitly.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum EmptySpanPolicy {
    /// Colliding empty spans make the check fail, but no diagnostic is
    /// recorded for them.
    #[default]
    FlagSilently,
    /// Mentions with empty spans are left out of the check entirely.
    Skip,
}

/// Structural properties a clustering must satisfy.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClusterInvariant {
    /// Clusters are pairwise disjoint.
    Disjoint,
    /// Within each cluster, distinct mentions have distinct spans.
    UniqueSpans,
}

impl ClusterInvariant {
    /// Returns all invariants in evaluation order.
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::Disjoint, Self::UniqueSpans]
    }
}

/// A validation finding. Identifiers are rendered with `Display` and member
/// lists are in natural order.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ClusterViolation {
    /// Two clusters share at least one mention.
    #[error("clusters `{first}` and `{second}` share mentions [{}]", .shared.join(", "))]
    Overlap {
        /// Cluster visited first.
        first: String,
        /// Cluster visited second.
        second: String,
        /// Members of the first cluster.
        first_members: Vec<String>,
        /// Members of the second cluster.
        second_members: Vec<String>,
        /// Mentions present in both.
        shared: Vec<String>,
    },
    /// Two mentions in one cluster cover the same token sequence.
    #[error("mentions `{first}` and `{second}` share span [{}]", .tokens.join(","))]
    DuplicateSpan {
        /// Mention that claimed the span first.
        first: String,
        /// Mention that repeated it.
        second: String,
        /// The shared token sequence.
        tokens: Vec<String>,
    },
    /// A transitive relation implies `from → to`, which is not listed.
    #[error("relation `{from}` -> `{to}` is implied but missing")]
    UnresolvedLink {
        /// Origin of the implied relation.
        from: String,
        /// Destination of the implied relation.
        to: String,
    },
}

/// Runs partition checks with a fixed configuration.
///
/// # Examples
/// ```
/// use std::collections::{BTreeMap, HashSet};
///
/// use corefcheck_core::ClusterValidator;
///
/// let clusters = BTreeMap::from([
///     (0, HashSet::from(["a", "b"])),
///     (1, HashSet::from(["b", "c"])),
/// ]);
/// let mut findings = Vec::new();
/// assert!(ClusterValidator::new().transitive_not_resolved(&clusters, &mut findings));
/// assert_eq!(findings.len(), 1);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ClusterValidator {
    empty_span_policy: EmptySpanPolicy,
}

impl ClusterValidator {
    /// Creates a validator with the default [`EmptySpanPolicy`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides how empty spans are treated.
    #[must_use]
    pub const fn with_empty_span_policy(mut self, policy: EmptySpanPolicy) -> Self {
        self.empty_span_policy = policy;
        self
    }

    /// Returns the configured empty-span policy.
    #[must_use]
    pub const fn empty_span_policy(&self) -> EmptySpanPolicy {
        self.empty_span_policy
    }

    /// Reports whether any two clusters still share a mention.
    ///
    /// Returns `true` ("not resolved") after recording the first overlapping
    /// pair, visiting pairs `(i, j)` with `i` before `j` in map order.
    /// Returns `false` when the clusters are pairwise disjoint.
    pub fn transitive_not_resolved<C, M, S>(
        &self,
        clusters: &BTreeMap<C, HashSet<M, S>>,
        mut sink: impl DiagnosticSink,
    ) -> bool
    where
        C: Display,
        M: Display + Eq + Hash,
        S: BuildHasher,
    {
        match overlap::overlapping_pairs(clusters).next() {
            Some(violation) => {
                sink.record(violation);
                true
            }
            None => false,
        }
    }

    /// Reports whether two distinct mentions of `cluster` share a span.
    ///
    /// Mentions are visited in the iteration order of `cluster`; the first
    /// collision is recorded (unless it is an empty span under
    /// [`EmptySpanPolicy::FlagSilently`]) and ends the scan.
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingMention`] when a mention reached
    /// before any collision has no entry in `spans`.
    ///
    /// # Examples
    /// ```
    /// use std::collections::HashMap;
    ///
    /// use corefcheck_core::{ClusterValidator, ValidationError};
    ///
    /// let spans = HashMap::from([("e1", vec![1, 2]), ("e2", vec![1, 2])]);
    /// let validator = ClusterValidator::new();
    /// let mut findings = Vec::new();
    /// assert_eq!(validator.within_cluster_span_duplicate(&["e1", "e2"], &spans, &mut findings), Ok(true));
    ///
    /// let err = validator
    ///     .within_cluster_span_duplicate(&["e1", "e4"], &spans, &mut findings)
    ///     .unwrap_err();
    /// assert!(matches!(err, ValidationError::MissingMention { .. }));
    /// ```
    pub fn within_cluster_span_duplicate<'a, M, T, I, S>(
        &self,
        cluster: I,
        spans: &HashMap<M, Vec<T>, S>,
        mut sink: impl DiagnosticSink,
    ) -> Result<bool>
    where
        I: IntoIterator<Item = &'a M>,
        M: Display + Eq + Hash + 'a,
        T: Display + Eq + Hash,
        S: BuildHasher,
    {
        match scan_spans(cluster, spans, self.empty_span_policy)? {
            SpanScan::Unique => Ok(false),
            SpanScan::SilentDuplicate(_) => Ok(true),
            SpanScan::Duplicate(violation) => {
                sink.record(violation);
                Ok(true)
            }
        }
    }

    /// Lists every relation implied by transitivity but absent from
    /// `relations`, recording each as a [`ClusterViolation::UnresolvedLink`].
    ///
    /// Labels are ignored: pass only relations of one transitive type.
    /// Pairs are returned in natural order of `(source, target)`.
    pub fn unresolved_links<N, L>(
        &self,
        relations: &[Relation<N, L>],
        mut sink: impl DiagnosticSink,
    ) -> Vec<(N, N)>
    where
        N: Clone + Display + Eq + Hash,
    {
        let missing = closure::missing_links(relations);
        for (source, target) in &missing {
            sink.record(ClusterViolation::UnresolvedLink {
                from: source.to_string(),
                to: target.to_string(),
            });
        }
        missing
    }

    /// Runs every [`ClusterInvariant`] and returns the first violation.
    ///
    /// Unlike the individual checks, collisions of empty spans under
    /// [`EmptySpanPolicy::FlagSilently`] are returned like any other
    /// duplicate, since nothing is logged here.
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingMention`] when a cluster references
    /// a mention absent from `spans`.
    pub fn check_all<C, M, T, S, H>(
        &self,
        clusters: &BTreeMap<C, HashSet<M, S>>,
        spans: &HashMap<M, Vec<T>, H>,
    ) -> Result<Option<ClusterViolation>>
    where
        C: Display,
        M: Display + Eq + Hash,
        T: Display + Eq + Hash,
        S: BuildHasher,
        H: BuildHasher,
    {
        match self.run(clusters, spans, EvaluationMode::FailFast) {
            Ok(()) => Ok(None),
            Err(Halt::Violation(violation)) => Ok(Some(violation)),
            Err(Halt::Fatal(err)) => Err(err),
        }
    }

    /// Runs every [`ClusterInvariant`] and returns all violations: each
    /// overlapping pair of clusters and the first span collision of each
    /// cluster.
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingMention`] when a cluster references
    /// a mention absent from `spans`.
    pub fn collect_all<C, M, T, S, H>(
        &self,
        clusters: &BTreeMap<C, HashSet<M, S>>,
        spans: &HashMap<M, Vec<T>, H>,
    ) -> Result<Vec<ClusterViolation>>
    where
        C: Display,
        M: Display + Eq + Hash,
        T: Display + Eq + Hash,
        S: BuildHasher,
        H: BuildHasher,
    {
        let mut violations = Vec::new();
        match self.run(clusters, spans, EvaluationMode::Collect(&mut violations)) {
            Ok(()) => {}
            Err(Halt::Violation(violation)) => violations.push(violation),
            Err(Halt::Fatal(err)) => return Err(err),
        }
        Ok(violations)
    }

    /// Runs every [`ClusterInvariant`] like [`Self::collect_all`], recording
    /// each violation in `sink`, and reports whether all invariants held.
    ///
    /// Empty-span collisions under [`EmptySpanPolicy::FlagSilently`] make the
    /// result `false` but are not recorded, matching
    /// [`Self::within_cluster_span_duplicate`].
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingMention`] when a cluster references
    /// a mention absent from `spans`.
    pub fn report_all<C, M, T, S, H>(
        &self,
        clusters: &BTreeMap<C, HashSet<M, S>>,
        spans: &HashMap<M, Vec<T>, H>,
        mut sink: impl DiagnosticSink,
    ) -> Result<bool>
    where
        C: Display,
        M: Display + Eq + Hash,
        T: Display + Eq + Hash,
        S: BuildHasher,
        H: BuildHasher,
    {
        let mut failures = 0_usize;
        let mode = EvaluationMode::Report {
            sink: &mut sink,
            failures: &mut failures,
        };
        match self.run(clusters, spans, mode) {
            Ok(()) | Err(Halt::Violation(_)) => Ok(failures == 0),
            Err(Halt::Fatal(err)) => Err(err),
        }
    }

    fn run<C, M, T, S, H>(
        &self,
        clusters: &BTreeMap<C, HashSet<M, S>>,
        spans: &HashMap<M, Vec<T>, H>,
        mut mode: EvaluationMode<'_>,
    ) -> core::result::Result<(), Halt>
    where
        C: Display,
        M: Display + Eq + Hash,
        T: Display + Eq + Hash,
        S: BuildHasher,
        H: BuildHasher,
    {
        for invariant in ClusterInvariant::all() {
            match invariant {
                ClusterInvariant::Disjoint => {
                    for violation in overlap::overlapping_pairs(clusters) {
                        mode.record(violation, false)?;
                    }
                }
                ClusterInvariant::UniqueSpans => {
                    for members in clusters.values() {
                        match scan_spans(members, spans, self.empty_span_policy)? {
                            SpanScan::Unique => {}
                            SpanScan::Duplicate(violation) => mode.record(violation, false)?,
                            SpanScan::SilentDuplicate(violation) => {
                                mode.record(violation, true)?;
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

enum EvaluationMode<'a> {
    FailFast,
    Collect(&'a mut Vec<ClusterViolation>),
    /// Counts every violation, forwarding only the audible ones to `sink`.
    Report {
        sink: &'a mut dyn DiagnosticSink,
        failures: &'a mut usize,
    },
}

impl EvaluationMode<'_> {
    fn record(
        &mut self,
        violation: ClusterViolation,
        silent: bool,
    ) -> core::result::Result<(), Halt> {
        match self {
            Self::FailFast => Err(Halt::Violation(violation)),
            Self::Collect(found) => {
                found.push(violation);
                Ok(())
            }
            Self::Report { sink, failures } => {
                **failures += 1;
                if !silent {
                    sink.record(violation);
                }
                Ok(())
            }
        }
    }
}

enum Halt {
    Violation(ClusterViolation),
    Fatal(ValidationError),
}

impl From<ValidationError> for Halt {
    fn from(err: ValidationError) -> Self {
        Self::Fatal(err)
    }
}

/// Checks that no identifier occurs twice in `ids`.
///
/// # Errors
/// Returns [`ValidationError::DuplicateIdentifier`] naming the first repeat.
///
/// # Examples
/// ```
/// use corefcheck_core::ensure_unique;
///
/// assert!(ensure_unique(&["e1", "e2"]).is_ok());
/// assert!(ensure_unique(&["e1", "e2", "e1"]).is_err());
/// ```
pub fn ensure_unique<'a, T>(ids: impl IntoIterator<Item = &'a T>) -> Result<()>
where
    T: Display + Eq + Hash + 'a,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateIdentifier {
                identifier: id.to_string(),
            });
        }
    }
    Ok(())
}

fn render_sorted<'a, T>(items: impl IntoIterator<Item = &'a T>) -> Vec<String>
where
    T: Display + 'a,
{
    let mut rendered: Vec<String> = items.into_iter().map(ToString::to_string).collect();
    sort_naturally(&mut rendered);
    rendered
}
