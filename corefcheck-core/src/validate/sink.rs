//! Destinations for validation diagnostics.

use tracing::error;

use super::ClusterViolation;

/// Receives every violation a check reports.
///
/// Checks never log directly; callers choose whether findings become log
/// lines ([`TracingSink`]), are kept for later inspection
/// (`Vec<ClusterViolation>`), or both.
pub trait DiagnosticSink {
    /// Accepts one violation.
    fn record(&mut self, violation: ClusterViolation);
}

impl DiagnosticSink for Vec<ClusterViolation> {
    fn record(&mut self, violation: ClusterViolation) {
        self.push(violation);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn record(&mut self, violation: ClusterViolation) {
        (**self).record(violation);
    }
}

/// Emits every violation as an error-level `tracing` event.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&mut self, violation: ClusterViolation) {
        match &violation {
            ClusterViolation::Overlap {
                first,
                second,
                first_members,
                second_members,
                shared,
            } => error!(
                first = %first,
                second = %second,
                first_members = ?first_members,
                second_members = ?second_members,
                shared = ?shared,
                "non-empty intersection between clusters; resolve transitive closure before submitting"
            ),
            ClusterViolation::DuplicateSpan {
                first,
                second,
                tokens,
            } => error!(
                first = %first,
                second = %second,
                span = %tokens.join(","),
                "mentions within the same cluster cannot share a span"
            ),
            ClusterViolation::UnresolvedLink { from, to } => error!(
                source = %from,
                target = %to,
                "relation implied by transitivity is missing"
            ),
        }
    }
}
