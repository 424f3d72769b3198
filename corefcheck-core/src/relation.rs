//! Labelled directed relations between mentions.

/// Directed `source → target` link carrying an inert label.
///
/// Only the direction matters for reachability; the label travels along so
/// callers can filter relation lists (for example to keep only coreference
/// or `after` links) before validating them.
///
/// # Examples
/// ```
/// use corefcheck_core::Relation;
///
/// let relation = Relation::new("e1", "e2", "after");
/// assert_eq!(relation.endpoints(), (&"e1", &"e2"));
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Relation<N, L> {
    /// Origin of the link.
    pub source: N,
    /// Destination of the link.
    pub target: N,
    /// Relation type, ignored by the closure computation.
    pub label: L,
}

impl<N, L> Relation<N, L> {
    /// Creates a relation from its parts.
    #[must_use]
    pub const fn new(source: N, target: N, label: L) -> Self {
        Self {
            source,
            target,
            label,
        }
    }

    /// Returns `(source, target)`.
    #[must_use]
    pub const fn endpoints(&self) -> (&N, &N) {
        (&self.source, &self.target)
    }
}

impl<N, L> From<(N, N, L)> for Relation<N, L> {
    fn from((source, target, label): (N, N, L)) -> Self {
        Self::new(source, target, label)
    }
}
