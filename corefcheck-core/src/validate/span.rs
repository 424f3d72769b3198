//! Duplicate-span detection within one cluster.

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::{BuildHasher, Hash};

use super::{ClusterViolation, EmptySpanPolicy};
use crate::error::{Result, ValidationError};

/// Outcome of scanning one cluster's spans.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum SpanScan {
    /// No two distinct mentions share a span.
    Unique,
    /// Two mentions share a non-empty span.
    Duplicate(ClusterViolation),
    /// Two mentions share the empty span under
    /// [`EmptySpanPolicy::FlagSilently`].
    SilentDuplicate(ClusterViolation),
}

/// Scans `cluster` in iteration order and stops at the first mention whose
/// span was already claimed by a different mention.
///
/// # Errors
/// Returns [`ValidationError::MissingMention`] when a mention reached before
/// any collision has no entry in `spans`.
pub(super) fn scan_spans<'a, M, T, I, S>(
    cluster: I,
    spans: &HashMap<M, Vec<T>, S>,
    policy: EmptySpanPolicy,
) -> Result<SpanScan>
where
    I: IntoIterator<Item = &'a M>,
    M: Display + Eq + Hash + 'a,
    T: Display + Eq + Hash,
    S: BuildHasher,
{
    let mut claimed: HashMap<&[T], &M> = HashMap::new();
    for mention in cluster {
        let span = spans
            .get(mention)
            .ok_or_else(|| ValidationError::MissingMention {
                mention: mention.to_string(),
            })?;
        if span.is_empty() && policy == EmptySpanPolicy::Skip {
            continue;
        }
        match claimed.get(span.as_slice()) {
            None => {
                claimed.insert(span.as_slice(), mention);
            }
            Some(&earlier) if earlier == mention => {}
            Some(&earlier) => {
                let violation = ClusterViolation::DuplicateSpan {
                    first: earlier.to_string(),
                    second: mention.to_string(),
                    tokens: span.iter().map(ToString::to_string).collect(),
                };
                return Ok(if span.is_empty() {
                    SpanScan::SilentDuplicate(violation)
                } else {
                    SpanScan::Duplicate(violation)
                });
            }
        }
    }
    Ok(SpanScan::Unique)
}
