//! Natural ordering for identifiers such as `t2` and `t10`.
//!
//! Identifiers are split into alternating runs of ASCII digits and other
//! characters. Digit runs compare by numeric value, text runs compare
//! lexically, and at the same position a number sorts before text.

use std::cmp::Ordering;
use std::fmt::Display;

/// Sort key produced by [`natural_key`].
#[derive(Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct NaturalKey(Vec<Segment>);

#[derive(Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
enum Segment {
    Number(Digits),
    Text(String),
}

/// Digit run with leading zeros stripped; compares numerically without
/// bounding the magnitude.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
struct Digits(String);

impl Ord for Digits {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Digits {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Builds the natural sort key of `raw`.
///
/// # Examples
/// ```
/// use corefcheck_core::natural_key;
///
/// assert!(natural_key("t2") < natural_key("t10"));
/// assert!(natural_key("em7") < natural_key("em7a"));
/// assert_eq!(natural_key("e007"), natural_key("e7"));
/// ```
#[must_use]
pub fn natural_key(raw: &str) -> NaturalKey {
    let mut segments = Vec::new();
    let mut rest = raw;
    while let Some(first) = rest.chars().next() {
        let numeric = first.is_ascii_digit();
        let end = rest
            .find(|c: char| c.is_ascii_digit() != numeric)
            .unwrap_or(rest.len());
        let (run, tail) = rest.split_at(end);
        segments.push(if numeric {
            Segment::Number(Digits(run.trim_start_matches('0').to_owned()))
        } else {
            Segment::Text(run.to_owned())
        });
        rest = tail;
    }
    NaturalKey(segments)
}

/// Sorts `items` by the natural key of their display form.
pub fn sort_naturally<T: Display>(items: &mut [T]) {
    items.sort_by_cached_key(|item| natural_key(&item.to_string()));
}
