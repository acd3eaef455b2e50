//! Confirmed historical peaks and dips.
//!
//! A candidate must beat every bar in a narrow window on each side and
//! nearly every bar in a wide window. The bar directly before the candidate
//! is excluded from both windows. Windows are clipped at the series bounds
//! and the scan skips ahead after each match so a cluster of bars is
//! reported once.

use crate::types::Interval;

/// Bars checked on each side by the immediate check.
const IMMEDIATE_SPAN: usize = 4;
/// Bars checked on each side by the local check.
const LOCAL_SPAN: usize = 24;
/// The local check needs strictly more than this many wins.
const LOCAL_THRESHOLD: usize = 45;
/// Extra positions skipped after a confirmed extremum.
const SKIP_AFTER_MATCH: usize = 10;

/// Which side of the comparison an extremum sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    Peak,
    Dip,
}

impl Extremum {
    /// Whether `candidate` beats `comparison` in this direction.
    pub fn dominates(&self, candidate: &Interval, comparison: &Interval) -> bool {
        match self {
            Extremum::Peak => candidate.high > comparison.high,
            Extremum::Dip => candidate.low < comparison.low,
        }
    }
}

/// Indices `index - 1 - span ..= index - 2` and `index + 1 ..= index + span`,
/// clipped to `0..len`.
fn comparison_window(index: usize, span: usize, len: usize) -> impl Iterator<Item = usize> {
    let before = index.saturating_sub(span + 1)..index.saturating_sub(1);
    let after = (index + 1).min(len)..(index + 1 + span).min(len);
    before.chain(after)
}

/// Whether `intervals[index]` is a confirmed reversal in direction `kind`.
pub fn is_reversal(intervals: &[Interval], index: usize, kind: Extremum) -> bool {
    let Some(candidate) = intervals.get(index) else {
        return false;
    };

    let immediate = comparison_window(index, IMMEDIATE_SPAN, intervals.len())
        .all(|i| kind.dominates(candidate, &intervals[i]));
    if !immediate {
        return false;
    }

    let local_wins = comparison_window(index, LOCAL_SPAN, intervals.len())
        .filter(|&i| kind.dominates(candidate, &intervals[i]))
        .count();

    local_wins > LOCAL_THRESHOLD
}

/// Scan left to right from index 1, recording each confirmed reversal.
pub fn find_reversals(intervals: &[Interval], kind: Extremum) -> Vec<usize> {
    let mut reversals = Vec::new();
    let mut i = 1;

    while i < intervals.len() {
        if is_reversal(intervals, i, kind) {
            reversals.push(i);
            i += SKIP_AFTER_MATCH;
        }
        i += 1;
    }

    reversals
}

/// Confirmed local maxima by high.
pub fn find_peaks(intervals: &[Interval]) -> Vec<usize> {
    find_reversals(intervals, Extremum::Peak)
}

/// Confirmed local minima by low.
pub fn find_dips(intervals: &[Interval]) -> Vec<usize> {
    find_reversals(intervals, Extremum::Dip)
}
