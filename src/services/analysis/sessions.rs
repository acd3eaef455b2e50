//! Session grouping: dividers, splitting and the composite session profile.
//!
//! A session is the maximal run of intervals sharing a session key, which
//! is the calendar date for intraday series and the calendar year for daily
//! series.

use crate::types::{Granularity, Interval, IntervalSeries, SessionDivider};

/// Index ranges of each session, in order.
pub fn session_ranges(intervals: &[Interval], granularity: Granularity) -> Vec<std::ops::Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = 0;

    for i in 1..intervals.len() {
        if granularity.session_key(&intervals[i].time)
            != granularity.session_key(&intervals[i - 1].time)
        {
            ranges.push(start..i);
            start = i;
        }
    }

    if !intervals.is_empty() {
        ranges.push(start..intervals.len());
    }

    ranges
}

/// A labelled divider at the first interval of every session.
pub fn dividers(intervals: &[Interval], granularity: Granularity) -> Vec<SessionDivider> {
    session_ranges(intervals, granularity)
        .into_iter()
        .map(|range| SessionDivider {
            index: range.start,
            label: granularity.session_label(&intervals[range.start].time),
        })
        .collect()
}

/// Split a series into one series per session.
pub fn split_sessions(series: &IntervalSeries) -> Vec<IntervalSeries> {
    session_ranges(series.intervals(), series.granularity())
        .into_iter()
        .map(|range| series.slice(range))
        .collect()
}

/// Average opening price at each position within a session.
///
/// Position `k` averages the `k`-th open of every session; sessions shorter
/// than the longest one contribute their last interval instead.
pub fn composite_session(intervals: &[Interval], granularity: Granularity) -> Vec<f64> {
    let sessions: Vec<&[Interval]> = session_ranges(intervals, granularity)
        .into_iter()
        .map(|range| &intervals[range])
        .collect();

    let longest = sessions.iter().map(|s| s.len()).max().unwrap_or(0);

    (0..longest)
        .map(|k| {
            let total: f64 = sessions
                .iter()
                .filter_map(|session| session.get(k).or_else(|| session.last()))
                .map(|interval| interval.open)
                .sum();
            total / sessions.len() as f64
        })
        .collect()
}
