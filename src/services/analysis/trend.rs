//! Local trend classification.

use crate::error::AnalysisError;
use crate::types::{Interval, TrendCategory};

const FLAT_THRESHOLD: f64 = 0.001;
const MOVE_THRESHOLD: f64 = 0.01;
const SPIKE_THRESHOLD: f64 = 0.05;

/// Offset of the "close" comparison bar.
const CLOSE_LOOKBACK: usize = 4;
/// Offset of the "far" comparison bar.
const FAR_LOOKBACK: usize = 15;

/// Trend between an earlier bar `a` and a later bar `b`.
///
/// `delta = 1 - a.open / b.close`, classified in priority order:
/// - `|delta| <= 0.001` flat
/// - `delta > 0.05` upward spike
/// - `delta > 0.01` upward
/// - `delta <= -0.05` downward spike
/// - `delta < 0` downward
/// - anything else flat
pub fn point_trend(a: &Interval, b: &Interval) -> TrendCategory {
    let delta = 1.0 - a.open / b.close;

    if delta.abs() <= FLAT_THRESHOLD {
        TrendCategory::Flat
    } else if delta > SPIKE_THRESHOLD {
        TrendCategory::UpwardSpike
    } else if delta > MOVE_THRESHOLD {
        TrendCategory::Upward
    } else if delta <= -SPIKE_THRESHOLD {
        TrendCategory::DownwardSpike
    } else if delta < 0.0 {
        TrendCategory::Downward
    } else {
        TrendCategory::Flat
    }
}

/// Combine the far (`index - 15` to `index - 4`) and close (`index - 4` to
/// `index`) trends. First matching rule wins.
pub fn combine(far: TrendCategory, close: TrendCategory) -> TrendCategory {
    if far.is_downward() && close.is_downward() {
        TrendCategory::Downward
    } else if far.is_upward() && close.is_downward() {
        TrendCategory::DownwardReversal
    } else if close == TrendCategory::DownwardSpike {
        TrendCategory::DownwardSpike
    } else if far.is_upward() && close.is_upward() {
        TrendCategory::Upward
    } else if far.is_downward() && close.is_upward() {
        TrendCategory::UpwardReversal
    } else if close == TrendCategory::UpwardSpike {
        TrendCategory::UpwardSpike
    } else {
        TrendCategory::Flat
    }
}

/// Local composite trend at `index`. Needs at least 15 prior intervals.
pub fn classify_trend(intervals: &[Interval], index: usize) -> Result<TrendCategory, AnalysisError> {
    if index < FAR_LOOKBACK || index >= intervals.len() {
        return Err(AnalysisError::InsufficientHistory {
            index,
            required: FAR_LOOKBACK,
        });
    }

    let current = &intervals[index];
    let close_ref = &intervals[index - CLOSE_LOOKBACK];
    let far_ref = &intervals[index - FAR_LOOKBACK];

    let close = point_trend(close_ref, current);
    let far = point_trend(far_ref, close_ref);

    Ok(combine(far, close))
}

/// Minimum index `classify_trend` accepts.
pub fn min_index() -> usize {
    FAR_LOOKBACK
}
