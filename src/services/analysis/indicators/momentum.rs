//! Cumulative momentum oscillator.

use crate::types::Interval;

/// Running sum of `close - open`.
///
/// `momentum[i] = momentum[i - 1] + (close[i] - open[i])` with an implicit
/// zero before the first interval. Unbounded in either direction.
pub fn momentum(intervals: &[Interval]) -> Vec<f64> {
    intervals
        .iter()
        .scan(0.0, |running, interval| {
            *running += interval.close - interval.open;
            Some(*running)
        })
        .collect()
}
