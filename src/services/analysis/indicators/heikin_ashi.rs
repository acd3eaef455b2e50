//! Heikin-Ashi candle transform.

use crate::types::Interval;

/// Smoothed Heikin-Ashi candles.
///
/// - open: midpoint of the previous Heikin-Ashi body (the raw bar for the first)
/// - close: mean of the bar's four prices
/// - high/low: extremes of the raw wick, the new open and the raw close
pub fn heikin_ashi(intervals: &[Interval]) -> Vec<Interval> {
    let mut candles: Vec<Interval> = Vec::with_capacity(intervals.len());

    for interval in intervals {
        let previous = candles.last().copied().unwrap_or(*interval);
        let open = (previous.open + previous.close) / 2.0;

        candles.push(Interval {
            open,
            close: interval.average_price(),
            high: interval.high.max(open).max(interval.close),
            low: interval.low.min(open).min(interval.close),
            ..*interval
        });
    }

    candles
}
