//! Session-scoped Volume Weighted Average Price (VWAP).

use crate::types::{Granularity, Interval};

/// VWAP that resets at every session boundary.
///
/// Running sums of `volume * average_price` and `volume` restart whenever the
/// session key changes (calendar date for intraday, calendar year for daily):
/// VWAP = Σ(avg price × volume) / Σ(volume) within the session so far.
///
/// A session whose cumulative volume is still zero has no defined VWAP; those
/// entries are `None` rather than NaN.
pub struct Vwap {
    granularity: Granularity,
}

impl Vwap {
    pub fn new(granularity: Granularity) -> Self {
        Self { granularity }
    }

    pub fn calculate(&self, intervals: &[Interval]) -> Vec<Option<f64>> {
        let mut weighted_sum = 0.0;
        let mut volume_sum = 0.0;
        let mut session = None;

        intervals
            .iter()
            .map(|interval| {
                let key = self.granularity.session_key(&interval.time);
                if session != Some(key) {
                    weighted_sum = 0.0;
                    volume_sum = 0.0;
                    session = Some(key);
                }

                weighted_sum += interval.volume * interval.average_price();
                volume_sum += interval.volume;

                if volume_sum > 0.0 {
                    Some(weighted_sum / volume_sum)
                } else {
                    None
                }
            })
            .collect()
    }
}

/// VWAP of `intervals` under the session rule of `granularity`.
pub fn vwap(intervals: &[Interval], granularity: Granularity) -> Vec<Option<f64>> {
    Vwap::new(granularity).calculate(intervals)
}
