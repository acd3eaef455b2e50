//! Trailing moving average of midpoint price.

use crate::error::AnalysisError;
use crate::types::Interval;

/// Trailing moving average over `(high + low) / 2`.
///
/// Index `i` averages midpoints `max(0, i - window)..=i`, so the window
/// shrinks to the available history at the start of the series instead of
/// leaving a warm-up gap.
pub struct MovingAverage {
    window: usize,
}

impl MovingAverage {
    pub fn new(window: usize) -> Result<Self, AnalysisError> {
        if window == 0 {
            return Err(AnalysisError::InvalidWindow {
                window,
                reason: "must be at least 1",
            });
        }
        Ok(Self { window })
    }

    pub fn calculate(&self, intervals: &[Interval]) -> Vec<f64> {
        let midpoints: Vec<f64> = intervals.iter().map(Interval::midpoint).collect();

        (0..midpoints.len())
            .map(|i| {
                let start = i.saturating_sub(self.window);
                let slice = &midpoints[start..=i];
                slice.iter().sum::<f64>() / slice.len() as f64
            })
            .collect()
    }
}

/// Moving average of `intervals` with the given trailing `window`.
pub fn moving_average(intervals: &[Interval], window: usize) -> Result<Vec<f64>, AnalysisError> {
    Ok(MovingAverage::new(window)?.calculate(intervals))
}
