//! Technical analysis pipeline.
//!
//! Pure, synchronous computations over one [`IntervalSeries`]: moving
//! averages, momentum, VWAP, confirmed extrema, local trend classification
//! and reversal predictions, assembled into a [`SymbolAnalysis`].

pub mod extrema;
pub mod indicators;
pub mod predictions;
pub mod sessions;
pub mod trend;

#[cfg(test)]
pub(crate) mod testing;

pub use extrema::{find_dips, find_peaks, Extremum};
pub use predictions::{predict_reversals, PredictedReversals, ReversalInputs, ReversalStrategy};
pub use trend::{classify_trend, point_trend};

use tracing::debug;

use crate::error::AnalysisError;
use crate::types::{IntervalSeries, ReversalStrategyKind, SymbolAnalysis};
use indicators::MovingAverage;

/// Tunable parameters of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub short_window: usize,
    pub long_window: usize,
    pub strategy: ReversalStrategyKind,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            short_window: 10,
            long_window: 20,
            strategy: ReversalStrategyKind::default(),
        }
    }
}

/// Run every analysis over `series` and assemble the result.
pub fn analyze(
    symbol: &str,
    series: &IntervalSeries,
    options: &AnalysisOptions,
) -> Result<SymbolAnalysis, AnalysisError> {
    let short = MovingAverage::new(options.short_window)?;
    let long = MovingAverage::new(options.long_window)?;

    let granularity = series.granularity();
    let intervals = series.intervals();

    debug!(
        "Analyzing {} {} intervals for {} (windows {}/{}, strategy {})",
        intervals.len(),
        granularity,
        symbol,
        options.short_window,
        options.long_window,
        options.strategy.name()
    );

    let short_moving_average = short.calculate(intervals);
    let long_moving_average = long.calculate(intervals);
    let momentum = indicators::momentum(intervals);
    let vwap = indicators::vwap(intervals, granularity);

    let peaks = find_peaks(intervals);
    let dips = find_dips(intervals);

    let inputs = ReversalInputs::new(
        intervals,
        &short_moving_average,
        &long_moving_average,
        &momentum,
    )?;
    let predicted = predict_reversals(options.strategy, &inputs)?;

    Ok(SymbolAnalysis {
        symbol: symbol.to_string(),
        granularity,
        intervals: intervals.to_vec(),
        range: series.range(),
        short_moving_average,
        long_moving_average,
        momentum,
        vwap,
        peaks,
        dips,
        predicted_peaks: predicted.peaks,
        predicted_dips: predicted.dips,
        strategy: options.strategy,
        dividers: sessions::dividers(intervals, granularity),
        heikin_ashi: indicators::heikin_ashi(intervals),
        volume_weights: indicators::volume_weights(series),
        composite_session: sessions::composite_session(intervals, granularity),
    })
}
