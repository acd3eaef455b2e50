//! Forward-looking reversal predictions.
//!
//! Every strategy reads the same index-aligned inputs and emits predicted
//! peak and dip indices in ascending order. None of them carries an accuracy
//! contract; they are deterministic heuristics.

use std::cmp::Ordering;

use crate::error::AnalysisError;
use crate::services::analysis::trend::{classify_trend, min_index};
use crate::types::{Interval, ReversalStrategyKind, TrendCategory};

/// First index scanned by the crossover strategies.
const CROSSOVER_START: usize = 10;
/// Bars back used for the momentum slope.
const MOMENTUM_LOOKBACK: usize = 10;
/// Extra positions skipped by the bare crossover strategy after a flag.
const CROSSOVER_SKIP: usize = 5;
/// A slope shrinking below this fraction of the previous one is decelerating.
const DECELERATION_RATIO: f64 = 0.9;
/// Consecutive decelerating bars needed to flag a reversal.
const DECELERATION_COUNT: usize = 3;

/// Index-aligned series a strategy reads.
#[derive(Debug, Clone, Copy)]
pub struct ReversalInputs<'a> {
    intervals: &'a [Interval],
    short_moving_average: &'a [f64],
    long_moving_average: &'a [f64],
    momentum: &'a [f64],
}

impl<'a> ReversalInputs<'a> {
    /// Bundle the inputs, failing if any series is not `intervals.len()` long.
    pub fn new(
        intervals: &'a [Interval],
        short_moving_average: &'a [f64],
        long_moving_average: &'a [f64],
        momentum: &'a [f64],
    ) -> Result<Self, AnalysisError> {
        let expected = intervals.len();
        for (name, series) in [
            ("shortMovingAverage", short_moving_average),
            ("longMovingAverage", long_moving_average),
            ("momentum", momentum),
        ] {
            if series.len() != expected {
                return Err(AnalysisError::LengthMismatch {
                    name,
                    expected,
                    actual: series.len(),
                });
            }
        }

        Ok(Self {
            intervals,
            short_moving_average,
            long_moving_average,
            momentum,
        })
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Ordering of the short average against the long average at `index`.
    fn spread(&self, index: usize) -> Ordering {
        self.short_moving_average[index]
            .partial_cmp(&self.long_moving_average[index])
            .unwrap_or(Ordering::Equal)
    }

    /// The sign of `short - long` differs from the previous bar.
    fn is_crossover(&self, index: usize) -> bool {
        index > 0 && self.spread(index - 1) != self.spread(index)
    }

    /// Momentum is lower than it was `MOMENTUM_LOOKBACK` bars ago.
    fn is_bearish(&self, index: usize) -> bool {
        index >= MOMENTUM_LOOKBACK && self.momentum[index] < self.momentum[index - MOMENTUM_LOOKBACK]
    }
}

/// Predicted turning points.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictedReversals {
    pub peaks: Vec<usize>,
    pub dips: Vec<usize>,
}

/// A reversal prediction heuristic.
pub trait ReversalStrategy: Send + Sync {
    fn kind(&self) -> ReversalStrategyKind;

    fn predict(&self, inputs: &ReversalInputs<'_>) -> Result<PredictedReversals, AnalysisError>;
}

/// Crossover of the moving averages, read through the momentum slope:
/// long over short with falling momentum is a peak, short over long with
/// momentum not falling is a dip. Other crossovers are ignored.
pub struct CrossoverMomentum;

impl ReversalStrategy for CrossoverMomentum {
    fn kind(&self) -> ReversalStrategyKind {
        ReversalStrategyKind::CrossoverMomentum
    }

    fn predict(&self, inputs: &ReversalInputs<'_>) -> Result<PredictedReversals, AnalysisError> {
        let mut reversals = PredictedReversals::default();

        for i in CROSSOVER_START..inputs.len().saturating_sub(1) {
            if !inputs.is_crossover(i) {
                continue;
            }

            let bearish = inputs.is_bearish(i);
            match inputs.spread(i) {
                Ordering::Less if bearish => reversals.peaks.push(i),
                Ordering::Greater if !bearish => reversals.dips.push(i),
                _ => {}
            }
        }

        Ok(reversals)
    }
}

/// Strict sign flip of `short - long`: short ending above is a dip, below is
/// a peak. Skips a few bars after each flag.
pub struct Crossover;

impl ReversalStrategy for Crossover {
    fn kind(&self) -> ReversalStrategyKind {
        ReversalStrategyKind::Crossover
    }

    fn predict(&self, inputs: &ReversalInputs<'_>) -> Result<PredictedReversals, AnalysisError> {
        let mut reversals = PredictedReversals::default();
        let mut i = 1;

        while i < inputs.len() {
            let previous = inputs.spread(i - 1);
            let current = inputs.spread(i);

            let flipped = matches!(
                (previous, current),
                (Ordering::Greater, Ordering::Less) | (Ordering::Less, Ordering::Greater)
            );

            if flipped {
                if current == Ordering::Greater {
                    reversals.dips.push(i);
                } else {
                    reversals.peaks.push(i);
                }
                i += CROSSOVER_SKIP;
            }
            i += 1;
        }

        Ok(reversals)
    }
}

/// Crossover confirmed by the local trend at the same bar.
pub struct CrossoverTrend;

impl CrossoverTrend {
    fn confirms_peak(trend: TrendCategory) -> bool {
        trend.is_downward() || trend == TrendCategory::DownwardReversal
    }

    fn confirms_dip(trend: TrendCategory) -> bool {
        trend.is_upward() || trend == TrendCategory::UpwardReversal
    }
}

impl ReversalStrategy for CrossoverTrend {
    fn kind(&self) -> ReversalStrategyKind {
        ReversalStrategyKind::CrossoverTrend
    }

    fn predict(&self, inputs: &ReversalInputs<'_>) -> Result<PredictedReversals, AnalysisError> {
        let mut reversals = PredictedReversals::default();
        let start = CROSSOVER_START.max(min_index());

        for i in start..inputs.len().saturating_sub(1) {
            if !inputs.is_crossover(i) {
                continue;
            }

            let trend = classify_trend(inputs.intervals, i)?;
            match inputs.spread(i) {
                Ordering::Less if Self::confirms_peak(trend) => reversals.peaks.push(i),
                Ordering::Greater if Self::confirms_dip(trend) => reversals.dips.push(i),
                _ => {}
            }
        }

        Ok(reversals)
    }
}

/// Accumulates bars where the momentum slope keeps its sign but shrinks.
///
/// Slope `s[i] = momentum[i] - momentum[i - 10]`. A bar counts when
/// `|s[i]| / |s[i - 1]| < 0.9` with the same sign; any other bar resets the
/// count. Three in a row flag a peak (rising slope) or dip (falling slope).
pub struct MomentumDerivative;

impl MomentumDerivative {
    fn slope(momentum: &[f64], index: usize) -> f64 {
        momentum[index] - momentum[index - MOMENTUM_LOOKBACK]
    }
}

impl ReversalStrategy for MomentumDerivative {
    fn kind(&self) -> ReversalStrategyKind {
        ReversalStrategyKind::MomentumDerivative
    }

    fn predict(&self, inputs: &ReversalInputs<'_>) -> Result<PredictedReversals, AnalysisError> {
        let mut reversals = PredictedReversals::default();
        let mut accumulated = 0;

        for i in (MOMENTUM_LOOKBACK + 1)..inputs.len() {
            let slope = Self::slope(inputs.momentum, i);
            let previous = Self::slope(inputs.momentum, i - 1);

            let same_sign = slope != 0.0 && previous != 0.0 && (slope > 0.0) == (previous > 0.0);
            let decelerating = same_sign && slope.abs() / previous.abs() < DECELERATION_RATIO;

            if !decelerating {
                accumulated = 0;
                continue;
            }

            accumulated += 1;
            if accumulated >= DECELERATION_COUNT {
                if slope > 0.0 {
                    reversals.peaks.push(i);
                } else {
                    reversals.dips.push(i);
                }
                accumulated = 0;
            }
        }

        Ok(reversals)
    }
}

/// The strategy implementation for `kind`.
pub fn strategy_for(kind: ReversalStrategyKind) -> Box<dyn ReversalStrategy> {
    match kind {
        ReversalStrategyKind::CrossoverMomentum => Box::new(CrossoverMomentum),
        ReversalStrategyKind::Crossover => Box::new(Crossover),
        ReversalStrategyKind::CrossoverTrend => Box::new(CrossoverTrend),
        ReversalStrategyKind::MomentumDerivative => Box::new(MomentumDerivative),
    }
}

/// Predict reversals with the configured strategy.
pub fn predict_reversals(
    kind: ReversalStrategyKind,
    inputs: &ReversalInputs<'_>,
) -> Result<PredictedReversals, AnalysisError> {
    strategy_for(kind).predict(inputs)
}
