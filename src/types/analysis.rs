use serde::{Deserialize, Serialize};

use super::interval::{Granularity, Interval, PriceRange};

/// Short-range price motion category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendCategory {
    Flat,
    Upward,
    UpwardSpike,
    UpwardReversal,
    Downward,
    DownwardSpike,
    DownwardReversal,
}

impl TrendCategory {
    /// `Upward` or `UpwardSpike`.
    pub fn is_upward(&self) -> bool {
        matches!(self, Self::Upward | Self::UpwardSpike)
    }

    /// `Downward` or `DownwardSpike`.
    pub fn is_downward(&self) -> bool {
        matches!(self, Self::Downward | Self::DownwardSpike)
    }
}

/// Reversal prediction strategy, selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReversalStrategyKind {
    /// Moving-average crossover disambiguated by momentum slope.
    #[default]
    CrossoverMomentum,
    /// Bare moving-average crossover with a short skip after each flag.
    Crossover,
    /// Moving-average crossover confirmed by the local trend classifier.
    CrossoverTrend,
    /// Accumulated deceleration of the momentum slope.
    MomentumDerivative,
}

impl ReversalStrategyKind {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "crossover_momentum" | "canonical" => Some(Self::CrossoverMomentum),
            "crossover" => Some(Self::Crossover),
            "crossover_trend" => Some(Self::CrossoverTrend),
            "momentum_derivative" | "derivative" => Some(Self::MomentumDerivative),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CrossoverMomentum => "crossover_momentum",
            Self::Crossover => "crossover",
            Self::CrossoverTrend => "crossover_trend",
            Self::MomentumDerivative => "momentum_derivative",
        }
    }
}

/// Start of a new session within a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDivider {
    pub index: usize,
    pub label: String,
}

/// Request for one symbol's analysis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolDataRequest {
    pub symbol: String,
    #[serde(alias = "type")]
    pub granularity: Granularity,
}

impl SymbolDataRequest {
    pub fn new(symbol: impl Into<String>, granularity: Granularity) -> Self {
        Self {
            symbol: symbol.into(),
            granularity,
        }
    }

    /// Cache key, `"{symbol}:{granularity}"` with the symbol lower-cased.
    pub fn cache_key(&self) -> String {
        format!("{}:{}", self.symbol.to_lowercase(), self.granularity)
    }
}

/// Caller-supplied intervals for ad-hoc analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolData {
    pub symbol: String,
    #[serde(alias = "type")]
    pub granularity: Granularity,
    pub intervals: Vec<Interval>,
}

/// Everything derived from one interval series.
///
/// Every per-interval series has exactly `intervals.len()` elements and
/// every index set is sorted ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolAnalysis {
    pub symbol: String,
    #[serde(alias = "type")]
    pub granularity: Granularity,
    pub intervals: Vec<Interval>,
    pub range: Option<PriceRange>,
    pub short_moving_average: Vec<f64>,
    pub long_moving_average: Vec<f64>,
    pub momentum: Vec<f64>,
    /// `None` where the session's cumulative volume is zero.
    pub vwap: Vec<Option<f64>>,
    pub peaks: Vec<usize>,
    pub dips: Vec<usize>,
    pub predicted_peaks: Vec<usize>,
    pub predicted_dips: Vec<usize>,
    pub strategy: ReversalStrategyKind,
    pub dividers: Vec<SessionDivider>,
    pub heikin_ashi: Vec<Interval>,
    pub volume_weights: Vec<u8>,
    pub composite_session: Vec<f64>,
}
