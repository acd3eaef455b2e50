use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Sampling cadence of an interval series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Intraday,
    Daily,
}

impl Granularity {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "intraday" | "5min" => Some(Self::Intraday),
            "daily" | "day" => Some(Self::Daily),
            _ => None,
        }
    }

    /// Wire name used in URLs and cache keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intraday => "intraday",
            Self::Daily => "daily",
        }
    }

    /// Key identifying the session a timestamp belongs to.
    ///
    /// Intraday sessions are calendar dates, daily sessions are calendar years.
    pub fn session_key(&self, time: &NaiveDateTime) -> (i32, u32) {
        match self {
            Self::Intraday => (time.year(), time.ordinal()),
            Self::Daily => (time.year(), 0),
        }
    }

    /// Label printed at a session divider.
    pub fn session_label(&self, time: &NaiveDateTime) -> String {
        match self {
            Self::Intraday => format!("{}/{}", time.month(), time.day()),
            Self::Daily => format!("{}", time.year()),
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One OHLCV bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub time: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Interval {
    /// Midpoint of the bar's range, `(high + low) / 2`.
    pub fn midpoint(&self) -> f64 {
        (self.high + self.low) / 2.0
    }

    /// Mean of the four prices, `(open + high + low + close) / 4`.
    pub fn average_price(&self) -> f64 {
        (self.open + self.high + self.low + self.close) / 4.0
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    fn is_finite(&self) -> bool {
        [self.open, self.high, self.low, self.close, self.volume]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Highest high and lowest low over a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub high: f64,
    pub low: f64,
}

/// A validated, time-ascending sequence of intervals for one granularity.
///
/// Neighbour lookups are index arithmetic over the owned vector, so a
/// resliced series never carries stale links.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalSeries {
    granularity: Granularity,
    intervals: Vec<Interval>,
}

impl IntervalSeries {
    /// Build a series, rejecting non-ascending timestamps, negative volume
    /// and non-finite values.
    pub fn new(granularity: Granularity, intervals: Vec<Interval>) -> Result<Self, AnalysisError> {
        for (index, interval) in intervals.iter().enumerate() {
            if !interval.is_finite() {
                return Err(AnalysisError::MalformedInput {
                    index,
                    reason: "non-finite price or volume",
                });
            }
            if interval.volume < 0.0 {
                return Err(AnalysisError::MalformedInput {
                    index,
                    reason: "negative volume",
                });
            }
            if index > 0 && interval.time <= intervals[index - 1].time {
                return Err(AnalysisError::MalformedInput {
                    index,
                    reason: "timestamps not strictly increasing",
                });
            }
        }

        Ok(Self {
            granularity,
            intervals,
        })
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Interval> {
        self.intervals.get(index)
    }

    /// Interval immediately before `index`.
    pub fn previous(&self, index: usize) -> Option<&Interval> {
        index.checked_sub(1).and_then(|i| self.intervals.get(i))
    }

    /// Interval immediately after `index`.
    pub fn next(&self, index: usize) -> Option<&Interval> {
        self.intervals.get(index + 1)
    }

    /// Up to `count` intervals walking backwards from `index`, nearest first.
    pub fn preceding(&self, index: usize, count: usize) -> impl Iterator<Item = &Interval> + '_ {
        let start = index.saturating_sub(count);
        let end = index.min(self.intervals.len());
        self.intervals[start.min(end)..end].iter().rev()
    }

    /// A new series over `range`. Neighbour lookups follow the new bounds.
    pub fn slice(&self, range: std::ops::Range<usize>) -> Self {
        let end = range.end.min(self.intervals.len());
        let start = range.start.min(end);
        Self {
            granularity: self.granularity,
            intervals: self.intervals[start..end].to_vec(),
        }
    }

    /// Highest high and lowest low, or `None` when empty.
    pub fn range(&self) -> Option<PriceRange> {
        if self.intervals.is_empty() {
            return None;
        }

        let high = self
            .intervals
            .iter()
            .map(|i| i.high)
            .fold(f64::NEG_INFINITY, f64::max);
        let low = self
            .intervals
            .iter()
            .map(|i| i.low)
            .fold(f64::INFINITY, f64::min);

        Some(PriceRange { high, low })
    }
}
