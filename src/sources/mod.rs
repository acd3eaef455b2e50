//! Source data providers.
//!
//! Everything here ends in an [`IntervalSeries`]: raw vendor data is
//! translated, sorted, optionally trimmed to regular trading hours and
//! validated before the analysis core sees it.

pub mod alphavantage;
pub mod samples;

pub use alphavantage::AlphaVantageClient;
pub use samples::SampleFiles;

use chrono::Timelike;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::types::{Granularity, Interval, IntervalSeries, SymbolDataRequest};

/// Where intervals come from.
pub enum IntervalProvider {
    Samples(SampleFiles),
    AlphaVantage(AlphaVantageClient),
}

/// Regular session open, seconds after midnight exchange-local.
const MARKET_OPEN: u32 = (9 * 60 + 30) * 60;
/// Regular session close. The bar stamped at the close is kept.
const MARKET_CLOSE: u32 = 16 * 60 * 60;

/// Whether a bar falls inside 09:30-16:00 inclusive.
pub fn is_regular_hours(interval: &Interval) -> bool {
    let seconds = interval.time.time().num_seconds_from_midnight();
    (MARKET_OPEN..=MARKET_CLOSE).contains(&seconds)
}

/// Drop pre- and post-market bars.
pub fn regular_hours(intervals: Vec<Interval>) -> Vec<Interval> {
    intervals.into_iter().filter(is_regular_hours).collect()
}

/// Symbols must be plain tickers; they end up in file paths and URLs.
pub fn validate_symbol(symbol: &str) -> Result<()> {
    let valid = !symbol.is_empty()
        && symbol.len() <= 12
        && symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        && !symbol.starts_with('.');

    if valid {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!("Invalid symbol: {:?}", symbol)))
    }
}

/// Provider plus the post-processing every fetch gets.
pub struct IntervalSource {
    provider: IntervalProvider,
    regular_hours_only: bool,
}

impl IntervalSource {
    pub fn new(provider: IntervalProvider, regular_hours_only: bool) -> Self {
        Self {
            provider,
            regular_hours_only,
        }
    }

    /// Live Alpha Vantage when an API key is configured, sample files otherwise.
    pub fn from_config(config: &Config) -> Self {
        let provider = match &config.alpha_vantage_api_key {
            Some(key) => {
                info!("Using Alpha Vantage for interval data");
                IntervalProvider::AlphaVantage(AlphaVantageClient::new(key.clone()))
            }
            None => {
                info!("Using sample data from {}", config.samples_dir.display());
                IntervalProvider::Samples(SampleFiles::new(config.samples_dir.clone()))
            }
        };
        Self::new(provider, config.regular_hours_only)
    }

    /// The configured symbols this source can serve. Sample files limit the
    /// list to symbols with data on disk; the live API is taken at its word.
    pub async fn available_symbols(&self, configured: &[String]) -> Result<Vec<String>> {
        match &self.provider {
            IntervalProvider::Samples(samples) => {
                let present = samples.symbols().await?;
                Ok(configured
                    .iter()
                    .filter(|symbol| present.contains(&symbol.to_uppercase()))
                    .cloned()
                    .collect())
            }
            IntervalProvider::AlphaVantage(_) => Ok(configured.to_vec()),
        }
    }

    /// Fetch a validated series for one symbol and granularity.
    pub async fn fetch(&self, request: &SymbolDataRequest) -> Result<IntervalSeries> {
        validate_symbol(&request.symbol)?;

        let intervals = match &self.provider {
            IntervalProvider::Samples(samples) => {
                samples.fetch(&request.symbol, request.granularity).await?
            }
            IntervalProvider::AlphaVantage(client) => {
                client.fetch(&request.symbol, request.granularity).await?
            }
        };

        let intervals = if self.regular_hours_only && request.granularity == Granularity::Intraday {
            let total = intervals.len();
            let kept = regular_hours(intervals);
            debug!(
                "Kept {} of {} intraday intervals inside regular hours",
                kept.len(),
                total
            );
            kept
        } else {
            intervals
        };

        Ok(IntervalSeries::new(request.granularity, intervals)?)
    }
}
