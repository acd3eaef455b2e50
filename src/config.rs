use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::services::analysis::AnalysisOptions;
use crate::types::ReversalStrategyKind;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Directory holding `{symbol}-{granularity}.json` sample files.
    pub samples_dir: PathBuf,
    /// Alpha Vantage API key. When set, intervals are fetched live instead of
    /// read from the samples directory.
    pub alpha_vantage_api_key: Option<String>,
    /// Symbols offered by the random session endpoint.
    pub symbols: Vec<String>,
    /// Short moving-average window.
    pub short_window: usize,
    /// Long moving-average window.
    pub long_window: usize,
    /// Reversal prediction strategy.
    pub strategy: ReversalStrategyKind,
    /// Drop intraday bars outside 09:30-16:00.
    pub regular_hours_only: bool,
    /// How long a computed analysis stays cached.
    pub cache_ttl: Duration,
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn parse_flag(key: &str) -> Option<bool> {
    env::var(key)
        .ok()
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes"))
}

/// Parse a comma-separated symbol list, dropping empty entries.
pub fn parse_symbols(s: &str) -> Vec<String> {
    s.split(',')
        .map(|symbol| symbol.trim().to_uppercase())
        .filter(|symbol| !symbol.is_empty())
        .collect()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default_values();

        let symbols = env::var("SYMBOLS")
            .ok()
            .map(|s| parse_symbols(&s))
            .filter(|symbols| !symbols.is_empty())
            .unwrap_or(defaults.symbols);

        let strategy = env::var("REVERSAL_STRATEGY")
            .ok()
            .and_then(|s| ReversalStrategyKind::from_str(s.trim()))
            .unwrap_or(defaults.strategy);

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_env("PORT").unwrap_or(defaults.port),
            samples_dir: env::var("SAMPLES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.samples_dir),
            alpha_vantage_api_key: env::var("ALPHA_VANTAGE_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            symbols,
            short_window: parse_env::<usize>("SHORT_WINDOW")
                .filter(|w| *w > 0)
                .unwrap_or(defaults.short_window),
            long_window: parse_env::<usize>("LONG_WINDOW")
                .filter(|w| *w > 0)
                .unwrap_or(defaults.long_window),
            strategy,
            regular_hours_only: parse_flag("REGULAR_HOURS_ONLY")
                .unwrap_or(defaults.regular_hours_only),
            cache_ttl: parse_env("CACHE_TTL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
        }
    }

    /// Built-in defaults, independent of the environment.
    pub fn default_values() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 1234,
            samples_dir: PathBuf::from("samples"),
            alpha_vantage_api_key: None,
            symbols: vec!["MSFT".to_string(), "AAPL".to_string(), "AMD".to_string()],
            short_window: 10,
            long_window: 20,
            strategy: ReversalStrategyKind::CrossoverMomentum,
            regular_hours_only: true,
            cache_ttl: Duration::from_secs(300),
        }
    }

    /// Pipeline parameters derived from this configuration.
    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            short_window: self.short_window,
            long_window: self.long_window,
            strategy: self.strategy,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
