//! Trendline - technical analysis server for stock interval data

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use std::sync::Arc;

use config::Config;
use services::AnalysisStore;
use sources::IntervalSource;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub source: Arc<IntervalSource>,
    pub store: Arc<AnalysisStore>,
}

impl AppState {
    /// Wire the interval source and analysis store from configuration.
    pub fn from_config(config: Config) -> Self {
        let source = Arc::new(IntervalSource::from_config(&config));
        let store = AnalysisStore::new(source.clone(), config.analysis_options(), config.cache_ttl);
        Self {
            config: Arc::new(config),
            source,
            store,
        }
    }
}

// Re-export commonly used types
pub use error::{AnalysisError, AppError};
pub use services::{analyze, AnalysisOptions};
pub use types::*;
