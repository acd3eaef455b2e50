//! Analysis store: per-symbol memoisation of computed analyses.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use rand::seq::SliceRandom;
use rand::Rng;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::error::{AppError, Result};
use crate::services::analysis::{analyze, sessions, AnalysisOptions};
use crate::sources::IntervalSource;
use crate::types::{Granularity, IntervalSeries, SymbolAnalysis, SymbolData, SymbolDataRequest};

/// Outcome of one computation, shared by everyone who waited on it.
type Attempt = std::result::Result<Arc<SymbolAnalysis>, AppError>;

/// One cache key's shared computation.
struct Slot {
    cell: Arc<OnceCell<Attempt>>,
    created_at: Instant,
}

impl Slot {
    fn new() -> Self {
        Self {
            cell: Arc::new(OnceCell::new()),
            created_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }

    fn has_failed(&self) -> bool {
        matches!(self.cell.get(), Some(Err(_)))
    }
}

/// Store for computing and caching symbol analyses.
///
/// Concurrent requests for the same key attach to one in-flight
/// computation. When it fails, every attached request gets the error and
/// the slot is dropped so the next request retries.
pub struct AnalysisStore {
    source: Arc<IntervalSource>,
    options: AnalysisOptions,
    /// Cache key format: "{symbol}:{granularity}"
    slots: DashMap<String, Slot>,
    ttl: Duration,
}

impl AnalysisStore {
    /// Create a new analysis store.
    pub fn new(source: Arc<IntervalSource>, options: AnalysisOptions, ttl: Duration) -> Arc<Self> {
        Arc::new(Self {
            source,
            options,
            slots: DashMap::new(),
            ttl,
        })
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Get the analysis for a symbol, computing it on a miss.
    ///
    /// Returns the analysis and whether it was already cached.
    pub async fn get_analysis(
        &self,
        request: &SymbolDataRequest,
    ) -> Result<(Arc<SymbolAnalysis>, bool)> {
        self.get_or_compute(&request.cache_key(), || self.compute(request))
            .await
    }

    /// Look up `key`, running `compute` only when no live slot holds a value
    /// and no other caller is already computing it.
    pub async fn get_or_compute<F, Fut>(
        &self,
        key: &str,
        compute: F,
    ) -> Result<(Arc<SymbolAnalysis>, bool)>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Arc<SymbolAnalysis>>>,
    {
        let cell = {
            let mut slot = self.slots.entry(key.to_string()).or_insert_with(Slot::new);
            if slot.is_expired(self.ttl) {
                debug!("Cache entry {} expired", key);
                *slot = Slot::new();
            } else if slot.has_failed() {
                *slot = Slot::new();
            }
            slot.cell.clone()
        };

        if let Some(Ok(analysis)) = cell.get() {
            debug!("Cache hit for {}", key);
            return Ok((analysis.clone(), true));
        }

        match cell.get_or_init(compute).await {
            Ok(analysis) => Ok((analysis.clone(), false)),
            Err(e) => {
                if self
                    .slots
                    .remove_if(key, |_, slot| Arc::ptr_eq(&slot.cell, &cell))
                    .is_some()
                {
                    warn!("Computing {} failed: {}", key, e);
                }
                Err(e.duplicate())
            }
        }
    }

    async fn compute(&self, request: &SymbolDataRequest) -> Result<Arc<SymbolAnalysis>> {
        let started = Instant::now();
        let series = self.source.fetch(request).await?;
        let analysis = analyze(&request.symbol.to_uppercase(), &series, &self.options)?;

        info!(
            "Computed {} analysis for {} ({} intervals, {} peaks, {} dips) in {:?}",
            request.granularity,
            analysis.symbol,
            analysis.intervals.len(),
            analysis.peaks.len(),
            analysis.dips.len(),
            started.elapsed()
        );

        Ok(Arc::new(analysis))
    }

    /// Analyse caller-supplied intervals. Never cached.
    pub fn analyze_data(&self, data: SymbolData) -> Result<SymbolAnalysis> {
        let series = IntervalSeries::new(data.granularity, data.intervals)?;
        Ok(analyze(&data.symbol, &series, &self.options)?)
    }

    /// Analyse one randomly chosen intraday session of a randomly chosen
    /// symbol. Never cached.
    pub async fn random_session(&self, symbols: &[String]) -> Result<SymbolAnalysis> {
        let symbol = symbols
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| AppError::Internal("No symbols configured".to_string()))?;

        let request = SymbolDataRequest::new(symbol, Granularity::Intraday);
        let series = self.source.fetch(&request).await?;
        let sessions = sessions::split_sessions(&series);

        if sessions.is_empty() {
            return Err(AppError::NotFound(format!(
                "No intraday sessions for {}",
                request.symbol.to_uppercase()
            )));
        }

        let index = rand::thread_rng().gen_range(0..sessions.len());
        debug!(
            "Picked session {} of {} for {}",
            index + 1,
            sessions.len(),
            request.symbol
        );

        Ok(analyze(
            &request.symbol.to_uppercase(),
            &sessions[index],
            &self.options,
        )?)
    }

    /// Drop a cached analysis.
    pub fn invalidate(&self, request: &SymbolDataRequest) -> bool {
        self.slots.remove(&request.cache_key()).is_some()
    }

    /// Remove all expired and failed slots.
    pub fn cleanup(&self) {
        let ttl = self.ttl;
        self.slots
            .retain(|_, slot| !slot.is_expired(ttl) && !slot.has_failed());
    }

    /// Number of slots, including expired and in-flight ones.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
