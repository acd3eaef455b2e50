//! Integration tests for the interval sources and the analysis store

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use trendline::error::AppError;
use trendline::services::{AnalysisOptions, AnalysisStore};
use trendline::sources::{IntervalProvider, IntervalSource, SampleFiles};
use trendline::types::{Granularity, SymbolDataRequest};

fn samples_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("samples")
}

fn source(regular_hours_only: bool) -> Arc<IntervalSource> {
    Arc::new(IntervalSource::new(
        IntervalProvider::Samples(SampleFiles::new(samples_dir())),
        regular_hours_only,
    ))
}

fn store() -> Arc<AnalysisStore> {
    AnalysisStore::new(source(true), AnalysisOptions::default(), Duration::from_secs(60))
}

/// Scratch directory holding one sample file.
fn scratch_samples(name: &str, body: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("trendline-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("test-daily.json"), body).unwrap();
    dir
}

#[test]
fn test_sample_symbols() {
    let samples = SampleFiles::new(samples_dir());
    let symbols = tokio_test::block_on(samples.symbols()).unwrap();
    assert_eq!(symbols, vec!["AAPL", "AMD", "MSFT"]);
}

#[tokio::test]
async fn test_available_symbols_follow_sample_files() {
    let configured = vec!["MSFT".to_string(), "TSLA".to_string(), "AMD".to_string()];
    let available = source(true).available_symbols(&configured).await.unwrap();
    assert_eq!(available, vec!["MSFT", "AMD"]);

    let empty = IntervalSource::new(
        IntervalProvider::Samples(SampleFiles::new(std::env::temp_dir().join("trendline-missing-dir"))),
        true,
    );
    assert!(empty.available_symbols(&configured).await.is_err());
}

#[tokio::test]
async fn test_sample_intraday_includes_extended_hours() {
    let samples = SampleFiles::new(samples_dir());
    let intervals = samples.fetch("MSFT", Granularity::Intraday).await.unwrap();

    // Five days of 09:00-16:30 five-minute bars.
    assert_eq!(intervals.len(), 5 * 91);
    assert!(intervals.windows(2).all(|w| w[0].time < w[1].time));
}

#[tokio::test]
async fn test_regular_hours_filter_applies_to_intraday_only() {
    let request = SymbolDataRequest::new("msft", Granularity::Intraday);
    let filtered = source(true).fetch(&request).await.unwrap();
    let unfiltered = source(false).fetch(&request).await.unwrap();

    assert_eq!(filtered.len(), 5 * 79);
    assert_eq!(unfiltered.len(), 5 * 91);

    let request = SymbolDataRequest::new("msft", Granularity::Daily);
    let daily_filtered = source(true).fetch(&request).await.unwrap();
    let daily = source(false).fetch(&request).await.unwrap();
    assert_eq!(daily_filtered.len(), daily.len());
}

#[tokio::test]
async fn test_unknown_symbol_is_not_found() {
    let request = SymbolDataRequest::new("nope", Granularity::Daily);
    assert!(matches!(
        source(true).fetch(&request).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_invalid_symbol_is_bad_request() {
    let request = SymbolDataRequest::new("../secrets", Granularity::Daily);
    assert!(matches!(
        source(true).fetch(&request).await,
        Err(AppError::BadRequest(_))
    ));
}

#[tokio::test]
async fn test_vendor_notice_is_external_error() {
    let dir = scratch_samples(
        "notice",
        r#"{"Note": "Our standard API call frequency is 5 calls per minute"}"#,
    );
    let source = IntervalSource::new(IntervalProvider::Samples(SampleFiles::new(&dir)), true);

    let request = SymbolDataRequest::new("test", Granularity::Daily);
    assert!(matches!(
        source.fetch(&request).await,
        Err(AppError::ExternalApi(_))
    ));

    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn test_store_caches_per_symbol_and_granularity() {
    let store = store();
    let request = SymbolDataRequest::new("MSFT", Granularity::Intraday);

    let (first, cached) = store.get_analysis(&request).await.unwrap();
    assert!(!cached);
    let (second, cached) = store.get_analysis(&request).await.unwrap();
    assert!(cached);
    assert!(Arc::ptr_eq(&first, &second));

    // Symbol case does not split the cache.
    let (_, cached) = store
        .get_analysis(&SymbolDataRequest::new("msft", Granularity::Intraday))
        .await
        .unwrap();
    assert!(cached);

    let (daily, cached) = store
        .get_analysis(&SymbolDataRequest::new("msft", Granularity::Daily))
        .await
        .unwrap();
    assert!(!cached);
    assert_eq!(daily.granularity, Granularity::Daily);
    assert_eq!(store.len(), 2);

    assert!(store.invalidate(&request));
    let (_, cached) = store.get_analysis(&request).await.unwrap();
    assert!(!cached);
}

#[tokio::test]
async fn test_intraday_analysis_of_samples() {
    let store = store();
    let (analysis, _) = store
        .get_analysis(&SymbolDataRequest::new("amd", Granularity::Intraday))
        .await
        .unwrap();

    assert_eq!(analysis.symbol, "AMD");
    assert_eq!(analysis.intervals.len(), 5 * 79);
    assert_eq!(analysis.vwap.len(), analysis.intervals.len());
    assert!(analysis.vwap.iter().all(|v| v.is_some()));

    let labels: Vec<&str> = analysis.dividers.iter().map(|d| d.label.as_str()).collect();
    assert_eq!(labels, vec!["4/1", "4/2", "4/3", "4/4", "4/5"]);
    assert_eq!(analysis.composite_session.len(), 79);
}

#[tokio::test]
async fn test_daily_sessions_are_years() {
    let store = store();
    let (analysis, _) = store
        .get_analysis(&SymbolDataRequest::new("aapl", Granularity::Daily))
        .await
        .unwrap();

    let labels: Vec<&str> = analysis.dividers.iter().map(|d| d.label.as_str()).collect();
    assert_eq!(labels, vec!["2017", "2018", "2019"]);
}

#[tokio::test]
async fn test_random_session_is_one_day() {
    let store = store();
    let analysis = store.random_session(&["MSFT".to_string()]).await.unwrap();

    assert_eq!(analysis.symbol, "MSFT");
    assert_eq!(analysis.granularity, Granularity::Intraday);
    assert_eq!(analysis.intervals.len(), 79);
    assert_eq!(analysis.dividers.len(), 1);
}
