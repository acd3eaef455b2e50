//! Unit tests for types module

use chrono::NaiveDate;
use trendline::types::*;

#[test]
fn test_granularity_from_str() {
    assert_eq!(Granularity::from_str("intraday"), Some(Granularity::Intraday));
    assert_eq!(Granularity::from_str("DAILY"), Some(Granularity::Daily));
    assert_eq!(Granularity::from_str("weekly"), None);
}

#[test]
fn test_granularity_serialization() {
    let json = serde_json::to_string(&Granularity::Intraday).unwrap();
    assert_eq!(json, "\"intraday\"");

    let parsed: Granularity = serde_json::from_str("\"daily\"").unwrap();
    assert_eq!(parsed, Granularity::Daily);
}

#[test]
fn test_session_keys() {
    let morning = NaiveDate::from_ymd_opt(2019, 4, 1).unwrap().and_hms_opt(9, 30, 0).unwrap();
    let evening = NaiveDate::from_ymd_opt(2019, 4, 1).unwrap().and_hms_opt(16, 0, 0).unwrap();
    let next_day = NaiveDate::from_ymd_opt(2019, 4, 2).unwrap().and_hms_opt(9, 30, 0).unwrap();

    let intraday = Granularity::Intraday;
    assert_eq!(intraday.session_key(&morning), intraday.session_key(&evening));
    assert_ne!(intraday.session_key(&evening), intraday.session_key(&next_day));
    assert_eq!(intraday.session_label(&next_day), "4/2");

    let daily = Granularity::Daily;
    assert_eq!(daily.session_key(&morning), daily.session_key(&next_day));
    assert_eq!(daily.session_label(&morning), "2019");
}

#[test]
fn test_interval_json_round_trip() {
    let json = r#"{"time":"2019-04-01T09:30:00","open":10.0,"high":12.0,"low":9.0,"close":11.0,"volume":100.0}"#;
    let interval: Interval = serde_json::from_str(json).unwrap();

    assert_eq!(interval.midpoint(), 10.5);
    assert_eq!(interval.average_price(), 10.5);
    assert!(interval.is_bullish());
}

#[test]
fn test_series_neighbours_follow_slices() {
    let intervals: Vec<Interval> = (0..5)
        .map(|i| Interval {
            time: NaiveDate::from_ymd_opt(2019, 4, 1).unwrap().and_hms_opt(10, i * 5, 0).unwrap(),
            open: i as f64,
            high: i as f64 + 1.0,
            low: i as f64 - 1.0,
            close: i as f64,
            volume: 1.0,
        })
        .collect();
    let series = IntervalSeries::new(Granularity::Intraday, intervals).unwrap();

    assert!(series.previous(0).is_none());
    assert_eq!(series.next(0).map(|i| i.open), Some(1.0));

    let tail = series.slice(2..5);
    assert_eq!(tail.len(), 3);
    assert!(tail.previous(0).is_none());
    assert_eq!(tail.get(0).map(|i| i.open), Some(2.0));
    assert!(tail.next(2).is_none());

    let range = series.range().unwrap();
    assert_eq!(range.high, 5.0);
    assert_eq!(range.low, -1.0);
}

#[test]
fn test_strategy_serialization() {
    let json = serde_json::to_string(&ReversalStrategyKind::MomentumDerivative).unwrap();
    assert_eq!(json, "\"momentum_derivative\"");
    assert_eq!(ReversalStrategyKind::default(), ReversalStrategyKind::CrossoverMomentum);
}
