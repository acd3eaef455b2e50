//! Synthetic interval builders shared by the analysis unit tests.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::types::Interval;

/// Five-minute bars starting 2019-04-01 00:00.
pub fn time(index: usize) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2019, 4, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + Duration::minutes(5 * index as i64)
}

pub fn bar(index: usize, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Interval {
    Interval {
        time: time(index),
        open,
        high,
        low,
        close,
        volume,
    }
}

/// Bars climbing by one per step, each closing above its open.
pub fn rising(count: usize) -> Vec<Interval> {
    (0..count)
        .map(|i| {
            let open = 100.0 + i as f64;
            bar(i, open, open + 1.0, open - 0.5, open + 0.5, 1000.0)
        })
        .collect()
}

/// Bars whose highs follow `highs`; lows sit two below.
pub fn with_highs(highs: &[f64]) -> Vec<Interval> {
    highs
        .iter()
        .enumerate()
        .map(|(i, h)| bar(i, h - 1.0, *h, h - 2.0, h - 1.0, 1000.0))
        .collect()
}

/// Bars whose lows follow `lows`; highs sit two above.
pub fn with_lows(lows: &[f64]) -> Vec<Interval> {
    lows.iter()
        .enumerate()
        .map(|(i, l)| bar(i, l + 1.0, l + 2.0, *l, l + 1.0, 1000.0))
        .collect()
}

/// One bar per step of `path`: opens at `path[i]`, closes at `path[i + 1]`.
pub fn along(path: &[f64]) -> Vec<Interval> {
    path.windows(2)
        .enumerate()
        .map(|(i, w)| {
            let (open, close) = (w[0], w[1]);
            bar(i, open, open.max(close) + 0.5, open.min(close) - 0.5, close, 1000.0)
        })
        .collect()
}
