//! Alpha Vantage time series client and response translation.
//!
//! Free tier rate limits are tight (25 requests/day, 5/minute); limit
//! notices arrive as a 200 response with a `Note` or `Information` field.

use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::types::{Granularity, Interval};

const ALPHA_VANTAGE_URL: &str = "https://www.alphavantage.co/query";
const INTRADAY_INTERVAL: &str = "5min";

/// Time series response, intraday or daily.
///
/// The series itself sits under a key that names the interval
/// (`Time Series (5min)`, `Time Series (Daily)`), so it is collected
/// through the flattened map.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeSeriesResponse {
    #[serde(rename = "Meta Data")]
    pub meta_data: Option<TimeSeriesMetaData>,
    #[serde(rename = "Error Message")]
    pub error_message: Option<String>,
    #[serde(rename = "Note")]
    pub note: Option<String>,
    #[serde(rename = "Information")]
    pub information: Option<String>,
    #[serde(flatten)]
    pub series: HashMap<String, HashMap<String, TimeSeriesDataPoint>>,
}

/// Time series meta data.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeSeriesMetaData {
    #[serde(rename = "1. Information")]
    pub information: Option<String>,
    #[serde(rename = "2. Symbol")]
    pub symbol: Option<String>,
    #[serde(rename = "3. Last Refreshed")]
    pub last_refreshed: Option<String>,
}

/// Individual time series data point. Every field is a decimal string.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeSeriesDataPoint {
    #[serde(rename = "1. open")]
    pub open: String,
    #[serde(rename = "2. high")]
    pub high: String,
    #[serde(rename = "3. low")]
    pub low: String,
    #[serde(rename = "4. close")]
    pub close: String,
    #[serde(rename = "5. volume")]
    pub volume: String,
}

impl TimeSeriesDataPoint {
    fn to_interval(&self, time: NaiveDateTime) -> Result<Interval> {
        Ok(Interval {
            time,
            open: parse_decimal("open", &self.open)?,
            high: parse_decimal("high", &self.high)?,
            low: parse_decimal("low", &self.low)?,
            close: parse_decimal("close", &self.close)?,
            volume: parse_decimal("volume", &self.volume)?,
        })
    }
}

fn parse_decimal(field: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::ExternalApi(format!("Invalid {} value: {:?}", field, value)))
}

/// Parse an exchange-local timestamp, `2019-04-05 15:55:00` or `2019-04-05`.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    if let Ok(time) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(time);
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| AppError::ExternalApi(format!("Invalid timestamp: {:?}", s)))
}

/// Translate a raw response body into intervals sorted ascending by time.
pub fn translate(body: &str) -> Result<Vec<Interval>> {
    let response: TimeSeriesResponse = serde_json::from_str(body)
        .map_err(|e| AppError::ExternalApi(format!("Parse error: {}", e)))?;

    if let Some(message) = response.error_message {
        return Err(AppError::ExternalApi(message));
    }
    if let Some(note) = response.note.or(response.information) {
        warn!("Alpha Vantage notice: {}", note);
        return Err(AppError::ExternalApi(note));
    }

    let points = response
        .series
        .iter()
        .find(|(key, _)| key.starts_with("Time Series"))
        .map(|(_, points)| points)
        .ok_or_else(|| AppError::ExternalApi("No time series data available".to_string()))?;

    let mut intervals = points
        .iter()
        .map(|(timestamp, point)| point.to_interval(parse_timestamp(timestamp)?))
        .collect::<Result<Vec<_>>>()?;

    intervals.sort_by(|a, b| a.time.cmp(&b.time));

    if let Some(meta) = &response.meta_data {
        debug!(
            "Translated {} intervals for {} (last refreshed {})",
            intervals.len(),
            meta.symbol.as_deref().unwrap_or("unknown"),
            meta.last_refreshed.as_deref().unwrap_or("unknown")
        );
    }

    Ok(intervals)
}

/// Alpha Vantage API client.
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
}

impl AlphaVantageClient {
    /// Create a new Alpha Vantage client.
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    /// Fetch the full raw time series body for a symbol.
    pub async fn fetch_raw(&self, symbol: &str, granularity: Granularity) -> Result<String> {
        let mut query = vec![
            ("symbol", symbol),
            ("outputsize", "full"),
            ("apikey", self.api_key.as_str()),
        ];
        match granularity {
            Granularity::Intraday => {
                query.push(("function", "TIME_SERIES_INTRADAY"));
                query.push(("interval", INTRADAY_INTERVAL));
            }
            Granularity::Daily => query.push(("function", "TIME_SERIES_DAILY")),
        }

        debug!("Fetching {} {} series from Alpha Vantage", symbol, granularity);

        let response = self.client.get(ALPHA_VANTAGE_URL).query(&query).send().await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!("API error: {}", response.status())));
        }

        Ok(response.text().await?)
    }

    /// Fetch and translate a symbol's intervals.
    pub async fn fetch(&self, symbol: &str, granularity: Granularity) -> Result<Vec<Interval>> {
        let body = self.fetch_raw(symbol, granularity).await?;
        translate(&body).map_err(|e| match e {
            AppError::ExternalApi(msg) if msg.contains("Invalid API call") => {
                AppError::NotFound(format!("Unknown symbol: {}", symbol))
            }
            other => other,
        })
    }
}
