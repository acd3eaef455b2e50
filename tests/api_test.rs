//! Integration tests for API endpoints

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use trendline::config::Config;
use trendline::{api, AppState};

fn app() -> Router {
    let mut config = Config::default_values();
    config.samples_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("samples");
    config.symbols = vec!["MSFT".to_string(), "AMD".to_string()];
    api::router().with_state(AppState::from_config(config))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post(app: Router, uri: &str, body: String) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(app(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["strategy"], "crossover_momentum");
}

#[tokio::test]
async fn test_symbol_analysis_then_cached() {
    let app = app();

    let (status, body) = get(app.clone(), "/api/symbols/msft/intraday").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["cached"], false);

    let data = &body["data"];
    assert_eq!(data["symbol"], "MSFT");
    assert_eq!(data["granularity"], "intraday");
    let len = data["intervals"].as_array().unwrap().len();
    assert_eq!(data["shortMovingAverage"].as_array().unwrap().len(), len);
    assert_eq!(data["longMovingAverage"].as_array().unwrap().len(), len);
    assert_eq!(data["momentum"].as_array().unwrap().len(), len);
    assert_eq!(data["vwap"].as_array().unwrap().len(), len);
    assert!(data["peaks"].is_array());
    assert!(data["predictedDips"].is_array());

    let (status, body) = get(app, "/api/symbols/MSFT/intraday").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["cached"], true);
}

#[tokio::test]
async fn test_invalid_granularity() {
    let (status, body) = get(app(), "/api/symbols/msft/weekly").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["error"].as_str().unwrap().contains("weekly"));
}

#[tokio::test]
async fn test_unknown_symbol() {
    let (status, body) = get(app(), "/api/symbols/zzzz/daily").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn test_list_symbols() {
    let (status, body) = get(app(), "/api/symbols").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!(["MSFT", "AMD"]));
}

#[tokio::test]
async fn test_list_symbols_skips_missing_samples() {
    let mut config = Config::default_values();
    config.samples_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("samples");
    config.symbols = vec!["AMD".to_string(), "ZZZZ".to_string(), "AAPL".to_string()];
    let app = api::router().with_state(AppState::from_config(config));

    let (status, body) = get(app, "/api/symbols").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!(["AMD", "AAPL"]));
}

#[tokio::test]
async fn test_random_session() {
    let (status, body) = get(app(), "/api/random").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["cached"], false);
    assert_eq!(body["data"]["granularity"], "intraday");
    assert_eq!(body["data"]["dividers"].as_array().unwrap().len(), 1);
}

fn intervals(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            let open = 50.0 + (i as f64 / 4.0).sin() * 3.0;
            json!({
                "time": format!("2019-04-01T10:{:02}:00", i),
                "open": open,
                "high": open + 1.0,
                "low": open - 1.0,
                "close": open + 0.25,
                "volume": 100.0 + i as f64,
            })
        })
        .collect()
}

#[tokio::test]
async fn test_analyze_posted_intervals() {
    let body = json!({"symbol": "test", "granularity": "intraday", "intervals": intervals(40)});
    let (status, body) = post(app(), "/api/analyze", body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["symbol"], "test");
    assert_eq!(body["data"]["granularity"], "intraday");
    assert_eq!(body["data"]["intervals"].as_array().unwrap().len(), 40);
    assert_eq!(body["data"]["volumeWeights"].as_array().unwrap().len(), 40);
}

#[tokio::test]
async fn test_analyze_rejects_unordered_intervals() {
    let mut bars = intervals(10);
    bars.swap(3, 4);
    let body = json!({"symbol": "test", "type": "intraday", "intervals": bars});
    let (status, body) = post(app(), "/api/analyze", body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("malformed input"));
}

#[tokio::test]
async fn test_analyze_rejects_invalid_json() {
    let (status, body) = post(app(), "/api/analyze", "{\"symbol\":".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}
