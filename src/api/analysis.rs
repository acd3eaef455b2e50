//! Uncached analysis endpoints.

use axum::{body::Bytes, extract::State, routing::{get, post}, Json, Router};

use super::ApiResponse;
use crate::error::Result;
use crate::types::{SymbolAnalysis, SymbolData};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/random", get(random_session))
        .route("/api/analyze", post(analyze_data))
}

/// One random intraday session of a random configured symbol.
async fn random_session(State(state): State<AppState>) -> Result<Json<ApiResponse<SymbolAnalysis>>> {
    let analysis = state.store.random_session(&state.config.symbols).await?;
    Ok(Json(ApiResponse::new(analysis)))
}

/// Analyse intervals supplied in the request body.
///
/// The body is parsed here rather than through the `Json` extractor so
/// that malformed payloads get the same error shape as everything else.
async fn analyze_data(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ApiResponse<SymbolAnalysis>>> {
    let data: SymbolData = serde_json::from_slice(&body)?;
    let analysis = state.store.analyze_data(data)?;
    Ok(Json(ApiResponse::new(analysis)))
}
