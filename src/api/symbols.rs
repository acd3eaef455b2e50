//! Per-symbol analysis endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::debug;

use super::ApiResponse;
use crate::error::{AppError, Result};
use crate::types::{Granularity, SymbolAnalysis, SymbolDataRequest};
use crate::AppState;

/// Create the symbols router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_symbols))
        .route("/:symbol/:granularity", get(get_analysis))
}

/// Configured symbols the interval source has data for.
async fn list_symbols(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<String>>>> {
    let symbols = state.source.available_symbols(&state.config.symbols).await?;
    Ok(Json(ApiResponse::new(symbols)))
}

/// Full analysis for a symbol at `intraday` or `daily` granularity.
async fn get_analysis(
    State(state): State<AppState>,
    Path((symbol, granularity)): Path<(String, String)>,
) -> Result<Json<ApiResponse<Arc<SymbolAnalysis>>>> {
    let granularity = Granularity::from_str(&granularity).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Invalid granularity: {}. Use intraday or daily",
            granularity
        ))
    })?;

    let request = SymbolDataRequest::new(symbol, granularity);
    let (analysis, cached) = state.store.get_analysis(&request).await?;
    debug!("Serving {} (cached: {})", request.cache_key(), cached);

    Ok(Json(ApiResponse::with_cached(analysis, cached)))
}
