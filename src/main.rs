use trendline::{api, config::Config, AppState};

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trendline=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Starting Trendline server on {}:{}", config.host, config.port);
    info!(
        "Moving averages {}/{}, reversal strategy {}, symbols {}",
        config.short_window,
        config.long_window,
        config.strategy.name(),
        config.symbols.join(",")
    );

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::from_config(config);

    // Periodically drop expired analyses
    {
        let store = state.store.clone();
        let period = state.config.cache_ttl.max(std::time::Duration::from_secs(1));
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(period).await;
                store.cleanup();
            }
        });
    }

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = Router::new()
        .merge(api::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Trendline server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
