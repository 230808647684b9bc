use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use golddigger_common::Config;
use golddigger_digest::Digest;

mod rest;

pub struct AppState {
    pub digest: Digest,
}

fn app(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        // REST API
        .route("/api/summarize", post(rest::summarize::api_summarize))
        .with_state(state)
        // CORS
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Summaries are per-request; never cache them
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // Logging layer: method + path + request id only (no bodies, no query params)
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                        request_id = %uuid::Uuid::new_v4(),
                    )
                },
            ),
        )
}

/// Info-level targets on top of whatever `RUST_LOG` asks for.
const LOG_DIRECTIVES: &[&str] = &["api=info", "golddigger=info", "youtube_client=info"];

fn log_filter(base: EnvFilter) -> Result<EnvFilter> {
    LOG_DIRECTIVES
        .iter()
        .try_fold(base, |filter, d| Ok(filter.add_directive(d.parse()?)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(EnvFilter::from_default_env())?)
        .init();

    let config = Config::from_env()?;
    config.log_redacted();

    let digest = Digest::from_config(&config)?;
    let state = Arc::new(AppState { digest });

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!("Comment Gold Digger API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}
