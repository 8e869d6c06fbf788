//! Care Compass server entrypoint.
//!
//! Loads and validates configuration, wires the hosted inference provider
//! into the analysis handler, and serves the triage API.

use std::sync::Arc;
use std::time::Duration;

use http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use care_compass::adapters::ai::{HuggingFaceConfig, HuggingFaceProvider};
use care_compass::adapters::http::{triage_routes, TriageAppState};
use care_compass::application::handlers::AnalyzeSymptomsHandler;
use care_compass::config::AppConfig;

#[tokio::main]
async fn main() {
    let config = AppConfig::load().expect("Failed to load configuration");
    config.validate().expect("Invalid configuration");

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.server.log_level).expect("Invalid log filter"),
        )
        .init();

    let provider = HuggingFaceProvider::new(HuggingFaceConfig::from_app_config(&config.ai));
    tracing::info!(
        model = %config.ai.model,
        endpoint = %config.ai.base_url,
        "inference provider configured"
    );

    let analyze_handler = AnalyzeSymptomsHandler::new(Arc::new(provider));
    let state = TriageAppState::new(Arc::new(analyze_handler));

    let app = triage_routes(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config));

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");
    axum::serve(listener, app)
        .await
        .expect("Server error");
}

/// Builds the CORS layer: explicit origins when configured, permissive in
/// development otherwise.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
