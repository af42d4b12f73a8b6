//! HTTP health and status endpoints.

use crate::config::BotSettings;
use crate::error::AppResult;
use crate::status::endpoint_host;
use axum::{
    extract::State,
    response::Html,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use lookup_client::LookupClient;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Service name reported by `/health`.
pub const SERVICE_NAME: &str = "number-lookup-bot";

/// Shared state for the health endpoints.
#[derive(Clone)]
pub struct HealthState {
    pub client: Arc<LookupClient>,
    pub settings: Arc<BotSettings>,
}

impl HealthState {
    pub fn new(client: Arc<LookupClient>, settings: Arc<BotSettings>) -> Self {
        Self { client, settings }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub service: String,
    pub bot_status: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub bot_online: bool,
    pub api_endpoint: String,
    pub has_api_key: bool,
    pub rate_limit: usize,
    pub rate_window: u64,
    pub timeout: u64,
    pub timestamp: String,
}

pub fn create_router(state: HealthState) -> Router {
    Router::new()
        .route("/", get(landing))
        .route("/health", get(health))
        .route("/api/status", get(api_status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Human-readable status page.
pub async fn landing(State(state): State<HealthState>) -> Html<String> {
    let info = state.client.api_info();

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Number Lookup Bot</title></head>
<body>
<h1>📞 Number Lookup Bot</h1>
<p><strong>Server Time:</strong> {time}</p>
<p><strong>Lookup API:</strong> {host}</p>
<p><strong>Bot Status:</strong> ✅ Active and Listening</p>
<p><strong>Rate Limiting:</strong> {max} requests per {window} seconds</p>
<p>Send <code>/start</code> to the bot on Telegram to begin.</p>
</body>
</html>
"#,
        time = Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        host = html_escape(endpoint_host(&info.base_url)),
        max = state.settings.max_requests,
        window = state.settings.window.as_secs(),
    ))
}

/// Liveness check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        timestamp: Utc::now().to_rfc3339(),
        service: SERVICE_NAME.into(),
        bot_status: "running".into(),
    })
}

/// Configuration echo. Reports what is configured, not live API health.
pub async fn api_status(State(state): State<HealthState>) -> Json<StatusResponse> {
    let info = state.client.api_info();

    Json(StatusResponse {
        bot_online: true,
        api_endpoint: endpoint_host(&info.base_url).to_string(),
        has_api_key: info.has_api_key,
        rate_limit: state.settings.max_requests,
        rate_window: state.settings.window.as_secs(),
        timeout: info.timeout_secs,
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Serve the health endpoints until the process exits.
pub async fn serve(addr: SocketAddr, state: HealthState) -> AppResult<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Health server listening on {}", addr);

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
