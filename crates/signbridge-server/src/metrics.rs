//! Prometheus metrics recorder and `/metrics` rendering.

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::info;

/// Install the Prometheus metrics recorder (global).
///
/// Returns the `PrometheusHandle` used to render the `/metrics` endpoint.
/// Call once at startup before any metrics are recorded.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    info!("prometheus metrics recorder installed");
    Ok(handle)
}

/// Render Prometheus text format from the installed recorder.
pub fn render(handle: &PrometheusHandle) -> String {
    handle.render()
}

// Metric names.

/// WebSocket connections opened total (counter).
pub const WS_CONNECTIONS_TOTAL: &str = "ws_connections_total";
/// WebSocket disconnections total (counter).
pub const WS_DISCONNECTIONS_TOTAL: &str = "ws_disconnections_total";
/// Active WebSocket connections (gauge).
pub const WS_CONNECTIONS_ACTIVE: &str = "ws_connections_active";
/// Inbound transcript messages total (counter).
pub const WS_MESSAGES_TOTAL: &str = "ws_messages_total";
/// Video URLs emitted across HTTP and WebSocket (counter).
pub const TRANSLATION_URLS_TOTAL: &str = "translation_urls_total";
/// `/api/translate-text` requests total (counter).
pub const TRANSLATE_REQUESTS_TOTAL: &str = "translate_requests_total";
/// `/api/generate-quiz` requests total (counter).
pub const QUIZ_REQUESTS_TOTAL: &str = "quiz_requests_total";
/// Quiz requests answered with an error payload (counter).
pub const QUIZ_ERRORS_TOTAL: &str = "quiz_errors_total";
