//! Router assembly and listener startup.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use signbridge_core::Dictionaries;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::handlers;
use crate::session;
use crate::shutdown::ShutdownCoordinator;

/// Shared state accessible from Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Dictionaries, immutable after startup.
    pub dictionaries: Arc<Dictionaries>,
    /// Random source for quiz generation.
    pub quiz_rng: Arc<Mutex<StdRng>>,
    /// Open `WebSocket` sessions.
    pub connections: Arc<AtomicUsize>,
    /// Shutdown coordinator shared with sessions.
    pub shutdown: ShutdownCoordinator,
    /// When the server started.
    pub start_time: Instant,
    /// Max inbound `WebSocket` message size in bytes.
    pub max_message_size: usize,
    /// Prometheus handle backing `/metrics`, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// State over `dictionaries` with an OS-seeded quiz RNG.
    pub fn new(dictionaries: Dictionaries) -> Self {
        Self::with_rng(dictionaries, StdRng::from_os_rng())
    }

    /// State with a caller-supplied quiz RNG.
    pub fn with_rng(dictionaries: Dictionaries, rng: StdRng) -> Self {
        Self {
            dictionaries: Arc::new(dictionaries),
            quiz_rng: Arc::new(Mutex::new(rng)),
            connections: Arc::new(AtomicUsize::new(0)),
            shutdown: ShutdownCoordinator::new(),
            start_time: Instant::now(),
            max_message_size: ServerConfig::default().max_message_size,
            metrics: None,
        }
    }

    /// State with a quiz RNG seeded from `seed`, or from the OS when `None`.
    pub fn seeded(dictionaries: Dictionaries, seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_rng(dictionaries, StdRng::seed_from_u64(seed)),
            None => Self::new(dictionaries),
        }
    }

    /// Attach a Prometheus handle for `/metrics`.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Number of open `WebSocket` sessions.
    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::Relaxed)
    }
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::status))
        .route("/api/translate-text", post(handlers::translate_text))
        .route("/api/generate-quiz", get(handlers::generate_quiz))
        .route("/ws/translate", get(session::ws_handler))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Bind the listener and serve in the background.
///
/// The server stops accepting when `state.shutdown` is cancelled.
pub async fn start(
    config: &ServerConfig,
    mut state: AppState,
) -> Result<ServerHandle, std::io::Error> {
    state.max_message_size = config.max_message_size;
    let shutdown = state.shutdown.clone();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "SignBridge server started");

    let token = shutdown.token();
    let server = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router)
            .with_graceful_shutdown(token.cancelled_owned())
            .await
        {
            error!(error = %e, "server error");
        }
    });

    Ok(ServerHandle {
        addr: local_addr,
        shutdown,
        server,
    })
}

/// Handle returned by [`start`]; owns the background server task.
pub struct ServerHandle {
    /// Bound address (resolves port `0`).
    pub addr: SocketAddr,
    shutdown: ShutdownCoordinator,
    server: JoinHandle<()>,
}

impl ServerHandle {
    /// Bound port.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// The coordinator that stops this server.
    pub fn shutdown_coordinator(&self) -> &ShutdownCoordinator {
        &self.shutdown
    }

    /// Signal shutdown and wait up to `timeout` for connections to drain.
    pub async fn shutdown(self, timeout: std::time::Duration) {
        let outcome = self
            .shutdown
            .graceful_shutdown(vec![self.server], Some(timeout))
            .await;
        info!(?outcome, "server stopped");
    }
}
