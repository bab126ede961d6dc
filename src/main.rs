//! # signbridge
//!
//! SignBridge server binary: loads settings and dictionaries, then serves
//! the HTTP and `WebSocket` endpoints until Ctrl-C.

#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use signbridge_core::{DataPaths, Dictionaries};
use signbridge_server::{AppState, ServerConfig};
use signbridge_settings::SignBridgeSettings;
use signbridge_telemetry::{TelemetryConfig, init_telemetry};

/// SignBridge text-to-sign video server.
#[derive(Parser, Debug)]
#[command(name = "signbridge", about = "SignBridge text-to-sign video server")]
struct Cli {
    /// Settings file (defaults to `signbridge.json` in the working directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Host to bind (overrides settings).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides settings).
    #[arg(long)]
    port: Option<u16>,

    /// Directory holding the dictionary JSON files (overrides settings).
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

impl Cli {
    fn apply(&self, settings: &mut SignBridgeSettings) {
        if let Some(ref host) = self.host {
            settings.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if let Some(ref dir) = self.data_dir {
            settings.data.dir.clone_from(dir);
        }
    }
}

fn server_config(settings: &SignBridgeSettings) -> ServerConfig {
    ServerConfig {
        host: settings.server.host.clone(),
        port: settings.server.port,
        max_message_size: settings.server.max_message_size,
        ..ServerConfig::default()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = match cli.config {
        Some(ref path) => signbridge_settings::load_settings_from_path(path),
        None => signbridge_settings::load_settings(),
    }
    .context("Failed to load settings")?;
    cli.apply(&mut settings);

    let telemetry = TelemetryConfig::from_names(
        &settings.logging.level,
        &settings.logging.module_levels,
        settings.logging.json,
    )
    .context("Invalid logging settings")?;
    init_telemetry(&telemetry).context("Failed to initialize logging")?;

    let metrics_handle =
        signbridge_server::metrics::install_recorder().context("Failed to install metrics recorder")?;

    let paths = DataPaths::in_dir(&settings.data.dir);
    let dictionaries = Dictionaries::load(&paths).context("Failed to load dictionaries")?;
    tracing::info!(
        dir = %settings.data.dir.display(),
        words = dictionaries.words.len(),
        alphabet = dictionaries.alphabet.len(),
        numbers = dictionaries.numbers.len(),
        "dictionaries loaded"
    );

    let state = AppState::seeded(dictionaries, settings.quiz.seed).with_metrics(metrics_handle);
    let config = server_config(&settings);
    let handle = signbridge_server::start(&config, state)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr()))?;

    tracing::info!(addr = %handle.addr, "SignBridge server ready");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl+c")?;

    tracing::info!("Shutting down...");
    handle.shutdown(config.shutdown_timeout()).await;
    tracing::info!("Shutdown complete");
    Ok(())
}
