//! # signbridge-server
//!
//! Axum HTTP + `WebSocket` server for sign video lookup.
//!
//! - HTTP endpoints: translate, quiz, status, health, Prometheus metrics
//! - `WebSocket` endpoint: per-connection transcript → video event stream
//! - Graceful shutdown via `CancellationToken`

#![deny(unsafe_code)]

pub mod config;
pub mod events;
pub mod handlers;
pub mod health;
pub mod metrics;
pub mod server;
pub mod session;
pub mod shutdown;

pub use config::ServerConfig;
pub use server::{AppState, ServerHandle, build_router, start};
