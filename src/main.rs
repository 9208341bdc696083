//! # ManagePetro Dashboard Server
//!
//! Server side of the ManagePetro order-management dashboard. All business
//! logic lives in an external API; this server brokers credential logins
//! against it, keeps the resulting bearer token in a signed session cookie,
//! and renders orders and clients into normalized view models.
//!
//! ## Architecture
//! The server is organized into modules:
//! - `server`: Core server initialization and route wiring
//! - `config`: Environment variable configuration management
//! - `session`: Credential exchange, signed session cookie, request reader
//! - `directory`: Order Directory API client and pagination handling
//! - `routes`: HTTP route handlers organized by functionality
//!
//! ## Environment Setup
//! Copy `.env.example` to `.env` and configure:
//! ```bash
//! cp .env.example .env
//! # Point API_BASE_URL at the backend and set SESSION_SECRET
//! ```
//!
//! ## Running the Server
//! ```bash
//! cargo run
//! ```
//!
//! The server will start on `http://0.0.0.0:3000` by default.

mod config;
mod directory;
mod routes;
mod server;
mod session;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application entry point.
///
/// Initializes the tracing/logging system and starts the HTTP server.
/// This function will run indefinitely until the process is terminated.
#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize the tracing subscriber for structured logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false) // Don't show module targets for cleaner output
                .compact(), // Use compact formatting
        )
        .init();

    tracing::info!("Starting ManagePetro dashboard server...");
    tracing::info!("Package: {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    tracing::info!("Build profile: {}", if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    });

    // Start the HTTP server - this will run indefinitely
    server::start().await;
}
