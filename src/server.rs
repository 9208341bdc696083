//! # Server Module
//!
//! HTTP server setup and route configuration for the dashboard server.

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::CONFIG;
use crate::directory::{DirectoryApi, HttpDirectory};
use crate::routes;
use crate::routes::health::ping;
use crate::session::broker::SessionBroker;
use crate::session::middleware::SessionMiddleware;
use crate::session::token::SessionTokenService;

/// Application state shared across all route handlers
#[derive(Clone)]
pub struct AppState {
    pub broker: Arc<SessionBroker>,
    pub directory: Arc<dyn DirectoryApi>,
    pub session_tokens: Arc<SessionTokenService>,
}

/// Starts the dashboard HTTP server.
///
/// Builds the session services and the Directory API client, wires up all
/// routes, and serves the application with the Axum framework on the
/// configured address.
pub async fn start() {
    let session_tokens = Arc::new(SessionTokenService::new(&CONFIG.session_secret));
    let broker = Arc::new(SessionBroker::new(
        &CONFIG.api_base_url,
        &CONFIG.auth_login_path,
    ));
    let directory: Arc<dyn DirectoryApi> = Arc::new(HttpDirectory::new(&CONFIG.api_base_url));

    let app_state = AppState {
        broker,
        directory,
        session_tokens: session_tokens.clone(),
    };

    // Dashboard pages require a session; unauthenticated visitors are
    // redirected to /login
    let page_routes = Router::new()
        .route("/dashboard", get(routes::dashboard::overview))
        .route("/dashboard/orders", get(routes::orders::list_orders))
        .route("/dashboard/orders/new", get(routes::orders::new_order_form))
        .layer(middleware::from_fn_with_state(
            session_tokens.clone(),
            SessionMiddleware::require_session,
        ));

    // Client-initiated actions answer 401 themselves instead of redirecting
    let action_routes = Router::new()
        .route("/dashboard/orders", post(routes::orders::create_order))
        .layer(middleware::from_fn_with_state(
            session_tokens.clone(),
            SessionMiddleware::attach_session,
        ));

    let cors_origins: Vec<axum::http::HeaderValue> = CONFIG
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    // Main app router
    let app = Router::new()
        .route("/ping", get(ping)) // Health check endpoint
        .route("/login", get(routes::auth::login_page))
        .merge(page_routes)
        .merge(action_routes)
        .merge(routes::auth::create_auth_routes())
        .layer(
            ServiceBuilder::new().layer(
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(cors_origins))
                    .allow_methods([
                        axum::http::Method::GET,
                        axum::http::Method::POST,
                        axum::http::Method::OPTIONS,
                    ])
                    .allow_headers([
                        axum::http::header::ORIGIN,
                        axum::http::header::CONTENT_TYPE,
                        axum::http::header::ACCEPT,
                    ])
                    .allow_credentials(true), // Allow the session cookie
            ),
        )
        .with_state(app_state);

    let addr = format!("{}:{}", CONFIG.server.host, CONFIG.server.port);

    // Create a TCP listener bound to the configured address
    let listener = TcpListener::bind(&addr).await.expect(
        "Failed to bind to address - port may already be in use",
    );

    tracing::info!("ManagePetro dashboard server starting...");
    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Health check available at http://{}/ping", addr);
    tracing::info!("Backend API origin: {}", CONFIG.api_base_url);

    // Start serving the application
    axum::serve(listener, app).await.unwrap();
}
