// # Routes Module
//
// - This module contains all HTTP route handlers for the dashboard server.
// - Routes are organized by functionality into separate submodules.

use serde::Serialize;

/// Health check and monitoring endpoints
pub mod health;

/// Login, logout, and session inspection endpoints
pub mod auth;

/// Dashboard shell endpoint
pub mod dashboard;

/// Orders listing and creation endpoints
pub mod orders;

/// Error response structure shared by the route handlers
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
