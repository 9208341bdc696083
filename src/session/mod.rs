//! Session lifecycle: credential exchange, signed cookie, per-request reader.

pub mod broker;
pub mod middleware;
pub mod models;
pub mod token;

/// Name of the cookie carrying the signed session payload
pub const SESSION_COOKIE: &str = "session_token";
