//! Configuration module for environment variables and application settings

use std::env;
use anyhow::{Result, anyhow};
use once_cell::sync::Lazy;

/// Global application configuration loaded from environment variables
pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

#[derive(Debug, Clone)]
pub struct Config {
    /// Origin of the backend API (Authentication + Order Directory)
    pub api_base_url: String,

    /// Path of the login endpoint on the Authentication API
    pub auth_login_path: String,

    /// Secret used to sign session cookies
    pub session_secret: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Origins allowed to call the API routes with credentials
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let api_base_url = env::var("API_BASE_URL")
            .or_else(|_| env::var("NEXT_PUBLIC_API_BASE_URL"))
            .unwrap_or_else(|_| "http://localhost:8000".to_string());

        // Some deployments still expose the login endpoint at /api/auth/login
        let auth_login_path = env::var("AUTH_LOGIN_PATH")
            .unwrap_or_else(|_| "/api/login".to_string());

        let production = env::var("APP_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        // The fallback secret must never reach production: refuse to start there.
        let session_secret = match env::var("SESSION_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ if production => {
                return Err(anyhow!(
                    "SESSION_SECRET environment variable is required when APP_ENV=production"
                ));
            }
            _ => {
                tracing::warn!("SESSION_SECRET not set, using insecure development fallback");
                "dev-secret".to_string()
            }
        };

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            auth_login_path,
            session_secret,

            server: ServerConfig {
                host: env::var("SERVER_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .or_else(|_| env::var("SERVER_PORT"))
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .unwrap_or(3000),
            },

            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3001".to_string())
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
        })
    }
}
