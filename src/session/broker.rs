//! Session Broker
//!
//! Exchanges submitted credentials for a bearer token by calling the external
//! Authentication API, and folds the response into the identity bundle that
//! the session cookie carries. Holds no password store of its own.
//!
//! Every failure mode (bad credentials, unreachable API, missing token)
//! collapses to `None`; callers never see partial credentials.

use std::time::Duration;

use reqwest::Client;
use serde_json::{Value, json};
use tracing::warn;

use crate::session::models::{Company, SessionUser};

pub struct SessionBroker {
    client: Client,
    login_url: String,
}

impl SessionBroker {
    pub fn new(api_base_url: &str, login_path: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            login_url: format!("{}{}", api_base_url, login_path),
        }
    }

    /// Exchange credentials for an identity bundle.
    ///
    /// Returns `None` for empty fields, transport failure, a non-2xx
    /// response, or a payload without a usable token.
    pub async fn authorize(&self, email: &str, password: &str) -> Option<SessionUser> {
        if email.is_empty() || password.is_empty() {
            return None;
        }

        let response = match self
            .client
            .post(&self.login_url)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Authentication API unreachable: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("Authentication API returned HTTP {}", response.status());
            return None;
        }

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to parse Authentication API response: {}", e);
                return None;
            }
        };

        bundle_from_response(email, &body)
    }
}

/// Fold a login response into the identity bundle.
///
/// The upstream contract has drifted over time, so this tolerates two token
/// field names and three user shapes: first/last name with optional company,
/// a generic name/fullName field, or no user object at all.
fn bundle_from_response(email: &str, body: &Value) -> Option<SessionUser> {
    let token = body["token"]
        .as_str()
        .or_else(|| body["access_token"].as_str())?;

    let user = match body.get("user").filter(|u| u.is_object()) {
        Some(api_user) => {
            let user_email = api_user["email"].as_str().unwrap_or(email).to_string();

            let first_name = api_user["firstName"].as_str().map(str::to_string);
            let last_name = api_user["lastName"].as_str().map(str::to_string);
            let name = match (&first_name, &last_name) {
                (Some(first), Some(last)) => format!("{} {}", first, last),
                _ => api_user["name"]
                    .as_str()
                    .or_else(|| api_user["fullName"].as_str())
                    .unwrap_or(&user_email)
                    .to_string(),
            };

            let company = api_user.get("company").filter(|c| c.is_object()).map(|c| Company {
                id: id_to_string(&c["id"]),
                name: c["name"].as_str().unwrap_or_default().to_string(),
            });

            SessionUser {
                id: id_to_string(&api_user["id"]),
                email: user_email,
                name,
                first_name,
                last_name,
                company,
                access_token: token.to_string(),
            }
        }
        // No user object: synthesize a minimal identity from the credentials
        None => SessionUser {
            id: email.to_string(),
            email: email.to_string(),
            name: email.to_string(),
            first_name: None,
            last_name: None,
            company: None,
            access_token: token.to_string(),
        },
    };

    Some(user)
}

/// Upstream ids arrive as numbers or strings; the bundle keeps strings.
fn id_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}
