//! Auth routes: login, logout, and session inspection.
//!
//! Credentials are never checked locally; the Session Broker forwards them
//! to the Authentication API and the resulting bundle is signed into the
//! session cookie. All auth failures collapse to one generic message.

use axum::http::{StatusCode, header};
use axum::response::{AppendHeaders, IntoResponse, Json as AxumJson, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router, extract::State};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::{Value, json};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::routes::ErrorResponse;
use crate::server::AppState;
use crate::session::SESSION_COOKIE;
use crate::session::models::LoginRequest;

pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, (StatusCode, AxumJson<ErrorResponse>)> {
    let user = match app_state
        .broker
        .authorize(&payload.email, &payload.password)
        .await
    {
        Some(user) => user,
        None => {
            // Bad credentials and unreachable upstream are indistinguishable here
            return Err((
                StatusCode::UNAUTHORIZED,
                AxumJson(ErrorResponse {
                    error: "Invalid email or password".to_string(),
                }),
            ));
        }
    };

    let token = app_state.session_tokens.issue(&user).map_err(|e| {
        tracing::error!("Failed to issue session token: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            AxumJson(ErrorResponse {
                error: "Unable to sign in".to_string(),
            }),
        )
    })?;

    let expires_at = app_state
        .session_tokens
        .verify(&token)
        .map(|data| data.claims.exp)
        .unwrap_or_default();

    let mut cookie = Cookie::new(SESSION_COOKIE, token.clone());
    cookie.set_http_only(true);
    cookie.set_secure(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_path("/");
    // Cookie expiry matches the session token expiry
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default();
    let max_age = expires_at - now;
    if max_age > 0 {
        cookie.set_max_age(time::Duration::seconds(max_age));
    }

    tracing::info!("Signed in {}", user.email);

    let body = json!({
        "user": user,
        "expiresAt": expires_at,
    });
    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::SET_COOKIE, cookie.to_string())
        .header(header::CONTENT_TYPE, "application/json")
        .body(serde_json::to_string(&body).unwrap())
        .unwrap();
    Ok(response)
}

/// Expire the session cookie and send the user back to the login page.
pub async fn logout() -> impl IntoResponse {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_http_only(true);
    cookie.set_secure(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_path("/");
    cookie.set_max_age(time::Duration::ZERO);

    (
        AppendHeaders([(header::SET_COOKIE, cookie.to_string())]),
        Redirect::to("/login"),
    )
}

/// Return the current identity bundle if the session cookie is valid.
pub async fn me(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> (StatusCode, AxumJson<Value>) {
    let token = match jar.get(SESSION_COOKIE) {
        Some(cookie) => cookie.value().to_string(),
        None => {
            return (
                StatusCode::UNAUTHORIZED,
                AxumJson(json!({ "error": "Not signed in" })),
            );
        }
    };

    match app_state.session_tokens.decode_user(&token) {
        Ok(user) => (StatusCode::OK, AxumJson(json!({ "user": user }))),
        Err(e) => {
            tracing::warn!("Session cookie rejected: {:?}", e);
            (
                StatusCode::UNAUTHORIZED,
                AxumJson(json!({ "error": "Not signed in" })),
            )
        }
    }
}

/// Login page contract. Already-authenticated visitors are sent straight
/// to the dashboard; rendering the form itself is the client's concern.
pub async fn login_page(State(app_state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if app_state.session_tokens.decode_user(cookie.value()).is_ok() {
            return Redirect::to("/dashboard").into_response();
        }
    }

    AxumJson(json!({
        "page": "login",
        "title": "Sign in to your account",
        "form": {
            "action": "/api/auth/login",
            "method": "POST",
            "fields": ["email", "password"],
        },
    }))
    .into_response()
}

pub fn create_auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
}
