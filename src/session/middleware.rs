//! Session Reader Middleware
//!
//! Axum middleware that recovers the session from the signed cookie and
//! injects it into request extensions. Decoding is purely local: the reader
//! never calls the network, it only trusts the signed payload.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{Redirect, Response},
};
use std::sync::Arc;

use crate::session::SESSION_COOKIE;
use crate::session::models::CurrentSession;
use crate::session::token::SessionTokenService;

pub struct SessionMiddleware;

impl SessionMiddleware {
    /// Middleware for server-rendered pages: unauthenticated requests are
    /// redirected to the login route.
    pub async fn require_session(
        State(tokens): State<Arc<SessionTokenService>>,
        mut req: Request,
        next: Next,
    ) -> Result<Response, Redirect> {
        match session_from_request(&tokens, &req) {
            Some(session) => {
                req.extensions_mut().insert(session);
                Ok(next.run(req).await)
            }
            None => Err(Redirect::to("/login")),
        }
    }

    /// Optional variant for client-initiated actions: attaches the session
    /// when the cookie is valid, never rejects the request.
    pub async fn attach_session(
        State(tokens): State<Arc<SessionTokenService>>,
        mut req: Request,
        next: Next,
    ) -> Response {
        if let Some(session) = session_from_request(&tokens, &req) {
            req.extensions_mut().insert(session);
        }

        next.run(req).await
    }
}

fn session_from_request(tokens: &SessionTokenService, req: &Request) -> Option<CurrentSession> {
    let token = req
        .headers()
        .get(header::COOKIE)
        .and_then(|cookie_header| cookie_header.to_str().ok())
        .and_then(|cookie_str| {
            for cookie in cookie_str.split(';') {
                let cookie = cookie.trim();
                if let Some(rest) = cookie.strip_prefix(SESSION_COOKIE) {
                    if let Some(value) = rest.strip_prefix('=') {
                        return Some(value.to_string());
                    }
                }
            }
            None
        })?;

    match tokens.decode_user(&token) {
        Ok(user) => Some(CurrentSession { user }),
        Err(e) => {
            tracing::warn!("Rejected session cookie: {:?}", e);
            None
        }
    }
}
