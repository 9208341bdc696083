//! Session Models
//!
//! Data structures for the identity bundle carried by the session cookie.

use serde::{Deserialize, Serialize};

/// Company attached to an authenticated user, when the Authentication API
/// reports one. Upstream ids are normalized to strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
}

/// Identity bundle established by the Session Broker on successful login.
///
/// `access_token` is the opaque bearer credential attached to every
/// downstream Order Directory API call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
    pub access_token: String,
}

/// Session recovered from the cookie on an authenticated request.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub user: SessionUser,
}

impl CurrentSession {
    pub fn access_token(&self) -> &str {
        &self.user.access_token
    }
}

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
