//! Session Token Service
//!
//! Signs the identity bundle into the session cookie and recovers it on
//! later requests. The cookie is a JWT; nothing is stored server-side.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::models::{Company, SessionUser};

const ISSUER: &str = "managepetro-server";

/// Session lifetime. Expiry past this point is detected by signature
/// validation alone; there is no server-side session store to consult.
const SESSION_TTL_HOURS: i64 = 24;

/// Claims carried by the session cookie: the identity bundle verbatim,
/// plus standard token metadata.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// User identifier as reported by the Authentication API
    pub sub: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
    /// Bearer token for the Order Directory API
    pub access_token: String,
    /// Token issued at timestamp
    pub iat: i64,
    /// Token expiration timestamp
    pub exp: i64,
    /// Token issuer
    pub iss: String,
    /// Unique token id
    pub jti: Uuid,
}

impl From<Claims> for SessionUser {
    fn from(claims: Claims) -> Self {
        SessionUser {
            id: claims.sub,
            email: claims.email,
            name: claims.name,
            first_name: claims.first_name,
            last_name: claims.last_name,
            company: claims.company,
            access_token: claims.access_token,
        }
    }
}

/// Service for signing and verifying session tokens
#[derive(Clone)]
pub struct SessionTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionTokenService {
    /// Create a new token service with the provided signing secret
    pub fn new(secret: &str) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::default();
        validation.set_issuer(&[ISSUER]);

        Self {
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Sign the identity bundle into a session token
    pub fn issue(&self, user: &SessionUser) -> Result<String> {
        let now = Utc::now();
        let expiration = now + Duration::hours(SESSION_TTL_HOURS);

        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            company: user.company.clone(),
            access_token: user.access_token.clone(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            iss: ISSUER.to_string(),
            jti: Uuid::new_v4(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .context("Failed to encode session token")
    }

    /// Validate a session token and return its claims
    pub fn verify(&self, token: &str) -> Result<TokenData<Claims>> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .context("Failed to validate session token")
    }

    /// Decode a session token back into the identity bundle
    pub fn decode_user(&self, token: &str) -> Result<SessionUser> {
        let token_data = self.verify(token)?;
        Ok(token_data.claims.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> SessionUser {
        SessionUser {
            id: "1".to_string(),
            email: "a@b.com".to_string(),
            name: "A B".to_string(),
            first_name: Some("A".to_string()),
            last_name: Some("B".to_string()),
            company: Some(Company {
                id: "7".to_string(),
                name: "Acme Fuels".to_string(),
            }),
            access_token: "abc".to_string(),
        }
    }

    #[test]
    fn test_session_token_roundtrip() {
        let service = SessionTokenService::new("test_secret");
        let user = sample_user();

        let token = service.issue(&user).unwrap();
        let decoded = service.decode_user(&token).unwrap();

        // The bundle must survive the cookie verbatim
        assert_eq!(decoded, user);
    }

    #[test]
    fn test_issuer_is_validated() {
        let service = SessionTokenService::new("test_secret");
        let claims = service.verify(&service.issue(&sample_user()).unwrap()).unwrap();
        assert_eq!(claims.claims.iss, ISSUER);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let service = SessionTokenService::new("test_secret");
        let other = SessionTokenService::new("other_secret");

        let token = service.issue(&sample_user()).unwrap();
        assert!(other.decode_user(&token).is_err());
    }

    #[test]
    fn test_minimal_bundle_without_company() {
        let service = SessionTokenService::new("test_secret");
        let user = SessionUser {
            id: "a@b.com".to_string(),
            email: "a@b.com".to_string(),
            name: "a@b.com".to_string(),
            first_name: None,
            last_name: None,
            company: None,
            access_token: "tok".to_string(),
        };

        let decoded = service.decode_user(&service.issue(&user).unwrap()).unwrap();
        assert_eq!(decoded, user);
    }
}
