//! Session Management and JWT Tokens
//!
//! Two token kinds: short-lived access tokens attached as bearer headers,
//! and long-lived refresh tokens exchanged at `/api/auth/refresh`. The
//! `kind` claim keeps them apart so a refresh token can never authorize a
//! protected route.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Access tokens expire after 15 minutes
pub const ACCESS_TOKEN_TTL_SECS: u64 = 15 * 60;

/// Refresh tokens expire after 30 days
pub const REFRESH_TOKEN_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Token kind discriminator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Identity subject id
    pub sub: String,
    /// Email
    pub email: String,
    /// Display name, when known
    #[serde(default)]
    pub name: Option<String>,
    /// Access or refresh
    pub kind: TokenKind,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Get JWT secret from environment
fn get_jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|err| {
        tracing::warn!("Missing JWT_SECRET ({}); using development default", err);
        "mindmate-dev-secret-change-in-production".to_string()
    })
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn create_token(
    subject: &str,
    email: &str,
    name: Option<&str>,
    kind: TokenKind,
    ttl_secs: u64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = now_unix();
    let claims = Claims {
        sub: subject.to_string(),
        email: email.to_string(),
        name: name.map(|n| n.to_string()),
        kind,
        exp: now + ttl_secs,
        iat: now,
    };

    let secret = get_jwt_secret();
    let key = EncodingKey::from_secret(secret.as_ref());
    encode(&Header::default(), &claims, &key)
}

/// Create a short-lived access token for a subject
pub fn create_access_token(
    subject: &str,
    email: &str,
    name: Option<&str>,
) -> Result<String, jsonwebtoken::errors::Error> {
    create_token(subject, email, name, TokenKind::Access, ACCESS_TOKEN_TTL_SECS)
}

/// Create a long-lived refresh token for a subject
pub fn create_refresh_token(
    subject: &str,
    email: &str,
    name: Option<&str>,
) -> Result<String, jsonwebtoken::errors::Error> {
    create_token(subject, email, name, TokenKind::Refresh, REFRESH_TOKEN_TTL_SECS)
}

fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let secret = get_jwt_secret();
    let key = DecodingKey::from_secret(secret.as_ref());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &key, &validation)?;
    Ok(token_data.claims)
}

/// Verify an access token and return its claims
///
/// A refresh token presented here fails even when its signature is valid.
pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let claims = verify_token(token)?;
    if claims.kind != TokenKind::Access {
        return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
    }
    Ok(claims)
}

/// Verify a refresh token and return its claims
pub fn verify_refresh_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let claims = verify_token(token)?;
    if claims.kind != TokenKind::Refresh {
        return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
    }
    Ok(claims)
}
