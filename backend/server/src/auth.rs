//! # Tokens
//!
//! HS256 JWTs signed with `JWT_SECRET`, valid for `TOKEN_TTL_DAYS`. There is
//! no revocation list: logout is a client-side concern and refresh simply
//! re-signs the claims of a still valid token.
use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tokio::task::spawn_blocking;
use tracing::{debug, warn};

use crate::{config::Config, error::AppError, state::AppState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,
    pub username: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

pub fn issue_token(config: &Config, id: &str, username: &str, email: &str) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        id: id.to_string(),
        username: username.to_string(),
        email: email.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::days(config.token_ttl_days)).timestamp(),
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )?)
}

pub fn verify_token(config: &Config, token: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        debug!("Rejected token: {e}");
        AppError::Forbidden
    })
}

pub fn hash_password(config: &Config, password: &str) -> Result<String, AppError> {
    Ok(bcrypt::hash(password, config.bcrypt_cost)?)
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or_else(|e| {
        warn!("Stored password hash unreadable: {e}");
        false
    })
}

/// [`hash_password`] on the blocking pool. Never call it with a lock held.
pub async fn hash_password_blocking(config: &Config, password: String) -> Result<String, AppError> {
    let cost = config.bcrypt_cost;
    spawn_blocking(move || bcrypt::hash(password, cost)).await?.map_err(AppError::from)
}

pub async fn verify_password_blocking(password: String, hash: String) -> Result<bool, AppError> {
    Ok(spawn_blocking(move || verify_password(&password, &hash)).await?)
}

/// Claims of the `Authorization: Bearer <token>` header.
pub struct AuthUser(pub Claims);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split_whitespace().nth(1))
            .ok_or(AppError::Unauthorized)?;

        verify_token(&state.config, token).map(AuthUser)
    }
}
