use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    auth::{hash_password_blocking, issue_token, verify_password_blocking, verify_token},
    error::AppError,
    state::AppState,
    user::{Account, LoginRequest, RegisterPayload, RegisterRequest},
    utils::{acknowledged, found},
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", post(login_handler))
        .route("/register", post(register_handler))
        .route("/logout", post(logout_handler))
        .route("/refresh", post(refresh_handler))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Session<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<&'a Account>,
    token: String,
    token_type: &'static str,
    expires_in: String,
}

fn session<'a>(state: &AppState, account: Option<&'a Account>, token: String) -> Session<'a> {
    Session {
        user: account,
        token,
        token_type: "Bearer",
        expires_in: state.config.expires_in(),
    }
}

pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload?;
    let (Some(username), Some(password)) = (payload.username, payload.password) else {
        return Err(AppError::MissingFields("Username and password are required"));
    };

    let (id, password_hash) = {
        let accounts = state.accounts.read().await;
        let account = accounts
            .iter()
            .find(|account| account.answers_to(&username))
            .ok_or(AppError::InvalidCredentials)?;
        (account.id.clone(), account.password_hash.clone())
    };

    if !verify_password_blocking(password, password_hash).await? {
        return Err(AppError::InvalidCredentials);
    }

    let mut accounts = state.accounts.write().await;
    let account = accounts
        .iter_mut()
        .find(|account| account.id == id)
        .ok_or(AppError::InvalidCredentials)?;

    account.last_login = Some(Utc::now());
    let token = issue_token(&state.config, &account.id, &account.username, &account.email)?;
    info!(user = %account.username, "Login");

    Ok(found("Login successful", session(&state, Some(&*account), token)))
}

fn taken(accounts: &[Account], request: &RegisterRequest) -> bool {
    accounts
        .iter()
        .any(|account| account.collides_with(&request.username, &request.email, request.phone.as_deref()))
}

pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterPayload>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload?;
    let request = payload
        .validate()
        .ok_or(AppError::MissingFields("Username, password and email are required"))?;

    if taken(&state.accounts.read().await, &request) {
        return Err(AppError::Conflict);
    }

    let password_hash = hash_password_blocking(&state.config, request.password.clone()).await?;

    // Someone may have registered the same name while we were hashing
    let mut accounts = state.accounts.write().await;
    if taken(&accounts, &request) {
        return Err(AppError::Conflict);
    }

    let account = Account::register((accounts.len() + 1).to_string(), request, password_hash);
    let token = issue_token(&state.config, &account.id, &account.username, &account.email)?;
    info!(user = %account.username, id = %account.id, "Registered");

    let response = found("Registration successful", session(&state, Some(&account), token));
    accounts.push(account);

    Ok((StatusCode::CREATED, response).into_response())
}

pub async fn logout_handler() -> Response {
    acknowledged("Logout successful")
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RefreshRequest {
    pub token: Option<String>,
}

pub async fn refresh_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload?;
    let token = payload
        .token
        .filter(|token| !token.is_empty())
        .ok_or(AppError::MissingFields("Token is required"))?;

    let claims = verify_token(&state.config, &token)?;
    let token = issue_token(&state.config, &claims.id, &claims.username, &claims.email)?;

    Ok(found("Token refreshed successfully", session(&state, None, token)))
}
