use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    response::Response,
    routing::{get, post},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::{
    auth::AuthUser,
    error::AppError,
    state::AppState,
    user::ProfileUpdate,
    utils::found,
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/profile", get(profile_handler).put(update_profile_handler))
        .route("/stats", get(stats_handler))
        .route("/avatar", post(avatar_handler))
}

pub async fn profile_handler(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Response, AppError> {
    let accounts = state.accounts.read().await;
    let account = accounts
        .iter()
        .find(|account| account.id == claims.id)
        .ok_or(AppError::NotFound("User"))?;

    Ok(found("User profile retrieved successfully", account))
}

pub async fn update_profile_handler(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    update: Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(update) = update?;
    let mut accounts = state.accounts.write().await;
    let account = accounts
        .iter_mut()
        .find(|account| account.id == claims.id)
        .ok_or(AppError::NotFound("User"))?;

    account.apply(update);

    Ok(found("User profile updated successfully", &*account))
}

pub async fn stats_handler(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Response, AppError> {
    let accounts = state.accounts.read().await;
    let account = accounts
        .iter()
        .find(|account| account.id == claims.id)
        .ok_or(AppError::NotFound("User"))?;

    Ok(found("User statistics retrieved successfully", account.stats(Utc::now())))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AvatarRequest {
    pub avatar: Option<String>,
}

pub async fn avatar_handler(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    payload: Result<Json<AvatarRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload?;
    let avatar = payload
        .avatar
        .filter(|avatar| !avatar.trim().is_empty())
        .ok_or(AppError::MissingFields("Avatar URL is required"))?;

    let mut accounts = state.accounts.write().await;
    let account = accounts
        .iter_mut()
        .find(|account| account.id == claims.id)
        .ok_or(AppError::NotFound("User"))?;

    account.avatar = avatar;

    Ok(found("Avatar updated successfully", json!({ "avatar": account.avatar })))
}
