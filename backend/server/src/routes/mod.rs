use std::{collections::HashMap, sync::Arc};

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use bank::{Collection, QuerySpec, execute};
use serde_json::json;

use crate::{
    error::AppError,
    state::AppState,
    utils::{Listing, found, listed, timestamp},
};

pub mod auth;
pub mod banners;
pub mod cities;
pub mod content;
pub mod promotions;
pub mod search;
pub mod services;
pub mod user;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .nest("/api/banners", banners::router())
        .nest("/api/services", services::router())
        .nest("/api/promotions", promotions::router())
        .nest("/api/content", content::router())
        .nest("/api/cities", cities::router())
        .nest("/api/search", search::router())
        .nest("/api/auth", auth::router())
        .nest("/api/user", user::router())
        .fallback(not_found_handler)
        .with_state(state)
}

pub async fn health_handler() -> impl IntoResponse {
    Json(json!({
        "status": "success",
        "message": "Server is running",
        "timestamp": timestamp(),
    }))
}

pub async fn not_found_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "status": "error", "message": "Route not found" })),
    )
}

/// Parses `params` with the route defaults and runs them against `collection`.
pub(crate) fn list(
    collection: &Collection,
    listing: Listing,
    params: &HashMap<String, String>,
    message: impl Into<String>,
) -> Result<Response, AppError> {
    let spec = listing.spec(params)?;
    list_spec(collection, &spec, message)
}

pub(crate) fn list_spec(
    collection: &Collection,
    spec: &QuerySpec,
    message: impl Into<String>,
) -> Result<Response, AppError> {
    let page = execute(collection, spec)?;
    Ok(listed(message, page, spec))
}

pub(crate) fn find_by(
    collection: &Collection,
    field: &str,
    value: &str,
    what: &'static str,
) -> Result<Response, AppError> {
    let record = collection.find(field, value).ok_or(AppError::NotFound(what))?;

    Ok(found(format!("{what} retrieved successfully"), record))
}
