use std::{collections::HashMap, sync::Arc};

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Response,
    routing::get,
};

use super::{list, list_spec};
use crate::{
    error::AppError,
    state::AppState,
    utils::{Listing, found},
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_handler))
        .route("/{id}", get(get_handler))
        .route("/search/{term}", get(search_handler))
        .route("/popular/list", get(popular_handler))
}

pub async fn list_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    list(&state.bank.cities, Listing::PLAIN, &params, "Cities retrieved successfully")
}

/// Accepts the numeric id or the airport code in any case.
pub async fn get_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let cities = &state.bank.cities;
    let city = cities
        .find("id", &id)
        .or_else(|| cities.find("code", &id.to_uppercase()))
        .ok_or(AppError::NotFound("City"))?;

    Ok(found("City retrieved successfully", city))
}

pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    Path(term): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let spec = Listing::PLAIN.spec(&params)?.text(term.as_str());

    list_spec(&state.bank.cities, &spec, format!("Search results for \"{term}\""))
}

pub async fn popular_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let spec = Listing::PLAIN.spec(&params)?.filter("popular", "true");

    list_spec(&state.bank.cities, &spec, "Popular cities retrieved successfully")
}
