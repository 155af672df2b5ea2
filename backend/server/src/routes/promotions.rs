use std::{collections::HashMap, sync::Arc};

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Response,
    routing::get,
};

use super::{find_by, list, list_spec};
use crate::{error::AppError, state::AppState, utils::Listing};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_handler))
        .route("/{id}", get(get_handler))
        .route("/category/{category}", get(category_handler))
}

pub async fn list_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    list(&state.bank.promotions, Listing::PLAIN, &params, "Promotions retrieved successfully")
}

pub async fn get_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    find_by(&state.bank.promotions, "id", &id, "Promotion")
}

pub async fn category_handler(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let spec = Listing::PLAIN.spec(&params)?.filter("category", category.as_str());

    list_spec(
        &state.bank.promotions,
        &spec,
        format!("Promotions for category {category} retrieved successfully"),
    )
}
