use std::{collections::HashMap, sync::Arc};

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Response,
    routing::get,
};

use super::{find_by, list};
use crate::{error::AppError, state::AppState, utils::Listing};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_handler))
        .route("/{id}", get(get_handler))
}

pub async fn list_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    list(&state.bank.banners, Listing::PLAIN, &params, "Banners retrieved successfully")
}

pub async fn get_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    find_by(&state.bank.banners, "id", &id, "Banner")
}
