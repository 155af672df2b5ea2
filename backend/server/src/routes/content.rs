use std::{collections::HashMap, sync::Arc};

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Response,
    routing::get,
};

use super::{find_by, list, list_spec};
use crate::{error::AppError, state::AppState, utils::Listing};

const FEED: Listing = Listing::sorted_by("publishDate");

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_handler))
        .route("/{id}", get(get_handler))
        .route("/type/{kind}", get(type_handler))
}

pub async fn list_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    list(&state.bank.content, FEED, &params, "Content retrieved successfully")
}

pub async fn get_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    find_by(&state.bank.content, "id", &id, "Content")
}

pub async fn type_handler(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let spec = FEED.spec(&params)?.filter("type", kind.as_str());

    list_spec(
        &state.bank.content,
        &spec,
        format!("Content for type {kind} retrieved successfully"),
    )
}
