use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use axum::{
    Json, Router,
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
};
use bank::{QueryError, seed::search::type_icon};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use super::list;
use crate::{
    error::AppError,
    state::AppState,
    utils::{Listing, TEXT_KEYS, found, integer_param, timestamp},
};

const SEARCH: Listing = Listing {
    sort_by: Some("rating"),
    aliases: &[("city", "districtname"), ("name", "word")],
};

const DEFAULT_SUGGESTIONS: i64 = 5;
const DEFAULT_HOT: i64 = 10;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(search_handler))
        .route("/suggestions", get(suggestions_handler))
        .route("/hot", get(hot_handler))
}

pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(mut params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    // "all" is the client's way of not filtering by type
    if params.get("type").is_some_and(|kind| kind.eq_ignore_ascii_case("all")) {
        params.remove("type");
    }

    debug!(?params, "Search");
    list(&state.bank.search, SEARCH, &params, "Search completed successfully")
}

#[derive(Debug, Serialize)]
struct Suggestion<'a> {
    text: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    icon: &'static str,
}

/// Distinct result names containing the query, in catalog order.
pub async fn suggestions_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let limit = positive_limit(&params, DEFAULT_SUGGESTIONS)?;

    let Some(term) = TEXT_KEYS
        .iter()
        .filter_map(|key| params.get(*key))
        .find(|term| !term.trim().is_empty())
        .map(|term| term.trim().to_lowercase())
    else {
        return Ok(Json(json!({
            "status": "success",
            "data": Value::Array(Vec::new()),
            "message": "No query provided",
            "timestamp": timestamp(),
        }))
        .into_response());
    };

    let mut seen = HashSet::new();
    let suggestions: Vec<Suggestion<'_>> = state
        .bank
        .search
        .records()
        .iter()
        .filter_map(|record| {
            let text = record.get("word")?.as_str()?;
            let kind = record.get("type").and_then(Value::as_str).unwrap_or_default();

            (text.to_lowercase().contains(&term) && seen.insert(text)).then(|| Suggestion {
                text,
                kind,
                icon: type_icon(kind),
            })
        })
        .take(limit)
        .collect();

    Ok(found("Suggestions retrieved successfully", suggestions))
}

pub async fn hot_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let limit = positive_limit(&params, DEFAULT_HOT)?;
    let hot: Vec<_> = state.bank.hot_searches.iter().take(limit).collect();

    Ok(found("Hot searches retrieved successfully", hot))
}

fn positive_limit(params: &HashMap<String, String>, default: i64) -> Result<usize, AppError> {
    let limit = integer_param(params, &["limit"], "limit", default)?;

    usize::try_from(limit)
        .ok()
        .filter(|limit| *limit > 0)
        .ok_or_else(|| {
            AppError::from(QueryError::InvalidQuery {
                field: "limit",
                value: limit.to_string(),
            })
        })
}
