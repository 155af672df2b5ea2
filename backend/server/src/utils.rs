use std::collections::HashMap;

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use bank::{
    QueryError, QuerySpec, Record, ResultPage, SortOrder,
    query::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE},
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::json;

use crate::error::AppError;

pub const TEXT_KEYS: [&str; 2] = ["q", "search"];
pub const PAGE_SIZE_KEYS: [&str; 2] = ["limit", "pageSize"];

/// Query parameters with a fixed meaning. Everything else is a field filter.
const RESERVED: [&str; 7] = ["q", "search", "sortBy", "order", "page", "limit", "pageSize"];

/// Per-route defaults for turning a query string into a [`QuerySpec`].
#[derive(Debug, Clone, Copy)]
pub struct Listing {
    pub sort_by: Option<&'static str>,
    /// Public parameter or sort names mapped onto record fields.
    pub aliases: &'static [(&'static str, &'static str)],
}

impl Listing {
    pub const PLAIN: Listing = Listing {
        sort_by: None,
        aliases: &[],
    };

    pub const fn sorted_by(field: &'static str) -> Self {
        Self {
            sort_by: Some(field),
            aliases: &[],
        }
    }

    fn field<'a>(&self, name: &'a str) -> &'a str {
        self.aliases
            .iter()
            .find(|(public, _)| *public == name)
            .map_or(name, |(_, field)| *field)
    }

    pub fn spec(&self, params: &HashMap<String, String>) -> Result<QuerySpec, AppError> {
        let text_filter = TEXT_KEYS
            .iter()
            .filter_map(|key| params.get(*key))
            .find(|term| !term.trim().is_empty())
            .cloned();

        let sort_key = params
            .get("sortBy")
            .map(String::as_str)
            .filter(|key| !key.trim().is_empty())
            .or(self.sort_by)
            .map(|key| self.field(key).to_string());

        let sort_order = params
            .get("order")
            .and_then(|order| SortOrder::parse(order))
            .unwrap_or_default();

        let field_filters = params
            .iter()
            .filter(|(key, _)| !RESERVED.contains(&key.as_str()))
            .map(|(key, value)| (self.field(key).to_string(), value.clone()))
            .collect();

        Ok(QuerySpec {
            text_filter,
            field_filters,
            sort_key,
            sort_order,
            page: integer_param(params, &["page"], "page", DEFAULT_PAGE)?,
            page_size: integer_param(params, &PAGE_SIZE_KEYS, "pageSize", DEFAULT_PAGE_SIZE)?,
        })
    }
}

/// First present key wins. Missing means `default`, anything non-numeric is rejected.
pub fn integer_param(
    params: &HashMap<String, String>,
    keys: &[&str],
    field: &'static str,
    default: i64,
) -> Result<i64, AppError> {
    match keys.iter().find_map(|key| params.get(*key)) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| {
            AppError::from(QueryError::InvalidQuery {
                field,
                value: raw.clone(),
            })
        }),
    }
}

pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Pagination {
    page: i64,
    limit: i64,
    total_count: usize,
    total_pages: usize,
    has_next: bool,
    has_prev: bool,
}

#[derive(Serialize)]
struct Listed<'a> {
    status: &'static str,
    message: String,
    data: Vec<&'a Record>,
    total: usize,
    pagination: Pagination,
    filters: &'a QuerySpec,
    timestamp: String,
}

pub fn listed(message: impl Into<String>, page: ResultPage<'_>, spec: &QuerySpec) -> Response {
    let body = Listed {
        status: "success",
        message: message.into(),
        total: page.total_matched,
        pagination: Pagination {
            page: page.page,
            limit: page.page_size,
            total_count: page.total_matched,
            total_pages: page.total_pages,
            has_next: page.has_next,
            has_prev: page.has_prev,
        },
        data: page.items,
        filters: spec,
        timestamp: timestamp(),
    };

    Json(body).into_response()
}

pub fn found(message: impl Into<String>, data: impl Serialize) -> Response {
    Json(json!({
        "status": "success",
        "message": message.into(),
        "data": data,
        "timestamp": timestamp(),
    }))
    .into_response()
}

pub fn acknowledged(message: &str) -> Response {
    Json(json!({
        "status": "success",
        "message": message,
        "timestamp": timestamp(),
    }))
    .into_response()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let spec = Listing::PLAIN.spec(&params(&[])).unwrap();

        assert_eq!(spec, QuerySpec::default());
    }

    #[test]
    fn test_recognized_options() {
        let spec = Listing::sorted_by("publishDate")
            .spec(&params(&[
                ("search", "三亚"),
                ("order", "asc"),
                ("page", "2"),
                ("pageSize", "5"),
                ("type", "hotel"),
            ]))
            .unwrap();

        assert_eq!(spec.text_filter.as_deref(), Some("三亚"));
        assert_eq!(spec.sort_key.as_deref(), Some("publishDate"));
        assert_eq!(spec.sort_order, SortOrder::Asc);
        assert_eq!(spec.page, 2);
        assert_eq!(spec.page_size, 5);
        assert_eq!(
            spec.field_filters,
            BTreeMap::from([("type".to_string(), "hotel".to_string())])
        );
    }

    #[test]
    fn test_aliases_apply_to_filters_and_sort() {
        let listing = Listing {
            sort_by: Some("rating"),
            aliases: &[("city", "districtname"), ("name", "word")],
        };
        let spec = listing
            .spec(&params(&[("city", "北京"), ("sortBy", "name")]))
            .unwrap();

        assert_eq!(spec.sort_key.as_deref(), Some("word"));
        assert!(spec.field_filters.contains_key("districtname"));
    }

    #[test]
    fn test_unknown_order_falls_back_to_desc() {
        let spec = Listing::PLAIN.spec(&params(&[("order", "up")])).unwrap();

        assert_eq!(spec.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_non_numeric_page_is_invalid() {
        let error = Listing::PLAIN.spec(&params(&[("page", "two")])).unwrap_err();

        assert!(matches!(
            error,
            AppError::InvalidQuery(QueryError::InvalidQuery { field: "page", .. })
        ));
    }

    #[test]
    fn test_non_positive_values_pass_through_to_the_engine() {
        let spec = Listing::PLAIN.spec(&params(&[("limit", "0"), ("page", "-1")])).unwrap();

        assert_eq!(spec.page, -1);
        assert_eq!(spec.page_size, 0);
    }
}
