//! # Query Engine
//!
//! Every listing endpoint runs through [`execute`]: text filter, then field
//! filters, then a stable sort, then a page cut.
//!
//! ## Filtering
//! - Text filter: case-insensitive substring over the collection's searchable
//!   fields. Any single field matching is enough.
//! - Field filters: case-insensitive equality on declared fields, both sides
//!   trimmed. Array fields match when any element is equal.
//! - Filters naming a field the schema does not declare are ignored instead of
//!   emptying the result.
//!
//! ## Sorting
//! Driven by the declared [`FieldKind`]. Text uses CLDR root collation, so
//! `apple < Apple < éclair < zebra`. Unparseable numbers and dates sort as
//! the lowest value. Descending flips the comparator only, so equal keys keep
//! their collection order either way.
//!
//! ## Pagination
//! Pages are 1-based. A page past the end is empty with correct metadata, never
//! an error. Only a non-positive `page` or `page_size` is rejected.
use std::{borrow::Cow, cmp::Ordering, collections::BTreeMap};

use chrono::{DateTime, NaiveDate, Utc};
use icu_collator::{Collator, CollatorOptions};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::record::{Collection, FieldKind, Record, Schema};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid query: {field} must be a positive integer, got {value}")]
    InvalidQuery { field: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuerySpec {
    pub text_filter: Option<String>,
    pub field_filters: BTreeMap<String, String>,
    pub sort_key: Option<String>,
    pub sort_order: SortOrder,
    pub page: i64,
    pub page_size: i64,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            text_filter: None,
            field_filters: BTreeMap::new(),
            sort_key: None,
            sort_order: SortOrder::default(),
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QuerySpec {
    pub fn text(mut self, term: impl Into<String>) -> Self {
        self.text_filter = Some(term.into());
        self
    }

    pub fn filter(mut self, field: impl Into<String>, expected: impl Into<String>) -> Self {
        self.field_filters.insert(field.into(), expected.into());
        self
    }

    pub fn sort(mut self, key: impl Into<String>, order: SortOrder) -> Self {
        self.sort_key = Some(key.into());
        self.sort_order = order;
        self
    }

    pub fn paged(mut self, page: i64, page_size: i64) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPage<'a> {
    pub items: Vec<&'a Record>,
    pub total_matched: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
    pub page: i64,
    pub page_size: i64,
}

pub fn execute<'a>(collection: &'a Collection, spec: &QuerySpec) -> Result<ResultPage<'a>, QueryError> {
    let page = positive("page", spec.page)?;
    let page_size = positive("pageSize", spec.page_size)?;

    let schema = collection.schema();
    let term = spec
        .text_filter
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase);

    // (field, trimmed and lowercased expected value), restricted to declared fields
    let filters: Vec<(&str, String)> = spec
        .field_filters
        .iter()
        .map(|(field, expected)| (field.as_str(), expected.trim()))
        .filter(|(field, expected)| schema.declares(field) && !expected.is_empty())
        .map(|(field, expected)| (field, expected.to_lowercase()))
        .collect();

    let mut matched: Vec<&Record> = collection
        .records()
        .iter()
        .filter(|record| term.as_deref().is_none_or(|term| matches_text(schema, record, term)))
        .filter(|record| {
            filters
                .iter()
                .all(|(field, expected)| record.get(*field).is_some_and(|value| equals(value, expected)))
        })
        .collect();

    if let Some((key, kind)) = spec
        .sort_key
        .as_deref()
        .and_then(|key| schema.kind(key).map(|kind| (key, kind)))
    {
        let collator = (kind == FieldKind::Text).then(text_collator).flatten();

        matched.sort_by(|a, b| {
            let ordering = compare(kind, collator.as_ref(), a.get(key), b.get(key));
            match spec.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }

    let total_matched = matched.len();
    let total_pages = total_matched.div_ceil(page_size);
    let start = (page - 1).saturating_mul(page_size);

    let items = matched.into_iter().skip(start).take(page_size).collect();

    Ok(ResultPage {
        items,
        total_matched,
        total_pages,
        has_next: page < total_pages,
        has_prev: page > 1,
        page: spec.page,
        page_size: spec.page_size,
    })
}

fn positive(field: &'static str, value: i64) -> Result<usize, QueryError> {
    if value <= 0 {
        return Err(QueryError::InvalidQuery {
            field,
            value: value.to_string(),
        });
    }

    Ok(usize::try_from(value).unwrap_or(usize::MAX))
}

fn matches_text(schema: &Schema, record: &Record, term: &str) -> bool {
    schema
        .searchable
        .iter()
        .filter_map(|field| record.get(*field))
        .any(|value| contains(value, term))
}

fn contains(value: &Value, term: &str) -> bool {
    match value {
        Value::Array(items) => items.iter().any(|item| contains(item, term)),
        other => scalar_text(other).is_some_and(|text| text.to_lowercase().contains(term)),
    }
}

fn equals(value: &Value, expected: &str) -> bool {
    match value {
        Value::Array(items) => items.iter().any(|item| equals(item, expected)),
        other => scalar_text(other).is_some_and(|text| text.trim().to_lowercase() == expected),
    }
}

fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(text) => Some(Cow::Borrowed(text)),
        Value::Number(number) => Some(Cow::Owned(number.to_string())),
        Value::Bool(flag) => Some(Cow::Owned(flag.to_string())),
        _ => None,
    }
}

fn compare(kind: FieldKind, collator: Option<&Collator>, a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match kind {
        FieldKind::Number => compare_numbers(a.and_then(parse_number), b.and_then(parse_number)),
        FieldKind::Date => a.and_then(parse_instant).cmp(&b.and_then(parse_instant)),
        FieldKind::Text => compare_text(collator, a.and_then(scalar_text), b.and_then(scalar_text)),
        FieldKind::Flag => a.and_then(Value::as_bool).cmp(&b.and_then(Value::as_bool)),
    }
}

// None sorts below every parsed number
fn compare_numbers(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
    }
}

/// CLDR root collation from the baked data. `None` only if that data fails to load.
fn text_collator() -> Option<Collator> {
    Collator::try_new(&Default::default(), CollatorOptions::new()).ok()
}

// Missing text sorts lowest. Code points break ties the collator calls equal.
fn compare_text(collator: Option<&Collator>, a: Option<Cow<'_, str>>, b: Option<Cow<'_, str>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match collator {
            Some(collator) => collator.compare(&a, &b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        }
        .then_with(|| a.cmp(&b)),
        (a, b) => a.is_some().cmp(&b.is_some()),
    }
}

/// Reads a number out of a JSON number or a string such as `"4.5"` or `"¥580起"`.
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<f64>()
                .ok()
                .filter(|number| number.is_finite())
                .or_else(|| leading_number(text))
        }
        _ => None,
    }
}

fn leading_number(text: &str) -> Option<f64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];
    let end = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(rest.len());

    rest[..end].trim_end_matches('.').parse().ok()
}

/// RFC 3339 instants and plain `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_instant(value: &Value) -> Option<DateTime<Utc>> {
    let text = value.as_str()?.trim();

    DateTime::parse_from_rfc3339(text)
        .map(|instant| instant.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    const SCHEMA: Schema = Schema {
        searchable: &["word", "district", "tags"],
        fields: &[
            ("id", FieldKind::Text),
            ("word", FieldKind::Text),
            ("type", FieldKind::Text),
            ("district", FieldKind::Text),
            ("rating", FieldKind::Number),
            ("price", FieldKind::Number),
            ("published", FieldKind::Date),
            ("popular", FieldKind::Flag),
            ("tags", FieldKind::Text),
        ],
    };

    fn collection(value: Value) -> Collection {
        Collection::from_json("test", SCHEMA, value)
    }

    fn numbered(count: usize) -> Collection {
        let records: Vec<Value> = (0..count)
            .map(|i| json!({ "id": i.to_string(), "word": format!("item {i}"), "rating": i % 5 }))
            .collect();

        collection(Value::Array(records))
    }

    fn ids(page: &ResultPage<'_>) -> Vec<String> {
        page.items
            .iter()
            .map(|record| record["id"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_empty_spec_matches_everything() {
        let items = numbered(7);
        let page = execute(&items, &QuerySpec::default()).unwrap();

        assert_eq!(page.total_matched, 7);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.items.len(), 7);
        assert!(!page.has_next);
        assert!(!page.has_prev);
    }

    #[test]
    fn test_pagination_boundaries() {
        let items = numbered(23);

        let first = execute(&items, &QuerySpec::default().paged(1, 10)).unwrap();
        assert_eq!(first.total_pages, 3);
        assert!(first.has_next);
        assert!(!first.has_prev);

        let last = execute(&items, &QuerySpec::default().paged(3, 10)).unwrap();
        assert_eq!(last.items.len(), 3);
        assert_eq!(ids(&last), vec!["20", "21", "22"]);
        assert!(!last.has_next);
        assert!(last.has_prev);

        let past = execute(&items, &QuerySpec::default().paged(4, 10)).unwrap();
        assert!(past.items.is_empty());
        assert_eq!(past.total_matched, 23);
        assert_eq!(past.total_pages, 3);
        assert!(!past.has_next);
        assert!(past.has_prev);
    }

    #[test]
    fn test_rejects_non_positive_paging() {
        let items = numbered(3);

        assert_eq!(
            execute(&items, &QuerySpec::default().paged(1, 0)),
            Err(QueryError::InvalidQuery {
                field: "pageSize",
                value: "0".to_string()
            })
        );
        assert_eq!(
            execute(&items, &QuerySpec::default().paged(-1, 10)),
            Err(QueryError::InvalidQuery {
                field: "page",
                value: "-1".to_string()
            })
        );
    }

    #[test]
    fn test_empty_collection_is_not_an_error() {
        let items = collection(json!([]));
        let page = execute(&items, &QuerySpec::default().text("anything")).unwrap();

        assert_eq!(page.total_matched, 0);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next);
        assert!(!page.has_prev);
    }

    #[test]
    fn test_sorts_ratings_descending_with_stable_ties() {
        let items = collection(json!([
            { "id": "a", "rating": 4.1 },
            { "id": "b", "rating": 4.9 },
            { "id": "c", "rating": 4.1 },
            { "id": "d", "rating": 3.0 },
        ]));

        let page = execute(&items, &QuerySpec::default().sort("rating", SortOrder::Desc)).unwrap();

        assert_eq!(ids(&page), vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn test_equal_keys_keep_collection_order() {
        let items = collection(json!([
            { "id": "1", "type": "hotel" },
            { "id": "2", "type": "food" },
            { "id": "3", "type": "hotel" },
            { "id": "4", "type": "food" },
            { "id": "5", "type": "hotel" },
        ]));

        let asc = execute(&items, &QuerySpec::default().sort("type", SortOrder::Asc)).unwrap();
        assert_eq!(ids(&asc), vec!["2", "4", "1", "3", "5"]);

        let desc = execute(&items, &QuerySpec::default().sort("type", SortOrder::Desc)).unwrap();
        assert_eq!(ids(&desc), vec!["1", "3", "5", "2", "4"]);
    }

    #[test]
    fn test_unparseable_numbers_sort_lowest() {
        let items = collection(json!([
            { "id": "free", "price": "免费" },
            { "id": "range", "price": "¥200-400" },
            { "id": "plain", "price": 580 },
            { "id": "missing" },
            { "id": "text", "price": "60" },
        ]));

        let asc = execute(&items, &QuerySpec::default().sort("price", SortOrder::Asc)).unwrap();
        assert_eq!(ids(&asc), vec!["free", "missing", "text", "range", "plain"]);

        let desc = execute(&items, &QuerySpec::default().sort("price", SortOrder::Desc)).unwrap();
        assert_eq!(ids(&desc), vec!["plain", "range", "text", "free", "missing"]);
    }

    #[test]
    fn test_invalid_dates_sort_earliest() {
        let items = collection(json!([
            { "id": "bad", "published": "yesterday" },
            { "id": "new", "published": "2024-06-01T10:00:00.000Z" },
            { "id": "day", "published": "2024-05-01" },
            { "id": "old", "published": "2023-01-01T00:00:00+08:00" },
        ]));

        let desc = execute(&items, &QuerySpec::default().sort("published", SortOrder::Desc)).unwrap();
        assert_eq!(ids(&desc), vec!["new", "day", "old", "bad"]);
    }

    #[test]
    fn test_text_sort_ignores_case() {
        let items = collection(json!([
            { "id": "1", "word": "beta" },
            { "id": "2", "word": "Alpha" },
            { "id": "3", "word": "alpha" },
            { "id": "4", "word": "Gamma" },
        ]));

        let asc = execute(&items, &QuerySpec::default().sort("word", SortOrder::Asc)).unwrap();
        assert_eq!(ids(&asc), vec!["3", "2", "1", "4"]);
    }

    #[test]
    fn test_text_sort_follows_collation() {
        let items = collection(json!([
            { "id": "z", "word": "zebra" },
            { "id": "e", "word": "éclair" },
            { "id": "a", "word": "apple" },
            { "id": "A", "word": "Apple" },
            { "id": "-" },
        ]));

        let asc = execute(&items, &QuerySpec::default().sort("word", SortOrder::Asc)).unwrap();
        assert_eq!(ids(&asc), vec!["-", "a", "A", "e", "z"]);

        let desc = execute(&items, &QuerySpec::default().sort("word", SortOrder::Desc)).unwrap();
        assert_eq!(ids(&desc), vec!["z", "e", "A", "a", "-"]);
    }

    #[test]
    fn test_flag_sort() {
        let items = collection(json!([
            { "id": "1", "popular": true },
            { "id": "2", "popular": false },
            { "id": "3" },
        ]));

        let asc = execute(&items, &QuerySpec::default().sort("popular", SortOrder::Asc)).unwrap();
        assert_eq!(ids(&asc), vec!["3", "2", "1"]);
    }

    #[test]
    fn test_unknown_sort_key_keeps_order() {
        let items = numbered(4);
        let page = execute(&items, &QuerySpec::default().sort("nonsense", SortOrder::Asc)).unwrap();

        assert_eq!(ids(&page), vec!["0", "1", "2", "3"]);
    }

    #[test]
    fn test_text_filter_matches_substring() {
        let items = collection(json!([
            { "id": "1", "word": "故宫博物院", "district": "北京" },
            { "id": "2", "word": "天安门广场", "district": "北京" },
        ]));

        let page = execute(&items, &QuerySpec::default().text("故宫")).unwrap();
        assert_eq!(page.total_matched, 1);
        assert_eq!(ids(&page), vec!["1"]);

        let both = execute(&items, &QuerySpec::default().text("北京")).unwrap();
        assert_eq!(both.total_matched, 2);
    }

    #[test]
    fn test_text_filter_is_case_insensitive_and_searches_arrays() {
        let items = collection(json!([
            { "id": "1", "word": "Beijing Hotel" },
            { "id": "2", "word": "Shanghai", "tags": ["Night Market", "food"] },
            { "id": "3", "word": "Chengdu", "type": "beijing" },
        ]));

        assert_eq!(ids(&execute(&items, &QuerySpec::default().text("BEIJ")).unwrap()), vec!["1"]);
        assert_eq!(ids(&execute(&items, &QuerySpec::default().text("market")).unwrap()), vec!["2"]);
    }

    #[test]
    fn test_blank_text_filter_is_noop() {
        let items = numbered(5);
        let page = execute(&items, &QuerySpec::default().text("   ")).unwrap();

        assert_eq!(page.total_matched, 5);
    }

    #[test]
    fn test_field_filters() {
        let items = collection(json!([
            { "id": "1", "type": "Hotel", "popular": true, "rating": 4.5, "tags": ["sea", "luxury"] },
            { "id": "2", "type": "food", "popular": false, "rating": 4 },
            { "id": "3", "type": "hotel", "popular": true },
            { "id": "4", "popular": true },
        ]));

        let hotels = execute(&items, &QuerySpec::default().filter("type", "HOTEL")).unwrap();
        assert_eq!(ids(&hotels), vec!["1", "3"]);

        let popular = execute(&items, &QuerySpec::default().filter("popular", "true")).unwrap();
        assert_eq!(ids(&popular), vec!["1", "3", "4"]);

        let rated = execute(&items, &QuerySpec::default().filter("rating", "4.5")).unwrap();
        assert_eq!(ids(&rated), vec!["1"]);

        let tagged = execute(&items, &QuerySpec::default().filter("tags", "Luxury")).unwrap();
        assert_eq!(ids(&tagged), vec!["1"]);

        let combined = execute(
            &items,
            &QuerySpec::default().filter("type", "hotel").filter("popular", "false"),
        )
        .unwrap();
        assert!(combined.items.is_empty());
    }

    #[test]
    fn test_unknown_or_empty_field_filter_is_noop() {
        let items = numbered(6);

        let unknown = execute(&items, &QuerySpec::default().filter("colour", "red")).unwrap();
        assert_eq!(unknown.total_matched, 6);

        let empty = execute(&items, &QuerySpec::default().filter("type", "")).unwrap();
        assert_eq!(empty.total_matched, 6);

        let blank = execute(&items, &QuerySpec::default().filter("type", "   ")).unwrap();
        assert_eq!(blank.total_matched, 6);
    }

    #[test]
    fn test_field_filters_trim_both_sides() {
        let items = collection(json!([
            { "id": "1", "district": " 北京 " },
            { "id": "2", "district": "上海" },
        ]));

        let page = execute(&items, &QuerySpec::default().filter("district", "  北京")).unwrap();
        assert_eq!(ids(&page), vec!["1"]);
    }

    #[test]
    fn test_filters_then_sorts_then_pages() {
        let items = collection(json!([
            { "id": "1", "type": "hotel", "rating": 4.0 },
            { "id": "2", "type": "food", "rating": 5.0 },
            { "id": "3", "type": "hotel", "rating": 4.8 },
            { "id": "4", "type": "hotel", "rating": 4.4 },
        ]));

        let spec = QuerySpec::default()
            .filter("type", "hotel")
            .sort("rating", SortOrder::Desc)
            .paged(2, 2);
        let page = execute(&items, &spec).unwrap();

        assert_eq!(page.total_matched, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(ids(&page), vec!["1"]);
    }

    #[test]
    fn test_source_collection_is_untouched() {
        let items = collection(json!([
            { "id": "1", "rating": 1 },
            { "id": "2", "rating": 3 },
            { "id": "3", "rating": 2 },
        ]));
        let before = items.records().to_vec();

        execute(&items, &QuerySpec::default().sort("rating", SortOrder::Desc)).unwrap();

        assert_eq!(items.records(), before.as_slice());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(&json!("4.5")), Some(4.5));
        assert_eq!(parse_number(&json!("¥1200起")), Some(1200.0));
        assert_eq!(parse_number(&json!("20%")), Some(20.0));
        assert_eq!(parse_number(&json!("NaN")), None);
        assert_eq!(parse_number(&json!("实时计价")), None);
        assert_eq!(parse_number(&json!(true)), None);
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!(SortOrder::parse("ASC"), Some(SortOrder::Asc));
        assert_eq!(SortOrder::parse(" desc "), Some(SortOrder::Desc));
        assert_eq!(SortOrder::parse("sideways"), None);
    }

    proptest! {
        #[test]
        fn prop_pages_cover_every_match_once(count in 0usize..60, page_size in 1i64..15, rating in 0u64..5) {
            let items = numbered(count);
            let spec = QuerySpec::default()
                .filter("rating", rating.to_string())
                .sort("word", SortOrder::Asc)
                .paged(1, page_size);
            let first = execute(&items, &spec).unwrap();

            let mut seen = Vec::new();
            for page in 1..=first.total_pages as i64 {
                let result = execute(&items, &spec.clone().paged(page, page_size)).unwrap();
                prop_assert!(result.items.len() as i64 <= page_size);
                seen.extend(ids(&result));
            }

            prop_assert_eq!(seen.len(), first.total_matched);
            seen.sort();
            seen.dedup();
            prop_assert_eq!(seen.len(), first.total_matched);
        }

        #[test]
        fn prop_execute_is_idempotent(count in 0usize..40, page in 1i64..6, page_size in 1i64..12, desc in any::<bool>()) {
            let items = numbered(count);
            let order = if desc { SortOrder::Desc } else { SortOrder::Asc };
            let spec = QuerySpec::default().text("item").sort("rating", order).paged(page, page_size);

            prop_assert_eq!(execute(&items, &spec).unwrap(), execute(&items, &spec).unwrap());
        }

        #[test]
        fn prop_no_filters_match_everything(count in 0usize..60) {
            let items = numbered(count);
            prop_assert_eq!(execute(&items, &QuerySpec::default()).unwrap().total_matched, count);
        }
    }
}
