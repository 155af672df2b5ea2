//! Random content feed, regenerated on every start unless seeded.
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::{Rng, seq::SliceRandom};
use serde_json::{Value, json};

use crate::record::{Collection, FieldKind, Schema};

pub const SCHEMA: Schema = Schema {
    searchable: &["title", "subtitle", "destination", "description", "tags"],
    fields: &[
        ("id", FieldKind::Text),
        ("title", FieldKind::Text),
        ("subtitle", FieldKind::Text),
        ("type", FieldKind::Text),
        ("destination", FieldKind::Text),
        ("rating", FieldKind::Number),
        ("price", FieldKind::Number),
        ("tags", FieldKind::Text),
        ("publishDate", FieldKind::Date),
        ("views", FieldKind::Number),
        ("likes", FieldKind::Number),
    ],
};

pub const CONTENT_TYPES: [&str; 5] = ["destination", "hotel", "experience", "food", "culture"];

pub const DESTINATIONS: [&str; 10] = [
    "巴厘岛", "马尔代夫", "普吉岛", "长白山", "九寨沟", "张家界", "厦门", "三亚", "青岛", "大理",
];

const MAX_AGE_MILLIS: i64 = 30 * 24 * 60 * 60 * 1000;

pub fn generate<R: Rng>(rng: &mut R, count: usize, now: DateTime<Utc>) -> Collection {
    let mut entries: Vec<(DateTime<Utc>, Value)> = (1..=count)
        .map(|id| {
            let published = now - Duration::milliseconds(rng.gen_range(0..MAX_AGE_MILLIS));
            (published, entry(rng, id, published))
        })
        .collect();

    // newest first
    entries.sort_by(|(a, _), (b, _)| b.cmp(a));

    let records = entries.into_iter().map(|(_, entry)| entry).collect();
    Collection::from_json("content", SCHEMA, Value::Array(records))
}

fn entry<R: Rng>(rng: &mut R, id: usize, published: DateTime<Utc>) -> Value {
    let kind = CONTENT_TYPES.choose(rng).copied().unwrap_or("destination");
    let destination = DESTINATIONS.choose(rng).copied().unwrap_or("三亚");
    let rating = 4.0 + f64::from(rng.gen_range(0..=10u8)) / 10.0;

    json!({
        "id": id.to_string(),
        "title": format!("{destination}{}推荐", type_title(kind)),
        "subtitle": subtitle(kind, destination),
        "imageUrl": format!("https://images.unsplash.com/photo-{}?w=400&h=300&fit=crop", 1_500_000_000_000u64 + id as u64),
        "type": kind,
        "destination": destination,
        "rating": format!("{rating:.1}"),
        "price": rng.gen_range(500..5500),
        "tags": tags(rng, kind),
        "description": format!("探索{destination}的美丽景色，享受独特的{}体验。", type_title(kind)),
        "publishDate": published.to_rfc3339_opts(SecondsFormat::Millis, true),
        "views": rng.gen_range(100..10100),
        "likes": rng.gen_range(10..1010)
    })
}

pub fn type_title(kind: &str) -> &'static str {
    match kind {
        "destination" => "景点",
        "hotel" => "酒店",
        "experience" => "体验",
        "food" => "美食",
        "culture" => "文化",
        _ => "推荐",
    }
}

fn subtitle(kind: &str, destination: &str) -> String {
    match kind {
        "destination" => format!("{destination}必去景点指南"),
        "hotel" => format!("{destination}精选酒店住宿"),
        "experience" => format!("{destination}独特体验活动"),
        "food" => format!("{destination}地道美食推荐"),
        "culture" => format!("{destination}文化深度游"),
        _ => format!("{destination}旅游推荐"),
    }
}

fn tags<R: Rng>(rng: &mut R, kind: &str) -> Vec<&'static str> {
    let options: &[&'static str] = match kind {
        "destination" => &["自然风光", "人文景观", "网红打卡", "亲子游"],
        "hotel" => &["豪华酒店", "性价比", "海景房", "度假村"],
        "experience" => &["户外运动", "文化体验", "美食之旅", "购物天堂"],
        "food" => &["当地特色", "米其林", "街头小吃", "海鲜大餐"],
        "culture" => &["历史古迹", "传统文化", "艺术展览", "节庆活动"],
        _ => &["推荐"],
    };

    let count = rng.gen_range(1..=3).min(options.len());
    options[..count].to_vec()
}
