use serde_json::json;

use crate::record::{Collection, FieldKind, Schema};

pub const SCHEMA: Schema = Schema {
    searchable: &["title", "subtitle", "category"],
    fields: &[
        ("id", FieldKind::Text),
        ("title", FieldKind::Text),
        ("subtitle", FieldKind::Text),
        ("category", FieldKind::Text),
        ("discount", FieldKind::Number),
        ("validUntil", FieldKind::Date),
    ],
};

pub fn promotions() -> Collection {
    Collection::from_json(
        "promotions",
        SCHEMA,
        json!([
            promotion("1", "周末特惠", "酒店立减100", "立即预订", "#FF6B6B", "2024-12-31", "100", "hotel"),
            promotion("2", "机票优惠", "国际航线8折起", "查看详情", "#4ECDC4", "2024-11-30", "20%", "flight"),
            promotion("3", "自由行套餐", "3天2晚特价", "马上抢购", "#FFE66D", "2024-10-31", "500", "package"),
            promotion("4", "会员专享", "额外9折优惠", "成为会员", "#667eea", "2024-12-31", "10%", "membership"),
            promotion("5", "新用户福利", "首单立减200", "新人专享", "#FA8072", "2024-12-31", "200", "newuser"),
            promotion("6", "限时抢购", "邮轮特价游", "限量抢购", "#32CD32", "2024-09-30", "1000", "cruise"),
        ]),
    )
}

#[allow(clippy::too_many_arguments)]
fn promotion(
    id: &str,
    title: &str,
    subtitle: &str,
    button_text: &str,
    background_color: &str,
    valid_until: &str,
    discount: &str,
    category: &str,
) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "subtitle": subtitle,
        "buttonText": button_text,
        "backgroundColor": background_color,
        "validUntil": valid_until,
        "discount": discount,
        "category": category
    })
}
