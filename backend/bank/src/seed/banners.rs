use serde_json::json;

use crate::record::{Collection, FieldKind, Schema};

pub const SCHEMA: Schema = Schema {
    searchable: &["title", "subtitle"],
    fields: &[
        ("id", FieldKind::Text),
        ("title", FieldKind::Text),
        ("subtitle", FieldKind::Text),
        ("link", FieldKind::Text),
    ],
};

pub fn banners() -> Collection {
    Collection::from_json(
        "banners",
        SCHEMA,
        json!([
            {
                "id": "1",
                "imageUrl": "https://images.unsplash.com/photo-1539650116574-75c0c6d73f6e?w=800&h=400&fit=crop",
                "title": "春季特惠 · 享受旅行",
                "subtitle": "全球酒店低至5折起",
                "link": "/promotions/spring"
            },
            {
                "id": "2",
                "imageUrl": "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=800&h=400&fit=crop",
                "title": "机票大促销",
                "subtitle": "国内航线最高立减500元",
                "link": "/flights/domestic"
            },
            {
                "id": "3",
                "imageUrl": "https://images.unsplash.com/photo-1507525428034-b723cf961d3e?w=800&h=400&fit=crop",
                "title": "海岛度假村",
                "subtitle": "马尔代夫豪华套餐7999起",
                "link": "/packages/maldives"
            },
            {
                "id": "4",
                "imageUrl": "https://images.unsplash.com/photo-1510414842594-a61c69b5ae57?w=800&h=400&fit=crop",
                "title": "亲子游推荐",
                "subtitle": "迪士尼乐园门票+酒店套餐",
                "link": "/family/disney"
            },
            {
                "id": "5",
                "imageUrl": "https://images.unsplash.com/photo-1469474968028-56623f02e42e?w=800&h=400&fit=crop",
                "title": "自由行特价",
                "subtitle": "东南亚自由行3天2晚1999起",
                "link": "/packages/southeast-asia"
            }
        ]),
    )
}
