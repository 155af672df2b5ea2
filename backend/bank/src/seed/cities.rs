use serde_json::json;

use crate::record::{Collection, FieldKind, Schema};

pub const SCHEMA: Schema = Schema {
    searchable: &["name", "pinyin", "code", "province", "description"],
    fields: &[
        ("id", FieldKind::Text),
        ("name", FieldKind::Text),
        ("code", FieldKind::Text),
        ("pinyin", FieldKind::Text),
        ("country", FieldKind::Text),
        ("province", FieldKind::Text),
        ("popular", FieldKind::Flag),
        ("timezone", FieldKind::Text),
        ("description", FieldKind::Text),
    ],
};

pub fn cities() -> Collection {
    Collection::from_json(
        "cities",
        SCHEMA,
        json!([
            city("1", "北京", "BJS", "beijing", "北京市", 39.9042, 116.4074, "中国首都，历史文化名城"),
            city("2", "上海", "SHA", "shanghai", "上海市", 31.2304, 121.4737, "国际大都市，金融中心"),
            city("3", "广州", "CAN", "guangzhou", "广东省", 23.1291, 113.2644, "千年商都，美食之城"),
            city("4", "深圳", "SZX", "shenzhen", "广东省", 22.5431, 114.0579, "创新之城，科技中心"),
            city("5", "杭州", "HGH", "hangzhou", "浙江省", 30.2741, 120.1551, "人间天堂，西湖美景"),
            city("6", "成都", "CTU", "chengdu", "四川省", 30.5728, 104.0668, "天府之国，美食天堂"),
            city("7", "西安", "XIY", "xian", "陕西省", 34.3416, 108.9398, "古都西安，丝路起点"),
            city("8", "重庆", "CKG", "chongqing", "重庆市", 29.5647, 106.5507, "山城重庆，火锅之都"),
        ]),
    )
}

#[allow(clippy::too_many_arguments)]
fn city(
    id: &str,
    name: &str,
    code: &str,
    pinyin: &str,
    province: &str,
    latitude: f64,
    longitude: f64,
    description: &str,
) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "code": code,
        "pinyin": pinyin,
        "country": "中国",
        "province": province,
        "popular": true,
        "timezone": "Asia/Shanghai",
        "coordinates": { "latitude": latitude, "longitude": longitude },
        "description": description
    })
}
