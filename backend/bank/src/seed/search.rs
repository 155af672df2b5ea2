use serde::Serialize;
use serde_json::{Value, json};

use crate::record::{Collection, FieldKind, Schema};

pub const SCHEMA: Schema = Schema {
    searchable: &["word", "zonename", "districtname", "description"],
    fields: &[
        ("code", FieldKind::Text),
        ("word", FieldKind::Text),
        ("type", FieldKind::Text),
        ("price", FieldKind::Number),
        ("zonename", FieldKind::Text),
        ("star", FieldKind::Text),
        ("districtname", FieldKind::Text),
        ("rating", FieldKind::Number),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HotSearch {
    pub text: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub count: u32,
}

pub const HOT_SEARCHES: [HotSearch; 8] = [
    hot("北京酒店", "hotel", 1250),
    hot("故宫", "attraction", 980),
    hot("烤鸭", "food", 756),
    hot("上海迪士尼", "attraction", 654),
    hot("王府井", "shopping", 543),
    hot("小笼包", "food", 432),
    hot("外滩", "attraction", 321),
    hot("欢乐谷", "entertainment", 210),
];

const fn hot(text: &'static str, kind: &'static str, count: u32) -> HotSearch {
    HotSearch { text, kind, count }
}

pub fn type_icon(kind: &str) -> &'static str {
    match kind {
        "hotel" => "🏨",
        "attraction" => "🎯",
        "food" => "🍴",
        "shopping" => "🛍️",
        "entertainment" => "🎪",
        _ => "📍",
    }
}

pub fn search_results() -> Collection {
    Collection::from_json(
        "search",
        SCHEMA,
        json!([
            hit("hotel_385114", "北京千禧大酒店", "hotel", "¥580起", "国贸", Some("五星级"), "北京",
                "http://m.ctrip.com/webapp/hotel/hoteldetail/385114.html",
                "https://images.unsplash.com/photo-1566073771259-6a8506099945?w=300&h=200&fit=crop",
                "位于北京CBD核心区域，交通便利，设施豪华", 4.5),
            hit("hotel_123456", "北京王府井大饭店", "hotel", "¥420起", "王府井", Some("四星级"), "北京",
                "http://m.ctrip.com/webapp/hotel/hoteldetail/123456.html",
                "https://images.unsplash.com/photo-1551882547-ff40c63fe5fa?w=300&h=200&fit=crop",
                "王府井步行街核心位置，购物出行便利", 4.2),
            hit("hotel_789012", "上海外滩茂悦大酒店", "hotel", "¥1200起", "外滩", Some("五星级"), "上海",
                "http://m.ctrip.com/webapp/hotel/hoteldetail/789012.html",
                "https://images.unsplash.com/photo-1520250497591-112f2f40a3f4?w=300&h=200&fit=crop",
                "黄浦江畔豪华酒店，尽享外滩美景", 4.8),
            hit("attraction_001", "故宫博物院", "attraction", "¥60", "东城区", None, "北京",
                "http://m.ctrip.com/webapp/attraction/detail/001.html",
                "https://images.unsplash.com/photo-1508804185872-d7badad00f7d?w=300&h=200&fit=crop",
                "中国明清两代的皇家宫殿，世界文化遗产", 4.9),
            hit("attraction_002", "天安门广场", "attraction", "免费", "东城区", None, "北京",
                "http://m.ctrip.com/webapp/attraction/detail/002.html",
                "https://images.unsplash.com/photo-1545239705-1564e58b9e4e?w=300&h=200&fit=crop",
                "世界最大的城市广场之一，中国的象征", 4.7),
            hit("attraction_003", "上海迪士尼乐园", "attraction", "¥399起", "浦东新区", None, "上海",
                "http://m.ctrip.com/webapp/attraction/detail/003.html",
                "https://images.unsplash.com/photo-1613521721493-6c4bf2b3c825?w=300&h=200&fit=crop",
                "充满奇幻与冒险的神奇王国", 4.6),
            hit("food_001", "全聚德烤鸭店", "food", "¥200-400", "前门", None, "北京",
                "http://m.ctrip.com/webapp/food/detail/001.html",
                "https://images.unsplash.com/photo-1598515214211-89d3c73ae83b?w=300&h=200&fit=crop",
                "百年老字号，正宗北京烤鸭", 4.3),
            hit("food_002", "老北京炸酱面", "food", "¥30-60", "胡同", None, "北京",
                "http://m.ctrip.com/webapp/food/detail/002.html",
                "https://images.unsplash.com/photo-1612929633738-8fe44f7ec841?w=300&h=200&fit=crop",
                "地道北京风味面条，传统工艺制作", 4.1),
            hit("food_003", "小笼包", "food", "¥25-50", "豫园", None, "上海",
                "http://m.ctrip.com/webapp/food/detail/003.html",
                "https://images.unsplash.com/photo-1561651188-d207bbec2fab?w=300&h=200&fit=crop",
                "上海特色点心，皮薄汁多", 4.4),
            hit("shopping_001", "王府井大街", "shopping", "实时计价", "王府井", None, "北京",
                "http://m.ctrip.com/webapp/shopping/detail/001.html",
                "https://images.unsplash.com/photo-1441986300917-64674bd600d8?w=300&h=200&fit=crop",
                "北京最著名的商业街之一", 4.2),
            hit("shopping_002", "南京路步行街", "shopping", "实时计价", "黄浦区", None, "上海",
                "http://m.ctrip.com/webapp/shopping/detail/002.html",
                "https://images.unsplash.com/photo-1519832041-e64b7ba2cf9e?w=300&h=200&fit=crop",
                "中华商业第一街，购物天堂", 4.5),
            hit("entertainment_001", "北京欢乐谷", "entertainment", "¥299起", "朝阳区", None, "北京",
                "http://m.ctrip.com/webapp/entertainment/detail/001.html",
                "https://images.unsplash.com/photo-1594736797933-d0a9ba7a7e50?w=300&h=200&fit=crop",
                "大型主题公园，刺激好玩的游乐设施", 4.3),
            hit("entertainment_002", "上海海昌海洋公园", "entertainment", "¥399起", "浦东新区", None, "上海",
                "http://m.ctrip.com/webapp/entertainment/detail/002.html",
                "https://images.unsplash.com/photo-1559827260-dc66d52bef19?w=300&h=200&fit=crop",
                "海洋主题公园，近距离接触海洋动物", 4.4),
        ]),
    )
}

#[allow(clippy::too_many_arguments)]
fn hit(
    code: &str,
    word: &str,
    kind: &str,
    price: &str,
    zonename: &str,
    star: Option<&str>,
    districtname: &str,
    url: &str,
    image_url: &str,
    description: &str,
    rating: f64,
) -> Value {
    let mut hit = json!({
        "code": code,
        "word": word,
        "type": kind,
        "price": price,
        "zonename": zonename,
        "districtname": districtname,
        "url": url,
        "imageUrl": image_url,
        "description": description,
        "rating": rating
    });

    // only hotels carry a star rating
    if let (Some(star), Some(fields)) = (star, hit.as_object_mut()) {
        fields.insert("star".to_string(), Value::from(star));
    }

    hit
}
