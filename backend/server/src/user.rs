//! # Accounts
//!
//! One list backs both login and the profile endpoints. Password hashes never
//! leave the server, they are skipped on serialization.
//!
//! Profile updates only touch `nickname`, `avatar`, `gender`, `birthday`,
//! `location`, `phone` and `preferences`. Anything else in the body is ignored.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: String,
    pub phone: Option<String>,
    pub nickname: String,
    pub avatar: String,
    pub gender: Option<String>,
    pub birthday: Option<String>,
    pub location: Option<String>,
    pub vip_level: String,
    pub points: u64,
    pub total_orders: u64,
    pub total_spent: u64,
    pub join_date: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub preferences: Value,
}

impl Account {
    pub fn demo(password_hash: String) -> Self {
        Self {
            id: "1".to_string(),
            username: "demo".to_string(),
            password_hash,
            email: "demo@example.com".to_string(),
            phone: Some("13800138000".to_string()),
            nickname: "演示用户".to_string(),
            avatar: "https://images.unsplash.com/photo-1535713875002-d1d0cf377fde?w=200&h=200&fit=crop&crop=face"
                .to_string(),
            gender: Some("male".to_string()),
            birthday: Some("1990-01-01".to_string()),
            location: Some("北京市".to_string()),
            vip_level: "gold".to_string(),
            points: 2580,
            total_orders: 15,
            total_spent: 25800,
            join_date: NaiveDate::from_ymd_opt(2023, 1, 1)
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
                .unwrap_or_else(Utc::now),
            last_login: None,
            preferences: default_preferences(),
        }
    }

    pub fn register(id: String, request: RegisterRequest, password_hash: String) -> Self {
        let now = Utc::now();

        Self {
            id,
            nickname: request.nickname.unwrap_or_else(|| request.username.clone()),
            username: request.username,
            password_hash,
            email: request.email,
            phone: request.phone,
            avatar: format!(
                "https://images.unsplash.com/photo-{}?w=200&h=200&fit=crop&crop=face",
                now.timestamp_millis()
            ),
            gender: None,
            birthday: None,
            location: None,
            vip_level: "normal".to_string(),
            points: 0,
            total_orders: 0,
            total_spent: 0,
            join_date: now,
            last_login: None,
            preferences: default_preferences(),
        }
    }

    /// Logins accept the username, the email or the phone number.
    pub fn answers_to(&self, login: &str) -> bool {
        self.username == login || self.email == login || self.phone.as_deref() == Some(login)
    }

    pub fn collides_with(&self, username: &str, email: &str, phone: Option<&str>) -> bool {
        self.username == username
            || self.email == email
            || phone.is_some_and(|phone| self.phone.as_deref() == Some(phone))
    }

    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(nickname) = update.nickname {
            self.nickname = nickname;
        }
        if let Some(avatar) = update.avatar {
            self.avatar = avatar;
        }
        if let Some(gender) = update.gender {
            self.gender = Some(gender);
        }
        if let Some(birthday) = update.birthday {
            self.birthday = Some(birthday);
        }
        if let Some(location) = update.location {
            self.location = Some(location);
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(preferences) = update.preferences {
            self.preferences = preferences;
        }
    }

    pub fn stats(&self, now: DateTime<Utc>) -> UserStats {
        UserStats {
            total_orders: self.total_orders,
            total_spent: self.total_spent,
            points: self.points,
            vip_level: self.vip_level.clone(),
            join_date: self.join_date,
            last_login: self.last_login,
            membership_days: (now - self.join_date).num_days(),
        }
    }
}

fn default_preferences() -> Value {
    json!({
        "currency": "CNY",
        "language": "zh-CN",
        "notifications": {
            "promotions": true,
            "orderUpdates": true,
            "systemMessages": false
        }
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub phone: Option<String>,
    pub nickname: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterPayload {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub nickname: Option<String>,
}

impl RegisterPayload {
    /// `None` when any of username, password or email is missing or blank.
    pub fn validate(self) -> Option<RegisterRequest> {
        let present = |value: Option<String>| value.filter(|value| !value.trim().is_empty());

        Some(RegisterRequest {
            username: present(self.username)?,
            password: present(self.password)?,
            email: present(self.email)?,
            phone: present(self.phone),
            nickname: present(self.nickname),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProfileUpdate {
    pub nickname: Option<String>,
    pub avatar: Option<String>,
    pub gender: Option<String>,
    pub birthday: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub preferences: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_orders: u64,
    pub total_spent: u64,
    pub points: u64,
    pub vip_level: String,
    pub join_date: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub membership_days: i64,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_password_hash_is_never_serialized() {
        let account = Account::demo("$2b$04$secret".to_string());
        let value = serde_json::to_value(&account).unwrap();

        assert!(value.get("passwordHash").is_none());
        assert_eq!(value["vipLevel"], "gold");
        assert_eq!(value["joinDate"], "2023-01-01T00:00:00Z");
    }

    #[test]
    fn test_login_aliases() {
        let account = Account::demo(String::new());

        assert!(account.answers_to("demo"));
        assert!(account.answers_to("demo@example.com"));
        assert!(account.answers_to("13800138000"));
        assert!(!account.answers_to("someone"));
    }

    #[test]
    fn test_collisions() {
        let account = Account::demo(String::new());

        assert!(account.collides_with("demo", "x@example.com", None));
        assert!(account.collides_with("x", "demo@example.com", None));
        assert!(account.collides_with("x", "x@example.com", Some("13800138000")));
        assert!(!account.collides_with("x", "x@example.com", Some("1")));
    }

    #[test]
    fn test_apply_only_touches_given_fields() {
        let mut account = Account::demo(String::new());
        account.apply(ProfileUpdate {
            nickname: Some("旅行者".to_string()),
            ..Default::default()
        });

        assert_eq!(account.nickname, "旅行者");
        assert_eq!(account.username, "demo");
        assert_eq!(account.location.as_deref(), Some("北京市"));
    }

    #[test]
    fn test_profile_update_ignores_unknown_keys() {
        let update: ProfileUpdate =
            serde_json::from_value(json!({ "username": "hijack", "gender": "female" })).unwrap();

        assert_eq!(update.gender.as_deref(), Some("female"));
        assert!(update.nickname.is_none());
    }

    #[test]
    fn test_register_payload_requires_core_fields() {
        let missing_email = RegisterPayload {
            username: Some("amy".to_string()),
            password: Some("pw".to_string()),
            ..Default::default()
        };
        assert!(missing_email.validate().is_none());

        let complete = RegisterPayload {
            username: Some("amy".to_string()),
            password: Some("pw".to_string()),
            email: Some("amy@example.com".to_string()),
            phone: Some("  ".to_string()),
            nickname: None,
        };
        let request = complete.validate().unwrap();
        assert!(request.phone.is_none());
    }

    #[test]
    fn test_membership_days() {
        let account = Account::demo(String::new());
        let stats = account.stats(account.join_date + Duration::days(10));

        assert_eq!(stats.membership_days, 10);
    }
}
