use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use anyhow::{Context, Result};
use bank::DEFAULT_CONTENT_COUNT;
use tracing::{info, warn};

const DEV_JWT_SECRET: &str = "your-secret-key";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub login_port: u16,
    pub jwt_secret: String,
    pub token_ttl_days: i64,
    pub bcrypt_cost: u32,
    pub content_count: usize,
    /// Fixed seed for the generated content feed, random when unset.
    pub content_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3002,
            login_port: 3001,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl_days: 7,
            bcrypt_cost: 10,
            content_count: DEFAULT_CONTENT_COUNT,
            content_seed: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            port: try_load("PORT", defaults.port)?,
            login_port: try_load("LOGIN_PORT", defaults.login_port)?,
            jwt_secret: read_secret("JWT_SECRET").unwrap_or_else(|| {
                warn!("JWT_SECRET not set, using the development secret");
                defaults.jwt_secret
            }),
            token_ttl_days: try_load("TOKEN_TTL_DAYS", defaults.token_ttl_days)?,
            bcrypt_cost: try_load("BCRYPT_COST", defaults.bcrypt_cost)?,
            content_count: try_load("CONTENT_COUNT", defaults.content_count)?,
            content_seed: var("CONTENT_SEED")
                .map(|seed| seed.parse().context("Invalid CONTENT_SEED value"))
                .transpose()?,
        })
    }

    pub fn expires_in(&self) -> String {
        format!("{}d", self.token_ttl_days)
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn try_load<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = var(key) else {
        info!("{key} not set, using default: {default}");
        return Ok(default);
    };

    raw.trim().parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        anyhow::anyhow!("Environment misconfigured: {key}={raw}")
    })
}

/// Docker secret file first, then the plain environment variable.
fn read_secret(secret_name: &str) -> Option<String> {
    let path = format!("/run/secrets/{secret_name}");

    match read_to_string(&path) {
        Ok(secret) => Some(secret.trim().to_string()),
        Err(e) => {
            info!("No secret file for {secret_name} ({e}), checking environment");
            var(secret_name)
        }
    }
}
