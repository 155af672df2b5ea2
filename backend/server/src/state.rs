use std::sync::Arc;

use bank::Bank;
use tokio::sync::RwLock;
use tracing::info;

use crate::{auth::hash_password, config::Config, error::AppError, user::Account};

pub const DEMO_PASSWORD: &str = "password";

/// Shared by every handler. The catalog is read-only, accounts are the only
/// thing requests write to and sit behind their own lock.
pub struct AppState {
    pub config: Config,
    pub bank: Bank,
    pub accounts: RwLock<Vec<Account>>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Arc<Self>, AppError> {
        let bank = Bank::seeded(config.content_seed, config.content_count);
        info!(
            content = bank.content.len(),
            cities = bank.cities.len(),
            search = bank.search.len(),
            "Catalog seeded"
        );

        let demo = Account::demo(hash_password(&config, DEMO_PASSWORD)?);

        Ok(Arc::new(Self {
            config,
            bank,
            accounts: RwLock::new(vec![demo]),
        }))
    }
}
