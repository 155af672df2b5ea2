//! In-memory catalog data and the query engine that lists it.
use chrono::Utc;
use rand::{Rng, SeedableRng, rngs::StdRng};

pub mod query;
pub mod record;
pub mod seed;

pub use query::{QueryError, QuerySpec, ResultPage, SortOrder, execute};
pub use record::{Collection, FieldKind, Record, Schema};
use seed::search::{HOT_SEARCHES, HotSearch};

pub const DEFAULT_CONTENT_COUNT: usize = 50;

/// Every catalog collection the app serves. Built once at startup and only read afterwards.
#[derive(Debug, Clone)]
pub struct Bank {
    pub cities: Collection,
    pub content: Collection,
    pub search: Collection,
    pub promotions: Collection,
    pub banners: Collection,
    pub services: Collection,
    pub hot_searches: Vec<HotSearch>,
}

impl Bank {
    pub fn new<R: Rng>(rng: &mut R, content_count: usize) -> Self {
        Self {
            cities: seed::cities::cities(),
            content: seed::content::generate(rng, content_count, Utc::now()),
            search: seed::search::search_results(),
            promotions: seed::promotions::promotions(),
            banners: seed::banners::banners(),
            services: seed::services::services(),
            hot_searches: HOT_SEARCHES.to_vec(),
        }
    }

    /// Fixed seed for reproducible feeds, entropy otherwise.
    pub fn seeded(seed: Option<u64>, content_count: usize) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self::new(&mut rng, content_count)
    }
}
