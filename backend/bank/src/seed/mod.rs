pub mod banners;
pub mod cities;
pub mod content;
pub mod promotions;
pub mod search;
pub mod services;
