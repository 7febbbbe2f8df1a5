pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod scrapers;
pub mod server;

pub use config::{Pacing, ScrapeSettings, Settings};
pub use error::ScrapeError;
pub use models::{sort_by_rating, Listing, SearchResults};
pub use scrapers::{ListingSource, MapsScraper, SearchQuery};
