pub mod browser;
pub mod extract;
pub mod maps;
pub mod selectors;
pub mod traits;
pub mod types;

pub use browser::ChromeSession;
pub use maps::MapsScraper;
pub use selectors::{Locator, SelectorTable};
pub use traits::{Automation, ListingSource};
pub use types::SearchQuery;
