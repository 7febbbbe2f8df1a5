use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Default map search endpoint; the search text is appended as a path segment
pub const DEFAULT_SEARCH_BASE_URL: &str = "https://www.google.com/maps/search/";

/// Search parameters for one listing scrape
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchQuery {
    /// City or area to search in
    pub location: String,
    /// Business category, e.g. "restaurants"
    pub category: String,
    /// Maximum number of result cards to open
    pub limit: Option<usize>,
    /// How many times to scroll the results panel before collecting cards
    pub scroll_attempts: Option<u32>,
}

impl SearchQuery {
    pub fn new(location: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            category: category.into(),
            limit: None,
            scroll_attempts: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_scroll_attempts(mut self, attempts: u32) -> Self {
        self.scroll_attempts = Some(attempts);
        self
    }

    /// Free-text query typed into the map search, e.g. "restaurants in New York"
    pub fn search_text(&self) -> String {
        format!("{} in {}", self.category, self.location)
    }
}

/// Build the search URL for a query under the given base URL
pub fn search_url(base: &str, query: &SearchQuery) -> Result<Url> {
    let mut url = Url::parse(base).with_context(|| format!("Invalid search base URL: {}", base))?;

    if url.cannot_be_a_base() {
        bail!("Search base URL cannot take path segments: {}", base);
    }

    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(&query.search_text());
    }

    Ok(url)
}
