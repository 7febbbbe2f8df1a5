use crate::models::Listing;
use crate::scrapers::selectors::Locator;
use crate::scrapers::types::SearchQuery;
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

/// What the scraping loop needs from a browser automation backend.
///
/// One value is one live browser session. Dropping it releases the browser.
pub trait Automation {
    /// Handle to an element on the current page
    type Element<'a>
    where
        Self: 'a;

    fn navigate(&self, url: &str) -> Result<()>;

    /// Wait until an element matching `locator` exists, up to `timeout`
    fn wait_for<'a>(&'a self, locator: &Locator, timeout: Duration) -> Result<Self::Element<'a>>;

    /// Scroll a scrollable container to its current bottom
    fn scroll_to_bottom<'a>(&'a self, container: &Self::Element<'a>) -> Result<()>;

    /// Every element currently matching `locator`; empty when nothing matches
    fn find_all<'a>(&'a self, locator: &Locator) -> Result<Vec<Self::Element<'a>>>;

    fn scroll_into_view<'a>(&'a self, element: &Self::Element<'a>) -> Result<()>;

    /// Click the element
    fn activate<'a>(&'a self, element: &Self::Element<'a>) -> Result<()>;

    fn read_text<'a>(&'a self, element: &Self::Element<'a>) -> Result<String>;
}

/// Common trait for listing sources the web front end can call
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Scrape listings for a query.
    ///
    /// Never fails: problems are logged and give a partial or empty result.
    async fn search(&self, query: &SearchQuery) -> Vec<Listing>;

    /// Open a browser session and report what is running
    async fn probe(&self) -> Result<String>;

    /// Get the name of the listing source
    fn source_name(&self) -> &'static str;
}
