use crate::config::{ScrapeSettings, Settings};
use crate::error::ScrapeError;
use crate::models::Listing;
use crate::scrapers::browser::ChromeSession;
use crate::scrapers::extract::{first_phone, parse_rating};
use crate::scrapers::selectors::{Locator, SelectorTable};
use crate::scrapers::traits::{Automation, ListingSource};
use crate::scrapers::types::{search_url, SearchQuery};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Map search scraper driving headless Chrome
pub struct MapsScraper {
    settings: Arc<Settings>,
}

impl MapsScraper {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }
}

#[async_trait]
impl ListingSource for MapsScraper {
    async fn search(&self, query: &SearchQuery) -> Vec<Listing> {
        let settings = Arc::clone(&self.settings);
        let query = query.clone();

        // Browser automation blocks, keep it off the async workers
        let task = tokio::task::spawn_blocking(move || {
            scrape_with(
                || ChromeSession::launch(&settings.browser),
                &query,
                &settings.scrape,
            )
        });

        match task.await {
            Ok(listings) => listings,
            Err(e) => {
                error!("Scrape task did not finish: {}", e);
                Vec::new()
            }
        }
    }

    async fn probe(&self) -> Result<String> {
        let settings = Arc::clone(&self.settings);

        tokio::task::spawn_blocking(move || {
            let session = ChromeSession::launch(&settings.browser)?;
            session.version()
        })
        .await
        .context("Browser probe task did not finish")?
    }

    fn source_name(&self) -> &'static str {
        "Google Maps"
    }
}

/// Run one scrape end to end with a session from `launch`.
///
/// Never fails: a session that cannot be launched or a results page that
/// never loads gives an empty list. The session is dropped before returning
/// on every path.
pub fn scrape_with<A, F>(launch: F, query: &SearchQuery, settings: &ScrapeSettings) -> Vec<Listing>
where
    A: Automation,
    F: FnOnce() -> Result<A>,
{
    let started = Instant::now();

    let url = match search_url(&settings.search_base_url, query) {
        Ok(url) => url,
        Err(e) => {
            warn!("Cannot build search URL: {:#}", e);
            return Vec::new();
        }
    };

    let session = match launch() {
        Ok(session) => session,
        Err(e) => {
            warn!("{}", ScrapeError::Launch(e));
            return Vec::new();
        }
    };

    let listings = match collect_listings(&session, url.as_str(), query, settings) {
        Ok(listings) => listings,
        Err(e) => {
            warn!("Scraping '{}' failed: {}", query.search_text(), e);
            Vec::new()
        }
    };
    drop(session);

    info!(
        "✅ Scraped {} listings for '{}' in {:.1?}",
        listings.len(),
        query.search_text(),
        started.elapsed()
    );
    listings
}

/// Open the search page in `session` and read up to the query's limit of result cards.
///
/// Cards that cannot be read are logged and skipped.
pub fn collect_listings<A: Automation>(
    session: &A,
    url: &str,
    query: &SearchQuery,
    settings: &ScrapeSettings,
) -> Result<Vec<Listing>, ScrapeError> {
    let selectors = &settings.selectors;
    let limit = query.limit.unwrap_or(settings.max_results);
    let scroll_attempts = query.scroll_attempts.unwrap_or(settings.scroll_attempts);

    info!("Opening search page {}", url);
    session.navigate(url).map_err(ScrapeError::Navigation)?;

    let panel = match session.wait_for(&selectors.results_panel, settings.results_timeout) {
        Ok(panel) => panel,
        Err(e) => {
            if shows_no_results(session, selectors) {
                info!("No results for '{}'", query.search_text());
                return Ok(Vec::new());
            }
            return Err(ScrapeError::Navigation(e));
        }
    };

    // Results load lazily as the panel is scrolled
    for attempt in 1..=scroll_attempts {
        if let Err(e) = session.scroll_to_bottom(&panel) {
            warn!("Scroll {} of the results panel failed: {:#}", attempt, e);
            break;
        }
        thread::sleep(settings.pacing.scroll_pause);
    }

    let cards = session
        .find_all(&selectors.result_card)
        .map_err(ScrapeError::Navigation)?;
    info!("Found {} result cards, reading up to {}", cards.len(), limit);

    let mut listings = Vec::new();
    for (idx, card) in cards.iter().take(limit).enumerate() {
        let position = idx + 1;
        match read_card(session, card, settings) {
            Ok((name, address, phone, rating)) => {
                debug!("Card {}: {}", position, name);
                listings.push(Listing {
                    position,
                    name,
                    address,
                    phone,
                    rating,
                });
            }
            Err(cause) => warn!("{}", ScrapeError::Extraction { position, cause }),
        }
    }

    Ok(listings)
}

fn shows_no_results<A: Automation>(session: &A, selectors: &SelectorTable) -> bool {
    session
        .find_all(&selectors.no_results)
        .map(|found| !found.is_empty())
        .unwrap_or(false)
}

type CardFields = (String, String, Option<String>, Option<f64>);

/// Open one card's detail pane and read name, address, phone and rating from it
fn read_card<'a, A: Automation>(
    session: &'a A,
    card: &A::Element<'a>,
    settings: &ScrapeSettings,
) -> Result<CardFields> {
    let selectors = &settings.selectors;

    session.scroll_into_view(card)?;
    thread::sleep(settings.pacing.card_pause);
    session.activate(card)?;
    thread::sleep(settings.pacing.detail_pause);

    let title = session.wait_for(&selectors.detail_name, settings.detail_timeout)?;
    let name = session.read_text(&title)?.trim().to_string();
    if name.is_empty() {
        bail!("detail pane has an empty name");
    }

    let info = session.find_all(&selectors.detail_info)?;
    let first = info
        .first()
        .with_context(|| format!("no {} in the detail pane", selectors.detail_info))?;
    let address = session.read_text(first)?.trim().to_string();
    if address.is_empty() {
        bail!("detail pane has an empty address");
    }

    let phone = first_phone(info.iter().filter_map(|block| session.read_text(block).ok()));
    let rating = read_rating(session, &selectors.detail_rating);

    Ok((name, address, phone, rating))
}

fn read_rating<A: Automation>(session: &A, locator: &Locator) -> Option<f64> {
    let labels = session.find_all(locator).ok()?;
    let text = session.read_text(labels.first()?).ok()?;
    let rating = parse_rating(&text);
    if rating.is_none() {
        debug!("Unreadable rating label {:?}", text);
    }
    rating
}
