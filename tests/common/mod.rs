#![allow(dead_code)]

use anyhow::{anyhow, bail, Result};
use listing_scout::config::{Pacing, ScrapeSettings};
use listing_scout::scrapers::{Automation, Locator, SelectorTable};
use scraper::{Html, Selector};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;

/// Selector table matching the HTML fixtures below
pub fn fixture_selectors() -> SelectorTable {
    SelectorTable {
        results_panel: Locator::css("div[role='feed']"),
        no_results: Locator::css("div.no-results"),
        result_card: Locator::css("a.card"),
        detail_name: Locator::css("h1.title"),
        detail_info: Locator::class("info"),
        detail_rating: Locator::css("span.rating"),
    }
}

pub fn fixture_settings() -> ScrapeSettings {
    ScrapeSettings {
        search_base_url: "http://maps.test/search/".to_string(),
        max_results: 10,
        scroll_attempts: 3,
        results_timeout: Duration::ZERO,
        detail_timeout: Duration::ZERO,
        pacing: Pacing::none(),
        selectors: fixture_selectors(),
    }
}

/// One business as shown in its detail pane
pub struct Place<'a> {
    pub name: &'a str,
    pub address: &'a str,
    pub phone: Option<&'a str>,
    pub rating: Option<&'a str>,
}

pub fn detail_html(place: &Place<'_>) -> String {
    let mut html = format!(
        r#"<div class="pane"><h1 class="title">{}</h1><div class="info">{}</div><div class="info">example.com</div>"#,
        place.name, place.address
    );
    if let Some(phone) = place.phone {
        html.push_str(&format!(r#"<div class="info">{}</div>"#, phone));
    }
    if let Some(rating) = place.rating {
        html.push_str(&format!(r#"<span class="rating">{}</span>"#, rating));
    }
    html.push_str("</div>");
    html
}

pub fn results_html(cards: usize) -> String {
    let mut html = String::from(r#"<div role="feed" aria-label="Results for query">"#);
    for idx in 0..cards {
        html.push_str(&format!(r#"<a class="card" data-idx="{}">Card {}</a>"#, idx, idx));
    }
    html.push_str("</div>");
    html
}

#[derive(Debug, Clone)]
pub struct FakeElement {
    pub card: Option<usize>,
    pub text: String,
}

/// Browser stand-in over static HTML.
///
/// Clicking card `i` swaps in detail pane `i`. A card without a pane
/// leaves the detail area empty.
pub struct FakeBrowser {
    search_page: Html,
    details: Vec<Option<String>>,
    current_detail: RefCell<Option<Html>>,
    failing_cards: HashSet<usize>,
    fail_navigation: bool,
    pub visited: RefCell<Vec<String>>,
    pub scrolls: Cell<u32>,
    pub activations: Cell<u32>,
    released: Rc<Cell<bool>>,
}

impl FakeBrowser {
    /// A results page with one card per detail pane
    pub fn with_details(details: Vec<Option<String>>) -> Self {
        let search = results_html(details.len());
        Self::new(&search, details)
    }

    pub fn new(search_html: &str, details: Vec<Option<String>>) -> Self {
        Self {
            search_page: Html::parse_document(search_html),
            details,
            current_detail: RefCell::new(None),
            failing_cards: HashSet::new(),
            fail_navigation: false,
            visited: RefCell::new(Vec::new()),
            scrolls: Cell::new(0),
            activations: Cell::new(0),
            released: Rc::new(Cell::new(false)),
        }
    }

    /// Clicking this card errors
    pub fn failing_card(mut self, idx: usize) -> Self {
        self.failing_cards.insert(idx);
        self
    }

    pub fn failing_navigation(mut self) -> Self {
        self.fail_navigation = true;
        self
    }

    /// Flag that flips to true once the browser is dropped
    pub fn released(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.released)
    }

    fn select(doc: &Html, selector: &Selector) -> Vec<FakeElement> {
        doc.select(selector)
            .map(|el| FakeElement {
                card: el.value().attr("data-idx").and_then(|idx| idx.parse().ok()),
                text: el.text().collect::<String>(),
            })
            .collect()
    }
}

impl Automation for FakeBrowser {
    type Element<'a> = FakeElement;

    fn navigate(&self, url: &str) -> Result<()> {
        self.visited.borrow_mut().push(url.to_string());
        if self.fail_navigation {
            bail!("net::ERR_NAME_NOT_RESOLVED");
        }
        Ok(())
    }

    fn wait_for<'a>(&'a self, locator: &Locator, _timeout: Duration) -> Result<FakeElement> {
        self.find_all(locator)?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Timed out waiting for {}", locator))
    }

    fn scroll_to_bottom<'a>(&'a self, _container: &FakeElement) -> Result<()> {
        self.scrolls.set(self.scrolls.get() + 1);
        Ok(())
    }

    fn find_all<'a>(&'a self, locator: &Locator) -> Result<Vec<FakeElement>> {
        let css = locator
            .as_css()
            .ok_or_else(|| anyhow!("fake browser cannot evaluate {}", locator))?;
        let selector = Selector::parse(&css).map_err(|e| anyhow!("bad selector {}: {:?}", css, e))?;

        let mut found = Vec::new();
        if let Some(detail) = self.current_detail.borrow().as_ref() {
            found.extend(Self::select(detail, &selector));
        }
        found.extend(Self::select(&self.search_page, &selector));
        Ok(found)
    }

    fn scroll_into_view<'a>(&'a self, _element: &FakeElement) -> Result<()> {
        Ok(())
    }

    fn activate<'a>(&'a self, element: &FakeElement) -> Result<()> {
        self.activations.set(self.activations.get() + 1);
        let idx = element.card.ok_or_else(|| anyhow!("element is not clickable"))?;
        if self.failing_cards.contains(&idx) {
            bail!("element click intercepted");
        }
        let detail = self
            .details
            .get(idx)
            .and_then(|html| html.as_deref())
            .map(Html::parse_fragment);
        *self.current_detail.borrow_mut() = detail;
        Ok(())
    }

    fn read_text<'a>(&'a self, element: &FakeElement) -> Result<String> {
        Ok(element.text.clone())
    }
}

impl Drop for FakeBrowser {
    fn drop(&mut self) {
        self.released.set(true);
    }
}
