use crate::scrapers::selectors::SelectorTable;
use crate::scrapers::types::DEFAULT_SEARCH_BASE_URL;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_CHROME_PATH: &str = "/usr/bin/chromium";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Process configuration, read from the environment
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: String,
    pub port: u16,
    pub browser: BrowserSettings,
    pub scrape: ScrapeSettings,
}

/// How the headless browser is launched
#[derive(Debug, Clone)]
pub struct BrowserSettings {
    /// Chrome/Chromium binary; auto-detected when unset or unusable
    pub chrome_path: Option<PathBuf>,
    pub headless: bool,
    /// Run Chrome as a single process (lower memory on small hosts)
    pub single_process: bool,
    pub window_size: (u32, u32),
    pub user_agent: String,
    /// How long the browser may stay silent before the connection is dropped
    pub idle_timeout: Duration,
}

/// Limits and timings for one scrape
#[derive(Debug, Clone)]
pub struct ScrapeSettings {
    pub search_base_url: String,
    pub max_results: usize,
    pub scroll_attempts: u32,
    pub results_timeout: Duration,
    pub detail_timeout: Duration,
    pub pacing: Pacing,
    pub selectors: SelectorTable,
}

/// Fixed pauses that give the page time to react
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pacing {
    /// After each scroll of the results panel
    pub scroll_pause: Duration,
    /// After scrolling a card into view
    pub card_pause: Duration,
    /// After activating a card, for the detail pane to load
    pub detail_pause: Duration,
}

impl Pacing {
    /// No pauses at all
    pub fn none() -> Self {
        Self {
            scroll_pause: Duration::ZERO,
            card_pause: Duration::ZERO,
            detail_pause: Duration::ZERO,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            scroll_pause: Duration::from_millis(2500),
            card_pause: Duration::from_millis(1200),
            detail_pause: Duration::from_millis(2800),
        }
    }
}

impl Default for BrowserSettings {
    fn default() -> Self {
        let chrome_path = Path::new(DEFAULT_CHROME_PATH);
        Self {
            chrome_path: chrome_path.exists().then(|| chrome_path.to_path_buf()),
            headless: true,
            single_process: false,
            window_size: (1920, 1080),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            idle_timeout: Duration::from_secs(90),
        }
    }
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            max_results: 10,
            scroll_attempts: 3,
            results_timeout: Duration::from_secs(15),
            detail_timeout: Duration::from_secs(8),
            pacing: Pacing::default(),
            selectors: SelectorTable::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            browser: BrowserSettings::default(),
            scrape: ScrapeSettings::default(),
        }
    }
}

impl Settings {
    /// Read settings from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup.
    ///
    /// Recognised keys: `PORT`, `BIND_ADDR`, `CHROME_PATH`, `HEADLESS`,
    /// `SINGLE_PROCESS`, `USER_AGENT`, `MAX_RESULTS`, `SCROLL_ATTEMPTS`,
    /// `SEARCH_BASE_URL` and `SELECTORS_FILE`. Unset or blank keys keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut settings = Settings::default();

        if let Some(port) = get("PORT") {
            settings.port = parse_value("PORT", &port)?;
        }
        if let Some(addr) = get("BIND_ADDR") {
            settings.bind_addr = addr;
        }

        if let Some(path) = get("CHROME_PATH") {
            settings.browser.chrome_path = Some(PathBuf::from(path));
        }
        if let Some(headless) = get("HEADLESS") {
            settings.browser.headless = parse_bool("HEADLESS", &headless)?;
        }
        if let Some(single) = get("SINGLE_PROCESS") {
            settings.browser.single_process = parse_bool("SINGLE_PROCESS", &single)?;
        }
        if let Some(agent) = get("USER_AGENT") {
            settings.browser.user_agent = agent;
        }

        if let Some(max) = get("MAX_RESULTS") {
            settings.scrape.max_results = parse_value("MAX_RESULTS", &max)?;
        }
        if let Some(scrolls) = get("SCROLL_ATTEMPTS") {
            settings.scrape.scroll_attempts = parse_value("SCROLL_ATTEMPTS", &scrolls)?;
        }
        if let Some(base) = get("SEARCH_BASE_URL") {
            settings.scrape.search_base_url = base;
        }
        if let Some(path) = get("SELECTORS_FILE") {
            settings.scrape.selectors = SelectorTable::load(&path)?;
        }

        Ok(settings)
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse()
        .with_context(|| format!("Invalid value for {}: {:?}", key, raw))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => bail!("Invalid value for {}: {:?} (expected true or false)", key, raw),
    }
}
