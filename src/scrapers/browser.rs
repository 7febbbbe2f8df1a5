use crate::config::BrowserSettings;
use crate::scrapers::selectors::Locator;
use crate::scrapers::traits::Automation;
use anyhow::{Context, Result};
use headless_chrome::browser::tab::NoElementFound;
use headless_chrome::{Browser, Element, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

const CHROME_ARGS: &[&str] = &[
    "--disable-dev-shm-usage",
    "--disable-gpu",
    "--disable-extensions",
    "--disable-infobars",
    "--disable-notifications",
    "--disable-blink-features=AutomationControlled",
];

const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// One headless Chrome process with a single working tab.
///
/// Dropping the session closes the tab and shuts the browser down.
pub struct ChromeSession {
    tab: Arc<Tab>,
    browser: Browser,
}

impl ChromeSession {
    /// Launch Chrome and open a tab ready for navigation
    pub fn launch(settings: &BrowserSettings) -> Result<Self> {
        info!("Launching headless Chrome...");

        // Prefer the configured binary, fall back to whatever headless_chrome can find
        let browser = match &settings.chrome_path {
            Some(path) => match Self::start_browser(settings, Some(path.clone())) {
                Ok(browser) => browser,
                Err(e) => {
                    warn!(
                        "Chrome at {} failed to start: {:#}. Falling back to auto-detection",
                        path.display(),
                        e
                    );
                    Self::start_browser(settings, None)?
                }
            },
            None => Self::start_browser(settings, None)?,
        };

        let tab = browser.new_tab().context("Failed to open browser tab")?;
        tab.set_user_agent(&settings.user_agent, Some(ACCEPT_LANGUAGE), None)
            .context("Failed to set user agent")?;

        tab.navigate_to("about:blank")
            .and_then(|tab| tab.wait_until_navigated())
            .context("Browser could not load about:blank")?;

        debug!("Browser session ready");
        Ok(Self { tab, browser })
    }

    fn start_browser(settings: &BrowserSettings, path: Option<PathBuf>) -> Result<Browser> {
        let mut args: Vec<&OsStr> = CHROME_ARGS.iter().map(|arg| OsStr::new(*arg)).collect();
        if settings.single_process {
            args.push(OsStr::new("--single-process"));
        }

        let options = LaunchOptions::default_builder()
            .headless(settings.headless)
            .sandbox(false)
            .window_size(Some(settings.window_size))
            .idle_browser_timeout(settings.idle_timeout)
            .path(path)
            .args(args)
            .build()
            .context("Failed to build launch options")?;

        Browser::new(options).context("Failed to launch Chrome browser")
    }

    /// Product string of the running browser, e.g. "HeadlessChrome/120.0.6099.109"
    pub fn version(&self) -> Result<String> {
        let version = self.browser.get_version().context("Failed to query browser version")?;
        Ok(version.product)
    }
}

impl Automation for ChromeSession {
    type Element<'a> = Element<'a>;

    fn navigate(&self, url: &str) -> Result<()> {
        debug!("Navigating to {}", url);
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .with_context(|| format!("Failed to load {}", url))?;
        Ok(())
    }

    fn wait_for<'a>(&'a self, locator: &Locator, timeout: Duration) -> Result<Element<'a>> {
        let found = match locator {
            Locator::Css(css) => self.tab.wait_for_element_with_custom_timeout(css, timeout),
            Locator::Class(name) => self
                .tab
                .wait_for_element_with_custom_timeout(&format!(".{}", name), timeout),
            Locator::XPath(expression) => {
                self.tab.wait_for_xpath_with_custom_timeout(expression, timeout)
            }
        };
        found.with_context(|| format!("Timed out after {:?} waiting for {}", timeout, locator))
    }

    fn scroll_to_bottom<'a>(&'a self, container: &Element<'a>) -> Result<()> {
        container
            .call_js_fn("function() { this.scrollTop = this.scrollHeight; }", vec![], false)
            .context("Failed to scroll container")?;
        Ok(())
    }

    fn find_all<'a>(&'a self, locator: &Locator) -> Result<Vec<Element<'a>>> {
        let found = match locator {
            Locator::Css(css) => self.tab.find_elements(css),
            Locator::Class(name) => self.tab.find_elements(&format!(".{}", name)),
            Locator::XPath(expression) => self.tab.find_elements_by_xpath(expression),
        };

        match found {
            Ok(elements) => Ok(elements),
            Err(e) if e.is::<NoElementFound>() => Ok(Vec::new()),
            Err(e) => Err(e.context(format!("Failed to query {}", locator))),
        }
    }

    fn scroll_into_view<'a>(&'a self, element: &Element<'a>) -> Result<()> {
        element
            .call_js_fn(
                "function() { this.scrollIntoView({block: 'center'}); }",
                vec![],
                false,
            )
            .context("Failed to scroll element into view")?;
        Ok(())
    }

    fn activate<'a>(&'a self, element: &Element<'a>) -> Result<()> {
        element.click().context("Failed to click element")?;
        Ok(())
    }

    fn read_text<'a>(&'a self, element: &Element<'a>) -> Result<String> {
        element.get_inner_text().context("Failed to read element text")
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        debug!("Closing browser session");
        if let Err(e) = self.tab.close(false) {
            debug!("Tab did not close cleanly: {:#}", e);
        }
    }
}
