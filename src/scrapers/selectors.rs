use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// How to locate an element on the page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Locator {
    Css(String),
    XPath(String),
    /// A single CSS class name, without the leading dot
    Class(String),
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    pub fn xpath(expression: impl Into<String>) -> Self {
        Locator::XPath(expression.into())
    }

    pub fn class(name: impl Into<String>) -> Self {
        Locator::Class(name.into())
    }

    /// CSS form of this locator, if it has one
    pub fn as_css(&self) -> Option<String> {
        match self {
            Locator::Css(selector) => Some(selector.clone()),
            Locator::Class(name) => Some(format!(".{}", name)),
            Locator::XPath(_) => None,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(selector) => write!(f, "css `{}`", selector),
            Locator::XPath(expression) => write!(f, "xpath `{}`", expression),
            Locator::Class(name) => write!(f, "class `{}`", name),
        }
    }
}

/// Where each piece of the results page lives.
///
/// The target site's markup changes often, so these are kept out of the
/// scraping loop and can be overridden from a TOML file. Keys missing from
/// the file keep their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SelectorTable {
    /// Scrollable container holding the result cards
    pub results_panel: Locator,
    /// Present when the search matched nothing
    pub no_results: Locator,
    /// Clickable summary element for one listing
    pub result_card: Locator,
    /// Title of the opened detail pane
    pub detail_name: Locator,
    /// Informational text blocks (address, phone, website...) in the detail pane
    pub detail_info: Locator,
    /// Numeric rating label in the detail pane
    pub detail_rating: Locator,
}

impl Default for SelectorTable {
    fn default() -> Self {
        Self {
            results_panel: Locator::xpath(r#"//div[contains(@aria-label, "Results for")]"#),
            no_results: Locator::xpath(r#"//*[contains(text(), "Google Maps can't find")]"#),
            result_card: Locator::class("hfpxzc"),
            detail_name: Locator::class("DUwDvf"),
            detail_info: Locator::class("Io6YTe"),
            detail_rating: Locator::class("MW4etd"),
        }
    }
}

impl SelectorTable {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse selector table")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read selector table {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid selector table in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_locator_maps_to_css() {
        assert_eq!(Locator::class("hfpxzc").as_css().as_deref(), Some(".hfpxzc"));
        assert_eq!(Locator::css("div[role='feed']").as_css().as_deref(), Some("div[role='feed']"));
        assert_eq!(Locator::xpath("//div").as_css(), None);
    }

    #[test]
    fn partial_table_keeps_defaults() {
        let table = SelectorTable::from_toml_str(
            r#"
            result_card = { css = "a[href*='/maps/place/']" }
            detail_rating = { class = "fontDisplayLarge" }
            "#,
        )
        .unwrap();

        let defaults = SelectorTable::default();
        assert_eq!(table.result_card, Locator::css("a[href*='/maps/place/']"));
        assert_eq!(table.detail_rating, Locator::class("fontDisplayLarge"));
        assert_eq!(table.results_panel, defaults.results_panel);
        assert_eq!(table.detail_name, defaults.detail_name);
    }

    #[test]
    fn unknown_locator_kind_is_rejected() {
        let err = SelectorTable::from_toml_str(r#"result_card = { id = "card" }"#);
        assert!(err.is_err());
    }

    #[test]
    fn empty_table_is_the_default() {
        assert_eq!(SelectorTable::from_toml_str("").unwrap(), SelectorTable::default());
    }
}
