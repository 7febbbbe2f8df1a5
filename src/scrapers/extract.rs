use regex::Regex;
use std::sync::LazyLock;

// Loose international pattern: optional +, then digits, spaces, dashes and parens
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+?[\d\s\-\(\)]{7,}\d)$").expect("phone pattern is valid"));

/// Parse a rating label such as "4.5" or "4,5".
///
/// Anything that is not a finite number between 0 and 5 counts as no rating.
pub fn parse_rating(text: &str) -> Option<f64> {
    let value: f64 = text.trim().replace(',', ".").parse().ok()?;
    (value.is_finite() && (0.0..=5.0).contains(&value)).then_some(value)
}

pub fn looks_like_phone(text: &str) -> bool {
    PHONE_PATTERN.is_match(text.trim())
}

/// First informational text that looks like a phone number, trimmed
pub fn first_phone<I, S>(texts: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    texts
        .into_iter()
        .map(|text| text.as_ref().trim().to_string())
        .find(|text| looks_like_phone(text))
}
