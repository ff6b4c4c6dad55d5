//! Locator pattern syntax understood by the WebDriver backend.
//!
//! - `div.card` is a CSS selector
//! - `xpath=//div[@class="card"]` is an XPath expression
//! - a trailing `:has-text("Mostrar mais")` keeps only matches whose text
//!   contains the given string, ignoring case and runs of whitespace

use std::sync::LazyLock;

use regex::Regex;
use thirtyfour::By;

use crate::error::DriverError;

static HAS_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#":has-text\(\s*(?:"([^"]*)"|'([^']*)')\s*\)\s*$"#).expect("valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Strategy {
    Css,
    XPath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Locator {
    pub strategy: Strategy,
    pub value: String,
    /// Lowercased, whitespace-normalized text filter.
    pub has_text: Option<String>,
}

impl Locator {
    pub(crate) fn by(&self) -> By {
        match self.strategy {
            Strategy::Css => By::Css(self.value.as_str()),
            Strategy::XPath => By::XPath(self.value.as_str()),
        }
    }

    pub(crate) fn accepts(&self, text: &str) -> bool {
        self.has_text
            .as_deref()
            .is_none_or(|needle| normalize_text(text).contains(needle))
    }
}

pub(crate) fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub(crate) fn parse_pattern(pattern: &str) -> Result<Locator, DriverError> {
    let pattern = pattern.trim();
    let invalid = |reason: &str| DriverError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: reason.to_string(),
    };

    let (selector, has_text) = match HAS_TEXT.captures(pattern) {
        Some(caps) => {
            let start = caps.get(0).map_or(pattern.len(), |m| m.start());
            let text = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            (&pattern[..start], Some(normalize_text(text)))
        }
        None => (pattern, None),
    };

    let (strategy, value) = match selector.strip_prefix("xpath=") {
        Some(xpath) if xpath.trim().is_empty() => return Err(invalid("empty xpath expression")),
        Some(xpath) => (Strategy::XPath, xpath.trim()),
        None if selector.trim().is_empty() && has_text.is_some() => (Strategy::Css, "*"),
        None if selector.trim().is_empty() => return Err(invalid("empty selector")),
        None => (Strategy::Css, selector.trim()),
    };

    Ok(Locator {
        strategy,
        value: value.to_string(),
        has_text,
    })
}
