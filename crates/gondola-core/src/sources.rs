//! Per-storefront extraction settings loaded from `config/sources.yaml`.
//!
//! Every storefront is described by one [`SourceConfig`]: where to navigate,
//! the ranked [`LocatorChain`]s for each logical field, timeouts and the
//! pagination cap. Configs are validated once at load time and are read-only
//! afterwards.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

use crate::ConfigError;

/// Default hard cap on "load more" iterations per search.
pub const DEFAULT_MAX_PAGINATION_ITERATIONS: u32 = 10;

/// An ordered, non-empty list of alternative locator patterns for one field.
///
/// Order is significant: patterns are tried first to last. In YAML a chain
/// may be written as a single string or as a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LocatorChain(Vec<String>);

impl LocatorChain {
    /// Builds a chain from patterns in priority order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if `patterns` is empty or any
    /// pattern is blank.
    pub fn new<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        if patterns.is_empty() {
            return Err(ConfigError::Validation(
                "locator chain must contain at least one pattern".to_string(),
            ));
        }
        if let Some(pos) = patterns.iter().position(|p| p.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "locator chain pattern #{} is blank",
                pos + 1
            )));
        }
        Ok(Self(patterns))
    }

    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; kept for clippy's `len_without_is_empty`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for LocatorChain {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            One(String),
            Many(Vec<String>),
        }

        let patterns = match Repr::deserialize(deserializer)? {
            Repr::One(pattern) => vec![pattern],
            Repr::Many(patterns) => patterns,
        };
        Self::new(patterns).map_err(serde::de::Error::custom)
    }
}

impl<'a> IntoIterator for &'a LocatorChain {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Locator chains for every logical element the engine touches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locators {
    pub search_input: LocatorChain,
    pub item_container: LocatorChain,
    pub load_more: LocatorChain,
    pub name: LocatorChain,
    pub price: LocatorChain,
    pub unit_price: LocatorChain,
    /// Integer part of a price split across sibling elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_integer: Option<LocatorChain>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_fraction: Option<LocatorChain>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_currency: Option<LocatorChain>,
}

/// Driver call timeouts, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeouts {
    #[serde(default = "default_page_load_ms")]
    pub page_load_ms: u64,
    #[serde(default = "default_element_wait_ms")]
    pub element_wait_ms: u64,
    /// Lookup timeout for the load-more control and the pause after clicking
    /// it. One value covers both, so they cannot be tuned apart.
    #[serde(default = "default_load_more_ms")]
    pub load_more_ms: u64,
    /// Pause after navigation and after submitting the search.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

fn default_page_load_ms() -> u64 {
    30_000
}

fn default_element_wait_ms() -> u64 {
    3_000
}

fn default_load_more_ms() -> u64 {
    2_000
}

fn default_settle_ms() -> u64 {
    2_000
}

fn default_max_pagination_iterations() -> u32 {
    DEFAULT_MAX_PAGINATION_ITERATIONS
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            page_load_ms: default_page_load_ms(),
            element_wait_ms: default_element_wait_ms(),
            load_more_ms: default_load_more_ms(),
            settle_ms: default_settle_ms(),
        }
    }
}

impl Timeouts {
    /// All timeouts zero: every lookup is a single immediate query.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            page_load_ms: 0,
            element_wait_ms: 0,
            load_more_ms: 0,
            settle_ms: 0,
        }
    }

    #[must_use]
    pub fn page_load(&self) -> Duration {
        Duration::from_millis(self.page_load_ms)
    }

    #[must_use]
    pub fn element_wait(&self) -> Duration {
        Duration::from_millis(self.element_wait_ms)
    }

    /// Used both to wait for the load-more control and as the pause after
    /// clicking it.
    #[must_use]
    pub fn load_more(&self) -> Duration {
        Duration::from_millis(self.load_more_ms)
    }

    #[must_use]
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

/// Immutable extraction settings for one storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub base_url: String,
    pub locators: Locators,
    #[serde(default)]
    pub timeouts: Timeouts,
    #[serde(default = "default_max_pagination_iterations")]
    pub max_pagination_iterations: u32,
}

impl SourceConfig {
    /// Creates a config with default timeouts and pagination cap.
    #[must_use]
    pub fn new(name: impl Into<String>, base_url: impl Into<String>, locators: Locators) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            locators,
            timeouts: Timeouts::default(),
            max_pagination_iterations: DEFAULT_MAX_PAGINATION_ITERATIONS,
        }
    }

    #[must_use]
    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    #[must_use]
    pub fn with_max_pagination_iterations(mut self, cap: u32) -> Self {
        self.max_pagination_iterations = cap;
        self
    }
}

#[derive(Debug, Deserialize)]
pub struct SourcesFile {
    pub sources: Vec<SourceConfig>,
}

impl SourcesFile {
    /// Looks up a source by name, ignoring ASCII case.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&SourceConfig> {
        self.sources
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }
}

/// Load and validate the storefront configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sources(path: &Path) -> Result<SourcesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SourcesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let sources_file = parse_sources(&content)?;
    tracing::debug!(
        path = %path.display(),
        count = sources_file.sources.len(),
        "loaded storefront sources"
    );
    Ok(sources_file)
}

/// Parses and validates sources YAML.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_sources(content: &str) -> Result<SourcesFile, ConfigError> {
    let sources_file: SourcesFile =
        serde_yaml::from_str(content).map_err(ConfigError::SourcesFileParse)?;
    validate_sources(&sources_file)?;
    Ok(sources_file)
}

fn validate_sources(sources_file: &SourcesFile) -> Result<(), ConfigError> {
    if sources_file.sources.is_empty() {
        return Err(ConfigError::Validation(
            "at least one source must be configured".to_string(),
        ));
    }

    let mut seen_names = HashSet::new();

    for source in &sources_file.sources {
        if source.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "source name must be non-empty".to_string(),
            ));
        }

        let url = source.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "source '{}' has invalid base_url \"{}\"; must be an http(s) URL",
                source.name, source.base_url
            )));
        }

        if source.max_pagination_iterations == 0 {
            return Err(ConfigError::Validation(format!(
                "source '{}' has max_pagination_iterations 0; must be at least 1",
                source.name
            )));
        }

        if !seen_names.insert(source.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate source name: '{}'",
                source.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "sources_test.rs"]
mod tests;
