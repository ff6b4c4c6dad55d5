//! Extraction results: per-item records, per-source results and the
//! aggregate report handed to the formatter.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Substituted when no name locator matches.
pub const NAME_NOT_FOUND: &str = "Name not found";
/// Substituted when neither the split-price parts nor the price chain match.
pub const PRICE_NOT_FOUND: &str = "Price not found";

/// One product scraped from a result page.
///
/// Fields are never absent: missing name/price carry the sentinel strings
/// above and a missing unit price is the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedItem {
    pub name: String,
    pub price: String,
    pub unit_price: String,
}

/// Outcome of one storefront search.
///
/// Build through [`SourceQueryResult::succeeded`] or [`SourceQueryResult::failed`]
/// so `success`, `items` and `error` stay consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceQueryResult {
    pub source_name: String,
    pub success: bool,
    pub search_term: String,
    pub items: Vec<ExtractedItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SourceQueryResult {
    #[must_use]
    pub fn succeeded(
        source_name: impl Into<String>,
        search_term: impl Into<String>,
        items: Vec<ExtractedItem>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            success: true,
            search_term: search_term.into(),
            items,
            error: None,
        }
    }

    #[must_use]
    pub fn failed(
        source_name: impl Into<String>,
        search_term: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            success: false,
            search_term: search_term.into(),
            items: Vec::new(),
            error: Some(error.into()),
        }
    }

    #[must_use]
    pub fn total_products(&self) -> usize {
        self.items.len()
    }
}

/// Per-source results of a multi-storefront search, in configuration order.
///
/// `results` serializes as an object keyed by source name, in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub search_term: String,
    #[serde(
        serialize_with = "serialize_by_source",
        deserialize_with = "deserialize_by_source"
    )]
    pub results: Vec<SourceQueryResult>,
}

fn serialize_by_source<S: Serializer>(
    results: &[SourceQueryResult],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(results.len()))?;
    for result in results {
        map.serialize_entry(&result.source_name, result)?;
    }
    map.end()
}

fn deserialize_by_source<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<SourceQueryResult>, D::Error> {
    struct InOrder;

    impl<'de> Visitor<'de> for InOrder {
        type Value = Vec<SourceQueryResult>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map from source name to result")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut results = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((_, result)) = access.next_entry::<String, SourceQueryResult>()? {
                results.push(result);
            }
            Ok(results)
        }
    }

    deserializer.deserialize_map(InOrder)
}

impl AggregateReport {
    #[must_use]
    pub fn new(search_term: impl Into<String>, results: Vec<SourceQueryResult>) -> Self {
        Self {
            search_term: search_term.into(),
            results,
        }
    }

    #[must_use]
    pub fn get(&self, source_name: &str) -> Option<&SourceQueryResult> {
        self.results.iter().find(|r| r.source_name == source_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SourceQueryResult)> {
        self.results.iter().map(|r| (r.source_name.as_str(), r))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    #[must_use]
    pub fn failed_sources(&self) -> usize {
        self.results.iter().filter(|r| !r.success).count()
    }

    #[must_use]
    pub fn total_products(&self) -> usize {
        self.results.iter().map(SourceQueryResult::total_products).sum()
    }
}
