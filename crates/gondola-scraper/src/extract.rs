//! Field extraction from one item element.

use std::time::Duration;

use gondola_core::{ExtractedItem, LocatorChain, Locators, NAME_NOT_FOUND, PRICE_NOT_FOUND};

use crate::driver::{Page, Scope};
use crate::error::DriverError;
use crate::resolver::resolve_from;

/// Prefix used when a split price has no currency element.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "R$";

/// Trimmed text of the first pattern in `chain` whose match has non-blank text.
///
/// Item-scoped lookups are immediate queries, the item is already rendered.
///
/// # Errors
///
/// Returns [`DriverError`] if reading a matched element's text fails.
pub async fn extract_text<P: Page>(
    page: &P,
    item: &P::Element,
    chain: &LocatorChain,
) -> Result<Option<String>, DriverError> {
    let mut start = 0;
    while let Some(found) =
        resolve_from(page, Scope::Within(item), chain, start, Duration::ZERO).await
    {
        if let Some(text) = page.text_content(&found.element).await? {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_string()));
            }
        }
        start = found.pattern_index + 1;
    }
    Ok(None)
}

/// Joins split price parts as `"<symbol> <integer>[,<fraction>]"`.
#[must_use]
pub fn compose_price(integer: &str, fraction: Option<&str>, symbol: Option<&str>) -> String {
    let symbol = symbol.unwrap_or(DEFAULT_CURRENCY_SYMBOL);
    match fraction {
        Some(fraction) => format!("{symbol} {integer},{fraction}"),
        None => format!("{symbol} {integer}"),
    }
}

async fn extract_optional<P: Page>(
    page: &P,
    item: &P::Element,
    chain: Option<&LocatorChain>,
) -> Result<Option<String>, DriverError> {
    match chain {
        Some(chain) => extract_text(page, item, chain).await,
        None => Ok(None),
    }
}

/// Resolves the price: split parts first, then the plain price chain, then
/// [`PRICE_NOT_FOUND`].
///
/// # Errors
///
/// Returns [`DriverError`] if reading a matched element's text fails.
pub async fn extract_price<P: Page>(
    page: &P,
    item: &P::Element,
    locators: &Locators,
) -> Result<String, DriverError> {
    if let Some(integer) = extract_optional(page, item, locators.price_integer.as_ref()).await? {
        let fraction = extract_optional(page, item, locators.price_fraction.as_ref()).await?;
        let symbol = extract_optional(page, item, locators.price_currency.as_ref()).await?;
        return Ok(compose_price(&integer, fraction.as_deref(), symbol.as_deref()));
    }

    Ok(extract_text(page, item, &locators.price)
        .await?
        .unwrap_or_else(|| PRICE_NOT_FOUND.to_string()))
}

/// Builds an [`ExtractedItem`] with sentinels for missing fields.
///
/// A unit price identical to the price is dropped.
///
/// # Errors
///
/// Returns [`DriverError`] if reading a matched element's text fails.
pub async fn extract_item<P: Page>(
    page: &P,
    item: &P::Element,
    locators: &Locators,
) -> Result<ExtractedItem, DriverError> {
    let name = extract_text(page, item, &locators.name)
        .await?
        .unwrap_or_else(|| NAME_NOT_FOUND.to_string());
    let price = extract_price(page, item, locators).await?;
    let unit_price = extract_text(page, item, &locators.unit_price)
        .await?
        .filter(|unit| *unit != price)
        .unwrap_or_default();

    Ok(ExtractedItem {
        name,
        price,
        unit_price,
    })
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
