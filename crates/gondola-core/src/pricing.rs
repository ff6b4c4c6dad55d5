//! Brazilian-real price parsing and per-store totals for the shopping list.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::list::ListEntry;

static AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,3}(?:\.\d{3})+(?:,\d+)?|\d+(?:,\d+)?").expect("valid regex"));

#[derive(Debug, thiserror::Error)]
#[error("could not parse price \"{raw}\"")]
pub struct PriceParseError {
    pub raw: String,
}

/// Parses a displayed price such as `"R$ 1.234,56"` or `"16,07"`.
///
/// Dots are thousands separators and the comma is the decimal separator.
///
/// # Errors
///
/// Returns [`PriceParseError`] when no amount can be found in `raw`.
pub fn parse_brl(raw: &str) -> Result<Decimal, PriceParseError> {
    let err = || PriceParseError {
        raw: raw.to_string(),
    };
    let amount = AMOUNT.find(raw).ok_or_else(err)?.as_str();
    let normalized = amount.replace('.', "").replace(',', ".");
    normalized.parse::<Decimal>().map_err(|_| err())
}

/// Formats an amount as `"R$ 1.234,56"`.
#[must_use]
pub fn format_brl(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let fixed = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("R$ {sign}{grouped},{frac_part}")
}

/// Totals of `price * units` per store, in first-seen store order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreTotals {
    pub by_store: Vec<(String, Decimal)>,
    pub grand_total: Decimal,
}

/// Sums list entries by store.
///
/// # Errors
///
/// Returns [`PriceParseError`] for the first entry whose price cannot be parsed.
pub fn sum_prices_by_store(entries: &[ListEntry]) -> Result<StoreTotals, PriceParseError> {
    let mut by_store: Vec<(String, Decimal)> = Vec::new();
    let mut grand_total = Decimal::ZERO;

    for entry in entries {
        let line_total = parse_brl(&entry.price)? * entry.units;
        grand_total += line_total;
        match by_store.iter_mut().find(|(store, _)| *store == entry.store) {
            Some((_, total)) => *total += line_total,
            None => by_store.push((entry.store.clone(), line_total)),
        }
    }

    Ok(StoreTotals {
        by_store,
        grand_total,
    })
}
