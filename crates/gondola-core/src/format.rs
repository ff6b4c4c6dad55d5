//! Plain-text rendering of search results.

use std::fmt::Write as _;

use crate::items::{AggregateReport, SourceQueryResult};

/// Renders one source's result as human-readable text.
#[must_use]
pub fn format_result(result: &SourceQueryResult) -> String {
    let mut out = String::new();

    if !result.success {
        let _ = write!(
            out,
            "Search failed for '{}':\nError: {}",
            result.search_term,
            result.error.as_deref().unwrap_or("Unknown error")
        );
        return out;
    }

    let _ = writeln!(out, "Search Results for '{}':", result.search_term);
    let _ = writeln!(out, "Total products found: {}\n", result.total_products());

    if result.items.is_empty() {
        out.push_str("No products found for this search term.");
        return out;
    }

    for (i, item) in result.items.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, item.name);
        let _ = writeln!(out, "   Price: {}", item.price);
        if !item.unit_price.is_empty() {
            let _ = writeln!(out, "   Unit Price: {}", item.unit_price);
        }
        out.push('\n');
    }

    out
}

/// Renders every source of an aggregate report, in report order.
#[must_use]
pub fn format_report(report: &AggregateReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Results for '{}' across {} sources ({} failed)\n",
        report.search_term,
        report.len(),
        report.failed_sources()
    );

    for (name, result) in report.iter() {
        let _ = writeln!(out, "=== {name} ===");
        out.push_str(format_result(result).trim_end());
        out.push_str("\n\n");
    }

    out
}
