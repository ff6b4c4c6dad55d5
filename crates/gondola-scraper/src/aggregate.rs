//! Concurrent search across several storefronts.

use std::sync::Arc;

use gondola_core::{AggregateReport, SourceConfig, SourceQueryResult};

use crate::driver::Browser;
use crate::session::scrape_one_source;

/// Searches every source in `configs` concurrently, one task per source.
///
/// The report holds exactly one result per config, in config order. A task
/// that dies (for example by panicking outside the session) becomes that
/// source's failed result.
pub async fn aggregate<B>(
    browser: Arc<B>,
    search_term: &str,
    configs: &[SourceConfig],
) -> AggregateReport
where
    B: Browser + 'static,
{
    let handles: Vec<_> = configs
        .iter()
        .map(|config| {
            let browser = Arc::clone(&browser);
            let config = config.clone();
            let term = search_term.to_string();
            tokio::spawn(async move { scrape_one_source(browser.as_ref(), &config, &term).await })
        })
        .collect();

    let term = search_term.trim();
    let outcomes = futures::future::join_all(handles).await;
    let results = configs
        .iter()
        .zip(outcomes)
        .map(|(config, outcome)| match outcome {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(source = %config.name, error = %e, "source task failed");
                SourceQueryResult::failed(&config.name, term, format!("source task failed: {e}"))
            }
        })
        .collect();

    let report = AggregateReport::new(term, results);
    tracing::info!(
        search_term = term,
        sources = report.len(),
        failed = report.failed_sources(),
        total_products = report.total_products(),
        "aggregate search finished"
    );
    report
}
