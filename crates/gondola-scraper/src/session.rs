//! One search → paginate → extract pipeline against one storefront.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt as _;
use gondola_core::{ExtractedItem, SourceConfig, SourceQueryResult};

use crate::driver::{Browser, Page, Scope};
use crate::error::ScraperError;
use crate::extract::extract_item;
use crate::pagination::load_all;
use crate::resolver::{resolve, resolve_all};

pub(crate) async fn settle(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

/// Runs one search against `config` on a fresh page of `browser`.
///
/// Never fails: every error becomes a result with `success = false`. The
/// page is closed on every path, including a panic inside the pipeline. A
/// panic while extracting one item only drops that item.
pub async fn scrape_one_source<B: Browser>(
    browser: &B,
    config: &SourceConfig,
    search_term: &str,
) -> SourceQueryResult {
    let term = search_term.trim();
    if term.is_empty() {
        return SourceQueryResult::failed(
            &config.name,
            search_term,
            "Search term cannot be empty",
        );
    }

    tracing::info!(source = %config.name, search_term = term, "starting source session");

    let page = match browser.new_page().await {
        Ok(page) => page,
        Err(e) => {
            tracing::error!(source = %config.name, error = %e, "could not open page");
            return SourceQueryResult::failed(&config.name, term, ScraperError::from(e).to_string());
        }
    };

    let outcome = AssertUnwindSafe(run_pipeline(&page, config, term))
        .catch_unwind()
        .await;

    if let Err(e) = page.close().await {
        tracing::warn!(source = %config.name, error = %e, "failed to close page");
    }

    let error = match outcome {
        Ok(Ok(items)) => {
            tracing::info!(source = %config.name, item_count = items.len(), "source session finished");
            return SourceQueryResult::succeeded(&config.name, term, items);
        }
        Ok(Err(e)) => e,
        Err(payload) => ScraperError::Panicked(panic_message(payload.as_ref())),
    };

    tracing::error!(source = %config.name, error = %error, "source session failed");
    SourceQueryResult::failed(&config.name, term, error.to_string())
}

async fn run_pipeline<P: Page>(
    page: &P,
    config: &SourceConfig,
    term: &str,
) -> Result<Vec<ExtractedItem>, ScraperError> {
    let locators = &config.locators;
    let timeouts = &config.timeouts;

    page.navigate(&config.base_url, timeouts.page_load())
        .await
        .map_err(|source| ScraperError::Navigation {
            url: config.base_url.clone(),
            source,
        })?;
    settle(timeouts.settle()).await;

    let input = resolve(
        page,
        Scope::Document,
        &locators.search_input,
        timeouts.element_wait(),
    )
    .await
    .ok_or_else(|| ScraperError::SearchInputNotFound {
        source_name: config.name.clone(),
    })?;
    page.click(&input.element).await?;
    page.fill(&input.element, term).await?;
    page.submit_key().await?;

    if resolve(
        page,
        Scope::Document,
        &locators.item_container,
        timeouts.element_wait(),
    )
    .await
    .is_none()
    {
        tracing::debug!(source = %config.name, "no items appeared after search");
    }
    settle(timeouts.settle()).await;

    let pagination = load_all(
        page,
        &locators.item_container,
        &locators.load_more,
        timeouts,
        config.max_pagination_iterations,
    )
    .await?;
    tracing::debug!(
        source = %config.name,
        iterations = pagination.iterations,
        triggers = pagination.triggers,
        stop_reason = ?pagination.stop_reason,
        "pagination finished"
    );

    let elements = resolve_all(page, Scope::Document, &locators.item_container).await;
    let mut items = Vec::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        match AssertUnwindSafe(extract_item(page, element, locators))
            .catch_unwind()
            .await
        {
            Ok(Ok(item)) => items.push(item),
            Ok(Err(e)) => {
                tracing::warn!(source = %config.name, index, error = %e, "skipping item");
            }
            Err(payload) => {
                tracing::warn!(
                    source = %config.name,
                    index,
                    panic = %panic_message(payload.as_ref()),
                    "skipping item after panic"
                );
            }
        }
    }

    Ok(items)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
