//! "Load more" pagination until the item count stops growing.
//!
//! Each iteration counts the visible items with the item chain. The loop ends
//! on a repeated count or a missing load-more control and never runs more
//! than `iteration_cap` times. The first count is compared against zero, so
//! an empty page converges immediately.

use gondola_core::{LocatorChain, Timeouts};

use crate::driver::{Page, Scope};
use crate::error::DriverError;
use crate::resolver::{resolve, resolve_all};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSnapshot {
    pub item_count: usize,
    pub iteration: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Item count equal to the previous iteration's.
    Converged,
    /// No load-more control within the load-more timeout.
    NoLoadMore,
    IterationCap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationOutcome {
    pub iterations: u32,
    pub triggers: u32,
    pub stop_reason: StopReason,
    pub last_snapshot: Option<PageSnapshot>,
}

/// Clicks the load-more control until the result set is complete.
///
/// `timeouts.load_more()` is both the lookup timeout for the control and the
/// pause after each click.
///
/// # Errors
///
/// Returns [`DriverError`] if scrolling to or clicking the control fails.
pub async fn load_all<P: Page>(
    page: &P,
    items: &LocatorChain,
    load_more: &LocatorChain,
    timeouts: &Timeouts,
    iteration_cap: u32,
) -> Result<PaginationOutcome, DriverError> {
    let mut previous_count = 0;
    let mut triggers = 0;
    let mut last_snapshot = None;

    for iteration in 1..=iteration_cap {
        let snapshot = PageSnapshot {
            item_count: resolve_all(page, Scope::Document, items).await.len(),
            iteration,
        };
        last_snapshot = Some(snapshot);
        tracing::debug!(iteration, item_count = snapshot.item_count, "pagination iteration");

        let stop = move |stop_reason| PaginationOutcome {
            iterations: iteration,
            triggers,
            stop_reason,
            last_snapshot,
        };

        if snapshot.item_count == previous_count {
            return Ok(stop(StopReason::Converged));
        }
        previous_count = snapshot.item_count;

        let Some(control) = resolve(page, Scope::Document, load_more, timeouts.load_more()).await
        else {
            return Ok(stop(StopReason::NoLoadMore));
        };

        page.scroll_into_view(&control.element).await?;
        page.click(&control.element).await?;
        triggers += 1;
        crate::session::settle(timeouts.load_more()).await;
    }

    Ok(PaginationOutcome {
        iterations: iteration_cap,
        triggers,
        stop_reason: StopReason::IterationCap,
        last_snapshot,
    })
}
