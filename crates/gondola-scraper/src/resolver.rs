//! Ordered fallback lookup over a [`LocatorChain`].
//!
//! A pattern whose lookup errors or times out is "no match" and the next
//! pattern is tried. Errors never leave this module.

use std::time::Duration;

use gondola_core::LocatorChain;

use crate::driver::{Page, Scope};

/// A resolved element and the chain index of the pattern that found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<E> {
    pub element: E,
    pub pattern_index: usize,
}

/// Returns the first element matched by any pattern of `chain`, in order.
///
/// Patterns after the matching one are never evaluated.
pub async fn resolve<P: Page>(
    page: &P,
    scope: Scope<'_, P::Element>,
    chain: &LocatorChain,
    timeout: Duration,
) -> Option<Match<P::Element>> {
    resolve_from(page, scope, chain, 0, timeout).await
}

/// Like [`resolve`], starting at chain index `start`.
pub async fn resolve_from<P: Page>(
    page: &P,
    scope: Scope<'_, P::Element>,
    chain: &LocatorChain,
    start: usize,
    timeout: Duration,
) -> Option<Match<P::Element>> {
    for (index, pattern) in chain.iter().enumerate().skip(start) {
        match page.find_first(scope, pattern, timeout).await {
            Ok(Some(element)) => {
                return Some(Match {
                    element,
                    pattern_index: index,
                })
            }
            Ok(None) => {
                tracing::debug!(pattern = %pattern, index, "locator pattern matched nothing");
            }
            Err(error) => {
                tracing::debug!(pattern = %pattern, index, %error, "locator pattern lookup failed");
            }
        }
    }
    None
}

/// Every element matched by the first pattern that yields a non-empty list.
///
/// Returns an empty vector when no pattern matches.
pub async fn resolve_all<P: Page>(
    page: &P,
    scope: Scope<'_, P::Element>,
    chain: &LocatorChain,
) -> Vec<P::Element> {
    for (index, pattern) in chain.iter().enumerate() {
        match page.find_all(scope, pattern).await {
            Ok(elements) if !elements.is_empty() => return elements,
            Ok(_) => {
                tracing::debug!(pattern = %pattern, index, "locator pattern matched no elements");
            }
            Err(error) => {
                tracing::debug!(pattern = %pattern, index, %error, "locator pattern lookup failed");
            }
        }
    }
    Vec::new()
}
