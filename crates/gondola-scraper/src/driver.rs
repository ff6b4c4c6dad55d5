//! DOM automation capability consumed by the extraction engine.
//!
//! The engine only ever talks to these two traits. [`crate::webdriver`]
//! provides a W3C WebDriver implementation; tests use an in-memory mock.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::DriverError;

/// Where a query runs: the whole document or the subtree under one element.
#[derive(Debug)]
pub enum Scope<'a, E> {
    Document,
    Within(&'a E),
}

impl<E> Clone for Scope<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Scope<'_, E> {}

/// Source of isolated pages. Each call to [`Browser::new_page`] must return a
/// page whose navigation state is independent of every other open page.
#[async_trait]
pub trait Browser: Send + Sync {
    type Page: Page + 'static;

    async fn new_page(&self) -> Result<Self::Page, DriverError>;
}

/// One isolated page/context.
///
/// `find_first` waits up to `timeout` for a match and returns `Ok(None)` when
/// nothing matched in time. A zero timeout is a single immediate query.
#[async_trait]
pub trait Page: Send + Sync {
    type Element: Send + Sync + 'static;

    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), DriverError>;

    async fn find_first(
        &self,
        scope: Scope<'_, Self::Element>,
        pattern: &str,
        timeout: Duration,
    ) -> Result<Option<Self::Element>, DriverError>;

    async fn find_all(
        &self,
        scope: Scope<'_, Self::Element>,
        pattern: &str,
    ) -> Result<Vec<Self::Element>, DriverError>;

    async fn click(&self, element: &Self::Element) -> Result<(), DriverError>;

    async fn fill(&self, element: &Self::Element, text: &str) -> Result<(), DriverError>;

    async fn scroll_into_view(&self, element: &Self::Element) -> Result<(), DriverError>;

    /// Raw `textContent` of the element, untrimmed.
    async fn text_content(&self, element: &Self::Element) -> Result<Option<String>, DriverError>;

    /// Presses Enter in the focused element.
    async fn submit_key(&self) -> Result<(), DriverError>;

    /// Releases the page. Called exactly once per page by the session.
    async fn close(&self) -> Result<(), DriverError>;
}
