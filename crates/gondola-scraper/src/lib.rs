//! Product extraction engine for storefront search pages.
//!
//! One [`SourceConfig`](gondola_core::SourceConfig) describes where a
//! storefront keeps its search box, product cards and "load more" button.
//! [`scrape_one_source`] runs a search against one storefront and
//! [`aggregate`] runs it against many at once. DOM access goes through the
//! [`Browser`]/[`Page`] traits; [`webdriver`] is the bundled backend.

pub mod aggregate;
pub mod driver;
pub mod error;
pub mod extract;
pub mod pagination;
pub mod resolver;
pub mod session;
pub mod webdriver;

#[cfg(test)]
pub(crate) mod test_support;

pub use aggregate::aggregate;
pub use driver::{Browser, Page, Scope};
pub use error::{DriverError, ScraperError};
pub use extract::{compose_price, extract_item, extract_price, extract_text};
pub use pagination::{load_all, PageSnapshot, PaginationOutcome, StopReason};
pub use resolver::{resolve, resolve_all, resolve_from, Match};
pub use session::scrape_one_source;
pub use webdriver::{WebDriverBrowser, WebDriverPage};
