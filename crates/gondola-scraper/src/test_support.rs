//! In-memory DOM for engine tests, with a shared call log.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use gondola_core::{LocatorChain, Locators, SourceConfig, Timeouts};

use crate::driver::{Browser, Page, Scope};
use crate::error::DriverError;

pub(crate) fn chain(patterns: &[&str]) -> LocatorChain {
    LocatorChain::new(patterns.iter().copied()).expect("non-empty test chain")
}

/// Locators used by every mock storefront.
pub(crate) fn locators() -> Locators {
    Locators {
        search_input: chain(&["#search"]),
        item_container: chain(&[".card"]),
        load_more: chain(&[".more"]),
        name: chain(&[".name"]),
        price: chain(&[".price"]),
        unit_price: chain(&[".unit"]),
        price_integer: None,
        price_fraction: None,
        price_currency: None,
    }
}

/// A config for `url` with [`locators`] and no waiting.
pub(crate) fn source(name: &str, url: &str) -> SourceConfig {
    SourceConfig::new(name, url, locators()).with_timeouts(Timeouts::immediate())
}

/// A storefront with a search box and `.card` items carrying [`locators`] fields.
pub(crate) fn storefront() -> MockSite {
    MockSite::new(".card").search_input("#search")
}

/// An item with name, price and unit price under [`locators`] patterns.
pub(crate) fn product(name: &str, price: &str, unit_price: &str) -> MockItem {
    MockItem::new()
        .field(".name", name)
        .field(".price", price)
        .field(".unit", unit_price)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MockElement {
    SearchInput,
    LoadMore,
    Item(usize),
    Field { item: usize, pattern: String },
}

#[derive(Debug, Clone)]
enum FieldText {
    Text(String),
    Stale,
    Panic,
}

/// One product card: field patterns mapped to their text.
#[derive(Debug, Clone, Default)]
pub(crate) struct MockItem {
    fields: Vec<(String, FieldText)>,
}

impl MockItem {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn field(mut self, pattern: &str, text: &str) -> Self {
        self.fields
            .push((pattern.to_string(), FieldText::Text(text.to_string())));
        self
    }

    /// Matches `pattern` but fails when its text is read.
    pub(crate) fn stale(mut self, pattern: &str) -> Self {
        self.fields.push((pattern.to_string(), FieldText::Stale));
        self
    }

    /// Matches `pattern` but panics when its text is read.
    pub(crate) fn crashing(mut self, pattern: &str) -> Self {
        self.fields.push((pattern.to_string(), FieldText::Panic));
        self
    }

    fn lookup(&self, pattern: &str) -> Option<&FieldText> {
        self.fields
            .iter()
            .find(|(p, _)| p == pattern)
            .map(|(_, text)| text)
    }
}

/// A storefront as seen through the driver.
#[derive(Debug, Clone, Default)]
pub(crate) struct MockSite {
    search_input: Option<String>,
    item_pattern: String,
    items: Vec<MockItem>,
    counts: Vec<usize>,
    load_more: Option<String>,
    load_more_lookups: Option<usize>,
    failing: Vec<String>,
    navigation_error: bool,
    navigation_panic: bool,
}

impl MockSite {
    pub(crate) fn new(item_pattern: &str) -> Self {
        Self {
            item_pattern: item_pattern.to_string(),
            ..Self::default()
        }
    }

    pub(crate) fn search_input(mut self, pattern: &str) -> Self {
        self.search_input = Some(pattern.to_string());
        self
    }

    pub(crate) fn item(mut self, item: MockItem) -> Self {
        self.items.push(item);
        self
    }

    /// Visible item count per `find_all` on the item pattern; the last
    /// value repeats once the sequence is exhausted.
    pub(crate) fn counts(mut self, counts: &[usize]) -> Self {
        self.counts = counts.to_vec();
        self
    }

    /// A load-more control that is always present.
    pub(crate) fn load_more(mut self, pattern: &str) -> Self {
        self.load_more = Some(pattern.to_string());
        self.load_more_lookups = None;
        self
    }

    /// A load-more control found by the first `lookups` lookups only.
    pub(crate) fn load_more_for(mut self, pattern: &str, lookups: usize) -> Self {
        self.load_more = Some(pattern.to_string());
        self.load_more_lookups = Some(lookups);
        self
    }

    /// Lookups of `pattern` return a driver error.
    pub(crate) fn failing(mut self, pattern: &str) -> Self {
        self.failing.push(pattern.to_string());
        self
    }

    pub(crate) fn navigation_error(mut self) -> Self {
        self.navigation_error = true;
        self
    }

    pub(crate) fn navigation_panic(mut self) -> Self {
        self.navigation_panic = true;
        self
    }

    fn visible_count(&self, query: usize) -> usize {
        match self.counts.len() {
            0 => self.items.len(),
            len => self.counts[query.min(len - 1)],
        }
    }

    fn lookup_error(&self, pattern: &str) -> Option<DriverError> {
        self.failing.iter().any(|p| p == pattern).then(|| DriverError::Command {
            command: "find element".to_string(),
            message: format!("invalid selector {pattern}"),
        })
    }
}

/// Calls made against every page of one [`MockBrowser`].
#[derive(Debug, Default)]
pub(crate) struct CallLog {
    calls: Mutex<Vec<String>>,
    opened: AtomicUsize,
    closed: AtomicUsize,
}

impl CallLog {
    fn record(&self, call: String) {
        self.calls.lock().expect("call log lock").push(call);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("call log lock").clone()
    }

    /// Number of recorded calls starting with `prefix`.
    pub(crate) fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub(crate) fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub(crate) fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Default)]
pub(crate) struct MockBrowser {
    sites: HashMap<String, Arc<MockSite>>,
    log: Arc<CallLog>,
}

impl MockBrowser {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn site(mut self, url: &str, site: MockSite) -> Self {
        self.sites.insert(url.to_string(), Arc::new(site));
        self
    }

    pub(crate) fn log(&self) -> Arc<CallLog> {
        Arc::clone(&self.log)
    }
}

#[async_trait]
impl Browser for MockBrowser {
    type Page = MockPage;

    async fn new_page(&self) -> Result<MockPage, DriverError> {
        self.log.record("new_page".to_string());
        self.log.opened.fetch_add(1, Ordering::SeqCst);
        Ok(MockPage {
            sites: self.sites.clone(),
            log: Arc::clone(&self.log),
            state: Mutex::new(PageState::default()),
        })
    }
}

#[derive(Debug, Default)]
struct PageState {
    site: Option<Arc<MockSite>>,
    count_queries: usize,
    load_more_lookups: usize,
}

#[derive(Debug)]
pub(crate) struct MockPage {
    sites: HashMap<String, Arc<MockSite>>,
    log: Arc<CallLog>,
    state: Mutex<PageState>,
}

impl MockPage {
    fn current_site(&self) -> Option<Arc<MockSite>> {
        self.state.lock().expect("page state lock").site.clone()
    }
}

/// Opens a page on `site` that has already navigated to it.
pub(crate) async fn open_page(site: MockSite) -> (MockPage, Arc<CallLog>) {
    let browser = MockBrowser::new().site("https://shop.test", site);
    let log = browser.log();
    let page = browser.new_page().await.expect("mock page");
    page.navigate("https://shop.test", Duration::ZERO)
        .await
        .expect("mock navigation");
    (page, log)
}

#[async_trait]
impl Page for MockPage {
    type Element = MockElement;

    async fn navigate(&self, url: &str, _timeout: Duration) -> Result<(), DriverError> {
        self.log.record(format!("navigate {url}"));
        let site = self.sites.get(url).cloned().ok_or_else(|| DriverError::Command {
            command: "navigate".to_string(),
            message: format!("net::ERR_NAME_NOT_RESOLVED at {url}"),
        })?;
        if site.navigation_panic {
            panic!("renderer crashed loading {url}");
        }
        if site.navigation_error {
            return Err(DriverError::Timeout {
                operation: "navigate".to_string(),
                timeout_ms: 30_000,
            });
        }
        let mut state = self.state.lock().expect("page state lock");
        *state = PageState {
            site: Some(site),
            ..PageState::default()
        };
        Ok(())
    }

    async fn find_first(
        &self,
        scope: Scope<'_, MockElement>,
        pattern: &str,
        _timeout: Duration,
    ) -> Result<Option<MockElement>, DriverError> {
        let Some(site) = self.current_site() else {
            return Ok(None);
        };

        match scope {
            Scope::Document => {
                self.log.record(format!("find_first {pattern}"));
                if let Some(e) = site.lookup_error(pattern) {
                    return Err(e);
                }
                if site.search_input.as_deref() == Some(pattern) {
                    return Ok(Some(MockElement::SearchInput));
                }
                if site.load_more.as_deref() == Some(pattern) {
                    let mut state = self.state.lock().expect("page state lock");
                    state.load_more_lookups += 1;
                    let present = site
                        .load_more_lookups
                        .is_none_or(|limit| state.load_more_lookups <= limit);
                    return Ok(present.then_some(MockElement::LoadMore));
                }
                if site.item_pattern == pattern && !site.items.is_empty() {
                    return Ok(Some(MockElement::Item(0)));
                }
                Ok(None)
            }
            Scope::Within(element) => {
                let MockElement::Item(index) = element else {
                    return Ok(None);
                };
                self.log
                    .record(format!("find_first {pattern} in item {index}"));
                if let Some(e) = site.lookup_error(pattern) {
                    return Err(e);
                }
                let found = site
                    .items
                    .get(*index)
                    .and_then(|item| item.lookup(pattern))
                    .map(|_| MockElement::Field {
                        item: *index,
                        pattern: pattern.to_string(),
                    });
                Ok(found)
            }
        }
    }

    async fn find_all(
        &self,
        scope: Scope<'_, MockElement>,
        pattern: &str,
    ) -> Result<Vec<MockElement>, DriverError> {
        self.log.record(format!("find_all {pattern}"));
        let Some(site) = self.current_site() else {
            return Ok(Vec::new());
        };
        if let Some(e) = site.lookup_error(pattern) {
            return Err(e);
        }
        if !matches!(scope, Scope::Document) || site.item_pattern != pattern {
            return Ok(Vec::new());
        }
        let mut state = self.state.lock().expect("page state lock");
        let visible = site.visible_count(state.count_queries);
        state.count_queries += 1;
        Ok((0..visible).map(MockElement::Item).collect())
    }

    async fn click(&self, element: &MockElement) -> Result<(), DriverError> {
        let target = match element {
            MockElement::LoadMore => "load_more",
            MockElement::SearchInput => "search_input",
            _ => "element",
        };
        self.log.record(format!("click {target}"));
        Ok(())
    }

    async fn fill(&self, _element: &MockElement, text: &str) -> Result<(), DriverError> {
        self.log.record(format!("fill {text}"));
        Ok(())
    }

    async fn scroll_into_view(&self, _element: &MockElement) -> Result<(), DriverError> {
        self.log.record("scroll".to_string());
        Ok(())
    }

    async fn text_content(&self, element: &MockElement) -> Result<Option<String>, DriverError> {
        let MockElement::Field { item, pattern } = element else {
            return Ok(Some(String::new()));
        };
        let site = self.current_site();
        let text = site
            .as_deref()
            .and_then(|s| s.items.get(*item))
            .and_then(|i| i.lookup(pattern));
        match text {
            Some(FieldText::Text(t)) => Ok(Some(t.clone())),
            Some(FieldText::Stale) => Err(DriverError::Command {
                command: "get text".to_string(),
                message: "stale element reference".to_string(),
            }),
            Some(FieldText::Panic) => panic!("renderer crashed reading item {item}"),
            None => Ok(None),
        }
    }

    async fn submit_key(&self) -> Result<(), DriverError> {
        self.log.record("submit".to_string());
        Ok(())
    }

    async fn close(&self) -> Result<(), DriverError> {
        self.log.record("close".to_string());
        self.log.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
