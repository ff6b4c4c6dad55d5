use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thirtyfour::prelude::*;
use tokio::time::Instant;

use super::pattern::{parse_pattern, Locator};
use crate::driver::{Page, Scope};
use crate::error::DriverError;

/// Interval between lookups while `find_first` waits for a match.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

const TEXT_CONTENT_SCRIPT: &str = "return arguments[0].textContent;";

/// One WebDriver session.
pub struct WebDriverPage {
    driver: WebDriver,
}

impl WebDriverPage {
    pub(crate) fn new(driver: WebDriver) -> Self {
        Self { driver }
    }

    /// All current matches of `locator`, with the text filter applied.
    async fn query(
        &self,
        scope: Scope<'_, WebElement>,
        locator: &Locator,
    ) -> Result<Vec<WebElement>, DriverError> {
        let found = match scope {
            Scope::Document => self.driver.find_all(locator.by()).await?,
            Scope::Within(element) => element.find_all(locator.by()).await?,
        };
        if locator.has_text.is_none() {
            return Ok(found);
        }

        let mut kept = Vec::new();
        for element in found {
            let text = self.text_content(&element).await?.unwrap_or_default();
            if locator.accepts(&text) {
                kept.push(element);
            }
        }
        Ok(kept)
    }
}

#[async_trait]
impl Page for WebDriverPage {
    type Element = WebElement;

    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), DriverError> {
        self.driver.set_page_load_timeout(timeout).await?;
        self.driver.goto(url).await?;
        Ok(())
    }

    async fn find_first(
        &self,
        scope: Scope<'_, WebElement>,
        pattern: &str,
        timeout: Duration,
    ) -> Result<Option<WebElement>, DriverError> {
        let locator = parse_pattern(pattern)?;
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(element) = self.query(scope, &locator).await?.into_iter().next() {
                return Ok(Some(element));
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            tokio::time::sleep(POLL_INTERVAL.min(deadline - now)).await;
        }
    }

    async fn find_all(
        &self,
        scope: Scope<'_, WebElement>,
        pattern: &str,
    ) -> Result<Vec<WebElement>, DriverError> {
        let locator = parse_pattern(pattern)?;
        self.query(scope, &locator).await
    }

    async fn click(&self, element: &WebElement) -> Result<(), DriverError> {
        element.click().await?;
        Ok(())
    }

    async fn fill(&self, element: &WebElement, text: &str) -> Result<(), DriverError> {
        element.clear().await?;
        element.send_keys(text).await?;
        Ok(())
    }

    async fn scroll_into_view(&self, element: &WebElement) -> Result<(), DriverError> {
        element.scroll_into_view().await?;
        Ok(())
    }

    async fn text_content(&self, element: &WebElement) -> Result<Option<String>, DriverError> {
        let ret = self
            .driver
            .execute(TEXT_CONTENT_SCRIPT, vec![element.to_json()?])
            .await?;
        match ret.json() {
            Value::Null => Ok(None),
            Value::String(text) => Ok(Some(text.clone())),
            other => Err(DriverError::Command {
                command: "read textContent".to_string(),
                message: format!("unexpected script result {other}"),
            }),
        }
    }

    async fn submit_key(&self) -> Result<(), DriverError> {
        self.driver
            .active_element()
            .await?
            .send_keys(Key::Enter)
            .await?;
        Ok(())
    }

    async fn close(&self) -> Result<(), DriverError> {
        self.driver.clone().quit().await?;
        tracing::debug!("closed webdriver session");
        Ok(())
    }
}
