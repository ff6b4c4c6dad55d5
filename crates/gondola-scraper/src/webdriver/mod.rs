//! [`Browser`] backed by a W3C WebDriver endpoint through `thirtyfour`.
//!
//! Works with chromedriver, a Selenium grid, or anything speaking the same
//! protocol. Every [`WebDriverPage`] is its own WebDriver session, so pages
//! never share cookies or navigation state.

mod page;
mod pattern;

use std::time::Duration;

use async_trait::async_trait;
use gondola_core::{AppConfig, BrowserSettings};
use thirtyfour::prelude::*;
use thirtyfour::{ChromeCapabilities, ChromiumLikeCapabilities};

use crate::driver::Browser;
use crate::error::DriverError;

pub use page::WebDriverPage;

/// Opens one WebDriver session per page.
#[derive(Debug, Clone)]
pub struct WebDriverBrowser {
    webdriver_url: String,
    session_timeout: Duration,
    args: Vec<String>,
}

impl WebDriverBrowser {
    /// Creates a browser for the WebDriver server at `webdriver_url`.
    ///
    /// `timeout_secs` bounds session creation, which includes the browser
    /// launch on the driver side.
    #[must_use]
    pub fn new(webdriver_url: &str, timeout_secs: u64, settings: &BrowserSettings) -> Self {
        let mut args = settings.args.clone();
        args.push(format!(
            "--window-size={},{}",
            settings.window_width, settings.window_height
        ));
        args.push(format!("--user-agent={}", settings.user_agent));

        Self {
            webdriver_url: webdriver_url.trim_end_matches('/').to_string(),
            session_timeout: Duration::from_secs(timeout_secs),
            args,
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.webdriver_url,
            config.webdriver_timeout_secs,
            &config.browser,
        )
    }

    fn capabilities(&self) -> Result<ChromeCapabilities, DriverError> {
        let mut caps = DesiredCapabilities::chrome();
        for arg in &self.args {
            caps.add_arg(arg)?;
        }
        Ok(caps)
    }
}

#[async_trait]
impl Browser for WebDriverBrowser {
    type Page = WebDriverPage;

    async fn new_page(&self) -> Result<WebDriverPage, DriverError> {
        let caps = self.capabilities()?;
        let driver = tokio::time::timeout(
            self.session_timeout,
            WebDriver::new(self.webdriver_url.as_str(), caps),
        )
        .await
        .map_err(|_| DriverError::Timeout {
            operation: "new session".to_string(),
            timeout_ms: u64::try_from(self.session_timeout.as_millis()).unwrap_or(u64::MAX),
        })??;

        tracing::debug!(webdriver_url = %self.webdriver_url, "opened webdriver session");
        Ok(WebDriverPage::new(driver))
    }
}
