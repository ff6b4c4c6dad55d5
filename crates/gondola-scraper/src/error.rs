use thirtyfour::error::WebDriverError;
use thiserror::Error;

/// Failures reported by a DOM automation backend.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("browser driver error: {0}")]
    WebDriver(#[from] WebDriverError),

    #[error("{command} failed: {message}")]
    Command { command: String, message: String },

    #[error("{operation} timed out after {timeout_ms}ms")]
    Timeout { operation: String, timeout_ms: u64 },

    #[error("invalid locator pattern \"{pattern}\": {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// Failures that end a source session. The `Display` text becomes the
/// failed result's error message.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("navigation to {url} failed: {source}")]
    Navigation {
        url: String,
        #[source]
        source: DriverError,
    },

    #[error("could not find search input on {source_name}")]
    SearchInputNotFound { source_name: String },

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error("source session panicked: {0}")]
    Panicked(String),
}
