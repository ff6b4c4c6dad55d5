pub mod app_config;
pub mod config;
pub mod error;
pub mod format;
pub mod items;
pub mod list;
pub mod pricing;
pub mod sources;

pub use app_config::{AppConfig, BrowserSettings, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use format::{format_report, format_result};
pub use items::{
    AggregateReport, ExtractedItem, SourceQueryResult, NAME_NOT_FOUND, PRICE_NOT_FOUND,
};
pub use list::{AddOutcome, ListEntry, ListError, ShoppingList};
pub use pricing::{format_brl, parse_brl, sum_prices_by_store, PriceParseError, StoreTotals};
pub use sources::{
    load_sources, parse_sources, LocatorChain, Locators, SourceConfig, SourcesFile, Timeouts,
};
