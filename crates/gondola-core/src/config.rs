use crate::app_config::{AppConfig, BrowserSettings, Environment};
use crate::ConfigError;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const DEFAULT_BROWSER_ARGS: &str = "--headless=new,--disable-dev-shm-usage,--no-sandbox";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can feed a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("GONDOLA_ENV", "development"))?;
    let log_level = or_default("GONDOLA_LOG_LEVEL", "info");
    let sources_path = PathBuf::from(or_default(
        "GONDOLA_SOURCES_PATH",
        "./config/sources.yaml",
    ));
    let list_path = PathBuf::from(or_default("GONDOLA_LIST_PATH", "./product_list.json"));

    let webdriver_url = or_default("GONDOLA_WEBDRIVER_URL", "http://localhost:4444");
    if !(webdriver_url.starts_with("http://") || webdriver_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "GONDOLA_WEBDRIVER_URL".to_string(),
            reason: format!("expected an http(s) URL, got \"{webdriver_url}\""),
        });
    }
    let webdriver_timeout_secs = parse_u64("GONDOLA_WEBDRIVER_TIMEOUT_SECS", "60")?;

    let user_agent = or_default("GONDOLA_BROWSER_USER_AGENT", DEFAULT_USER_AGENT);
    let args = parse_browser_args(&or_default("GONDOLA_BROWSER_ARGS", DEFAULT_BROWSER_ARGS));
    let (window_width, window_height) =
        parse_window(&or_default("GONDOLA_BROWSER_WINDOW", "1920x1080"))?;

    Ok(AppConfig {
        env,
        log_level,
        sources_path,
        list_path,
        webdriver_url,
        webdriver_timeout_secs,
        browser: BrowserSettings {
            args,
            user_agent,
            window_width,
            window_height,
        },
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "GONDOLA_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

/// Splits a comma-separated argument list, dropping empty entries.
fn parse_browser_args(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Parses `WIDTHxHEIGHT` (e.g. `1920x1080`).
fn parse_window(raw: &str) -> Result<(u32, u32), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "GONDOLA_BROWSER_WINDOW".to_string(),
        reason,
    };

    let (w, h) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| invalid(format!("expected WIDTHxHEIGHT, got \"{raw}\"")))?;
    let width = w.trim().parse::<u32>().map_err(|e| invalid(e.to_string()))?;
    let height = h.trim().parse::<u32>().map_err(|e| invalid(e.to_string()))?;
    if width == 0 || height == 0 {
        return Err(invalid("window dimensions must be non-zero".to_string()));
    }
    Ok((width, height))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
