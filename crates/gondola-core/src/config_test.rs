use std::collections::HashMap;
use std::env::VarError;
use std::path::PathBuf;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("unknown").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "GONDOLA_ENV"));
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.sources_path, PathBuf::from("./config/sources.yaml"));
    assert_eq!(cfg.list_path, PathBuf::from("./product_list.json"));
    assert_eq!(cfg.webdriver_url, "http://localhost:4444");
    assert_eq!(cfg.webdriver_timeout_secs, 60);
    assert_eq!(cfg.browser.user_agent, DEFAULT_USER_AGENT);
    assert_eq!(
        cfg.browser.args,
        vec!["--headless=new", "--disable-dev-shm-usage", "--no-sandbox"]
    );
    assert_eq!(cfg.browser.window_width, 1920);
    assert_eq!(cfg.browser.window_height, 1080);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("GONDOLA_ENV", "production");
    map.insert("GONDOLA_LOG_LEVEL", "debug");
    map.insert("GONDOLA_SOURCES_PATH", "/etc/gondola/sources.yaml");
    map.insert("GONDOLA_LIST_PATH", "/var/lib/gondola/list.json");
    map.insert("GONDOLA_WEBDRIVER_URL", "http://chromedriver:9515");
    map.insert("GONDOLA_BROWSER_USER_AGENT", "gondola-test/1.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.sources_path, PathBuf::from("/etc/gondola/sources.yaml"));
    assert_eq!(cfg.list_path, PathBuf::from("/var/lib/gondola/list.json"));
    assert_eq!(cfg.webdriver_url, "http://chromedriver:9515");
    assert_eq!(cfg.browser.user_agent, "gondola-test/1.0");
}

#[test]
fn build_app_config_fails_with_invalid_env() {
    let mut map = HashMap::new();
    map.insert("GONDOLA_ENV", "staging");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GONDOLA_ENV"),
        "expected InvalidEnvVar(GONDOLA_ENV), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_non_http_webdriver_url() {
    let mut map = HashMap::new();
    map.insert("GONDOLA_WEBDRIVER_URL", "localhost:4444");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GONDOLA_WEBDRIVER_URL"),
        "expected InvalidEnvVar(GONDOLA_WEBDRIVER_URL), got: {result:?}"
    );
}

#[test]
fn webdriver_timeout_secs_override() {
    let mut map = HashMap::new();
    map.insert("GONDOLA_WEBDRIVER_TIMEOUT_SECS", "15");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.webdriver_timeout_secs, 15);
}

#[test]
fn webdriver_timeout_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("GONDOLA_WEBDRIVER_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GONDOLA_WEBDRIVER_TIMEOUT_SECS"),
        "expected InvalidEnvVar(GONDOLA_WEBDRIVER_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn browser_args_drop_empty_entries() {
    let mut map = HashMap::new();
    map.insert("GONDOLA_BROWSER_ARGS", " --no-sandbox, ,--mute-audio,");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.browser.args, vec!["--no-sandbox", "--mute-audio"]);
}

#[test]
fn browser_args_may_be_empty() {
    let mut map = HashMap::new();
    map.insert("GONDOLA_BROWSER_ARGS", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.browser.args.is_empty());
}

#[test]
fn browser_window_override() {
    let mut map = HashMap::new();
    map.insert("GONDOLA_BROWSER_WINDOW", "1280X720");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.browser.window_width, 1280);
    assert_eq!(cfg.browser.window_height, 720);
}

#[test]
fn browser_window_invalid() {
    for raw in ["1280", "wide x tall", "0x720"] {
        let mut map = HashMap::new();
        map.insert("GONDOLA_BROWSER_WINDOW", raw);
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GONDOLA_BROWSER_WINDOW"),
            "expected InvalidEnvVar(GONDOLA_BROWSER_WINDOW) for {raw:?}, got: {result:?}"
        );
    }
}
