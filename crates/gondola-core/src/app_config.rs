use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Browser launch settings handed to the automation backend for every new page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserSettings {
    pub args: Vec<String>,
    pub user_agent: String,
    pub window_width: u32,
    pub window_height: u32,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub sources_path: PathBuf,
    pub list_path: PathBuf,
    pub webdriver_url: String,
    pub webdriver_timeout_secs: u64,
    pub browser: BrowserSettings,
}
