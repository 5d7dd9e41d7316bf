//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub datastore: DatastoreConfig,

    #[serde(default)]
    pub helpdesk: HelpdeskConfig,

    #[serde(default)]
    pub reports: ReportsConfig,

    #[serde(default)]
    pub assistant: AssistantConfig,

    #[serde(default)]
    pub branding: BrandingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Directory holding the compiled SPA bundle. The server falls back to
    /// API-only mode when the directory does not exist.
    #[serde(default = "default_ui_dir")]
    pub ui_dir: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_ui_dir() -> String {
    "frontdesk-ui/dist".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![
                "http://localhost:8091".to_string(),
                "http://127.0.0.1:8091".to_string(),
            ],
            ui_dir: default_ui_dir(),
        }
    }
}

/// Hosted datastore configuration
///
/// The SPA talks to the datastore directly; the server only hands the URL
/// and the public anon key to the browser via `GET /api/config`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatastoreConfig {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub anon_key: String,
}

impl DatastoreConfig {
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.anon_key.is_empty()
    }
}

/// Helpdesk API configuration
///
/// The API key is a static secret and never leaves the server; the SPA
/// reaches the helpdesk only through the `/api/helpdesk` proxy.
#[derive(Debug, Clone, Deserialize)]
pub struct HelpdeskConfig {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_helpdesk_account")]
    pub account_id: String,
}

fn default_helpdesk_account() -> String {
    "1".to_string()
}

impl Default for HelpdeskConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            account_id: default_helpdesk_account(),
        }
    }
}

impl HelpdeskConfig {
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.api_key.is_empty()
    }
}

/// AI usage/reporting API configuration
///
/// Holds the admin bearer key. Usage queries are proxied through
/// `GET /api/reports/usage` so the key never reaches a client runtime.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportsConfig {
    #[serde(default = "default_reports_url")]
    pub url: String,

    #[serde(default)]
    pub admin_key: String,
}

fn default_reports_url() -> String {
    "https://api.openai.com".to_string()
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            url: default_reports_url(),
            admin_key: String::new(),
        }
    }
}

impl ReportsConfig {
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.admin_key.is_empty()
    }
}

/// Assistant automation webhook configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssistantConfig {
    #[serde(default)]
    pub webhook_url: String,
}

impl AssistantConfig {
    pub fn is_configured(&self) -> bool {
        !self.webhook_url.is_empty()
    }
}

/// Platform branding shown by the SPA
#[derive(Debug, Clone, Deserialize)]
pub struct BrandingConfig {
    #[serde(default = "default_platform_name")]
    pub platform_name: String,

    pub favicon_url: Option<String>,
}

fn default_platform_name() -> String {
    "Frontdesk".to_string()
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            platform_name: default_platform_name(),
            favicon_url: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("frontdesk").join("config.toml")),
            Some(PathBuf::from("/etc/frontdesk/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Server overrides
        if let Ok(host) = std::env::var("FRONTDESK_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("FRONTDESK_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(ui_dir) = std::env::var("FRONTDESK_UI_DIR") {
            self.server.ui_dir = ui_dir;
        }

        // Datastore overrides
        if let Ok(url) = std::env::var("FRONTDESK_DATASTORE_URL") {
            self.datastore.url = url;
        }
        if let Ok(key) = std::env::var("FRONTDESK_DATASTORE_ANON_KEY") {
            self.datastore.anon_key = key;
        }

        // Helpdesk overrides
        if let Ok(url) = std::env::var("FRONTDESK_HELPDESK_URL") {
            self.helpdesk.url = url;
        }
        if let Ok(key) = std::env::var("FRONTDESK_HELPDESK_API_KEY") {
            self.helpdesk.api_key = key;
        }
        if let Ok(account) = std::env::var("FRONTDESK_HELPDESK_ACCOUNT_ID") {
            self.helpdesk.account_id = account;
        }

        // Reports overrides
        if let Ok(url) = std::env::var("FRONTDESK_REPORTS_URL") {
            self.reports.url = url;
        }
        if let Ok(key) = std::env::var("FRONTDESK_REPORTS_ADMIN_KEY") {
            self.reports.admin_key = key;
        }

        // Assistant overrides
        if let Ok(url) = std::env::var("FRONTDESK_ASSISTANT_WEBHOOK_URL") {
            self.assistant.webhook_url = url;
        }

        // Branding overrides
        if let Ok(name) = std::env::var("FRONTDESK_PLATFORM_NAME") {
            self.branding.platform_name = name;
        }

        // Logging overrides
        if let Ok(level) = std::env::var("FRONTDESK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("FRONTDESK_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Names of the mandatory settings that are still unset.
    ///
    /// The SPA shows a setup notice instead of the app while this list is
    /// non-empty. Reports and the assistant webhook are optional features
    /// and do not appear here.
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.datastore.url.is_empty() {
            missing.push("datastore.url");
        }
        if self.datastore.anon_key.is_empty() {
            missing.push("datastore.anon_key");
        }
        if self.helpdesk.url.is_empty() {
            missing.push("helpdesk.url");
        }
        if self.helpdesk.api_key.is_empty() {
            missing.push("helpdesk.api_key");
        }
        missing
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Frontdesk Configuration
#
# Environment variables override these settings:
# - FRONTDESK_HOST / FRONTDESK_PORT / FRONTDESK_UI_DIR
# - FRONTDESK_DATASTORE_URL / FRONTDESK_DATASTORE_ANON_KEY
# - FRONTDESK_HELPDESK_URL / FRONTDESK_HELPDESK_API_KEY / FRONTDESK_HELPDESK_ACCOUNT_ID
# - FRONTDESK_REPORTS_URL / FRONTDESK_REPORTS_ADMIN_KEY
# - FRONTDESK_ASSISTANT_WEBHOOK_URL
# - FRONTDESK_PLATFORM_NAME
# - FRONTDESK_LOG_LEVEL / FRONTDESK_LOG_FORMAT

[server]
# HTTP server bind address
host = "0.0.0.0"
port = 8090

# Allowed CORS origins (only needed when the SPA is served elsewhere)
cors_origins = ["http://localhost:8091"]

# Compiled SPA bundle to serve
ui_dir = "frontdesk-ui/dist"

[datastore]
# Hosted datastore project URL and public anon key (handed to the SPA)
url = ""
anon_key = ""

[helpdesk]
# Helpdesk API base URL and static API key (server-side only)
url = ""
api_key = ""

# Helpdesk account id
account_id = "1"

[reports]
# AI usage/reporting API base URL and admin key (server-side only)
url = "https://api.openai.com"
admin_key = ""

[assistant]
# Automation webhook the assistant panel relays messages to
webhook_url = ""

[branding]
# Name shown in the SPA header
platform_name = "Frontdesk"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_unconfigured() {
        let config = Config::default();
        assert_eq!(config.server.port, 8090);
        assert!(!config.datastore.is_configured());
        assert!(!config.helpdesk.is_configured());
        assert_eq!(
            config.missing_settings(),
            vec![
                "datastore.url",
                "datastore.anon_key",
                "helpdesk.url",
                "helpdesk.api_key"
            ]
        );
    }

    #[test]
    fn test_generated_default_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.helpdesk.account_id, "1");
        assert_eq!(config.branding.platform_name, "Frontdesk");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 9000

[datastore]
url = "https://example.supabase.co"
anon_key = "anon"

[helpdesk]
url = "https://desk.example.com"
api_key = "secret"
account_id = "7"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.port, 9000);
        assert!(config.datastore.is_configured());
        assert!(config.helpdesk.is_configured());
        assert_eq!(config.helpdesk.account_id, "7");
        assert!(config.missing_settings().is_empty());
        // Optional features stay off until keys are provided
        assert!(!config.reports.is_configured());
        assert!(!config.assistant.is_configured());
    }

    #[test]
    fn test_parse_error_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not [valid toml").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
