//! Application configuration structures.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::PortalSelectors;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Portal URLs
    #[serde(default)]
    pub portal: PortalConfig,

    /// HTTP client behavior settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Notification delivery settings
    #[serde(default)]
    pub notifier: NotifierConfig,

    /// State snapshot settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Fallback selector chains for the listing page
    #[serde(default)]
    pub selectors: PortalSelectors,

    /// Delivery credentials, read from the environment rather than the file
    #[serde(skip)]
    pub telegram: TelegramConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    ///
    /// A missing file is the normal case; anything in it overrides defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        if !path.as_ref().exists() {
            return Self::default();
        }
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Fill in delivery credentials from the process environment.
    pub fn with_env_credentials(mut self) -> Self {
        self.telegram = TelegramConfig::from_env();
        self
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.notifier.timeout_secs == 0 {
            return Err(AppError::validation("notifier.timeout_secs must be > 0"));
        }
        if self.notifier.max_entries == 0 {
            return Err(AppError::validation("notifier.max_entries must be > 0"));
        }
        if self.storage.state_file.trim().is_empty() {
            return Err(AppError::validation("storage.state_file is empty"));
        }
        url::Url::parse(&self.portal.base_url)
            .map_err(|e| AppError::validation(format!("portal.base_url is invalid: {e}")))?;
        url::Url::parse(&self.portal.search_url)
            .map_err(|e| AppError::validation(format!("portal.search_url is invalid: {e}")))?;
        self.selectors.validate()?;
        Ok(())
    }
}

/// Employment portal endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Portal landing URL, also the fallback link for anchor-less listings
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Search results page that gets scraped
    #[serde(default = "defaults::search_url")]
    pub search_url: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            search_url: defaults::search_url(),
        }
    }
}

/// HTTP client settings for the portal fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Notification delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Delivery request timeout in seconds
    #[serde(default = "defaults::notify_timeout")]
    pub timeout_secs: u64,

    /// Maximum individual entries in a digest message
    #[serde(default = "defaults::max_entries")]
    pub max_entries: usize,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            timeout_secs: defaults::notify_timeout(),
            max_entries: defaults::max_entries(),
        }
    }
}

/// State snapshot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the JSON snapshot rewritten after each run
    #[serde(default = "defaults::state_file")]
    pub state_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_file: defaults::state_file(),
        }
    }
}

/// Telegram bot credentials, read from the environment.
///
/// Empty values leave the notifier unconfigured; the run then skips
/// delivery instead of failing.
#[derive(Debug, Clone, Default)]
pub struct TelegramConfig {
    /// Bot API token
    pub bot_token: String,

    /// Destination chat identifier
    pub chat_id: String,

    /// Notification e-mail recipient. Read for parity with the original
    /// deployment but not consumed by any delivery path.
    pub email_recipient: String,
}

impl TelegramConfig {
    /// Read credentials from the process environment.
    pub fn from_env() -> Self {
        Self {
            bot_token: env::var("TELEGRAM_BOT_TOKEN").unwrap_or_default(),
            chat_id: env::var("TELEGRAM_CHAT_ID").unwrap_or_default(),
            email_recipient: env::var("EMAIL_DESTINATARIO").unwrap_or_default(),
        }
    }
}

mod defaults {
    // Portal defaults
    pub fn base_url() -> String {
        "https://www.santafe.gob.ar/simtyss/portalempleo/".into()
    }
    pub fn search_url() -> String {
        "https://www.santafe.gob.ar/simtyss/portalempleo/ofertas/".into()
    }

    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Notifier defaults
    pub fn notify_timeout() -> u64 {
        10
    }
    pub fn max_entries() -> usize {
        10
    }

    // Storage defaults
    pub fn state_file() -> String {
        "empleos_anteriores.json".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.http.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.http.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_portal_url() {
        let mut config = Config::default();
        config.portal.search_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_or_default_on_missing_file() {
        let config = Config::load_or_default("definitely/not/here.toml");
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.notifier.max_entries, 10);
    }

    #[test]
    fn toml_overrides_defaults() {
        let config: Config = toml::from_str(
            r#"
            [http]
            timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.http.timeout_secs, 5);
        // Untouched sections keep their defaults
        assert_eq!(config.notifier.timeout_secs, 10);
        assert!(config.portal.search_url.ends_with("/ofertas/"));
    }
}
