//! Configuration management for authdeck
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    CONFIG_DIR_FILE_NAME, CONFIG_DIR_NAME, CONFIG_FILE_NAME, CONFIG_GENERATED, DEFAULT_BASE_URL, DEFAULT_CALLBACK_URL,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SESSION_TOKEN_ENV, DEFAULT_TOAST_DURATION_SECS, DEMO_ORGANIZATION_ID,
    MAX_REQUEST_TIMEOUT_SECS, MAX_TOAST_DURATION_SECS, VIEWS, VIEW_TEAMS,
};
use crate::localization::Localization;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub auth: AuthConfig,
    pub ui: UiConfig,
    pub providers: ProvidersConfig,
    pub logging: LoggingConfig,
    /// Localization overrides layered over the built-in English table
    pub localization: BTreeMap<String, String>,
}

/// Which auth client the binary talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClientKind {
    /// Better Auth REST API
    #[default]
    Http,
    /// In-process demo directory
    Memory,
}

/// Auth service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub client: ClientKind,
    /// Base URL of the auth routes, e.g. "https://example.com/api/auth"
    pub base_url: String,
    /// Organization whose teams and members are managed
    pub organization_id: String,
    /// Environment variable holding the session token
    pub session_token_env: String,
    /// Where providers send the user back after linking
    pub callback_url: String,
    pub request_timeout_secs: u64,
    /// Show localized text for known error codes instead of the server message
    pub localize_errors: bool,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Card focused on startup
    /// Options: "teams", "members", "providers"
    pub start_view: String,
    /// How long a toast stays on screen
    pub toast_duration_secs: u64,
}

/// Providers listed in the providers card
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Social providers linked through `link-social`
    pub social: Vec<String>,
    /// Generic OAuth providers linked through `oauth2/link`
    pub other: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write log records to a file in the cache directory
    pub enabled: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            client: ClientKind::Http,
            base_url: DEFAULT_BASE_URL.to_string(),
            organization_id: String::new(),
            session_token_env: DEFAULT_SESSION_TOKEN_ENV.to_string(),
            callback_url: DEFAULT_CALLBACK_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            localize_errors: true,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            start_view: VIEW_TEAMS.to_string(),
            toast_duration_secs: DEFAULT_TOAST_DURATION_SECS,
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            social: vec!["github".to_string(), "google".to_string()],
            other: Vec::new(),
        }
    }
}

impl AuthConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Organization to manage, falling back to the demo organization for
    /// the in-memory client.
    pub fn effective_organization_id(&self) -> &str {
        if self.organization_id.is_empty() && self.client == ClientKind::Memory {
            DEMO_ORGANIZATION_ID
        } else {
            &self.organization_id
        }
    }
}

impl UiConfig {
    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.toast_duration_secs)
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    pub fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from(CONFIG_FILE_NAME);
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        let xdg_config = Self::get_default_config_path()?;
        if xdg_config.exists() {
            return Ok(Some(xdg_config));
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.validate_auth()?;

        if !VIEWS.contains(&self.ui.start_view.as_str()) {
            anyhow::bail!("start_view must be one of {}, got '{}'", VIEWS.join(", "), self.ui.start_view);
        }

        if self.ui.toast_duration_secs == 0 || self.ui.toast_duration_secs > MAX_TOAST_DURATION_SECS {
            anyhow::bail!(
                "toast_duration_secs must be between 1 and {}, got {}",
                MAX_TOAST_DURATION_SECS,
                self.ui.toast_duration_secs
            );
        }

        for provider in self.providers.social.iter().chain(&self.providers.other) {
            if provider.trim().is_empty() {
                anyhow::bail!("provider ids cannot be empty");
            }
        }

        Ok(())
    }

    fn validate_auth(&self) -> Result<()> {
        let auth = &self.auth;

        if auth.request_timeout_secs == 0 || auth.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS {
            anyhow::bail!(
                "request_timeout_secs must be between 1 and {}, got {}",
                MAX_REQUEST_TIMEOUT_SECS,
                auth.request_timeout_secs
            );
        }

        if let Err(e) = url::Url::parse(&auth.callback_url) {
            anyhow::bail!("Invalid callback_url '{}': {}", auth.callback_url, e);
        }

        if auth.client == ClientKind::Http {
            if let Err(e) = url::Url::parse(&auth.base_url) {
                anyhow::bail!("Invalid base_url '{}': {}", auth.base_url, e);
            }
            if auth.organization_id.trim().is_empty() {
                anyhow::bail!("organization_id is required when client = \"http\"");
            }
            if auth.session_token_env.trim().is_empty() {
                anyhow::bail!("session_token_env cannot be empty");
            }
        }

        Ok(())
    }

    /// Built-in strings with the configured overrides applied
    pub fn localization(&self) -> Localization {
        let overrides = Localization::from_entries(self.localization.clone());
        Localization::default().merged(&overrides)
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# authdeck Configuration File\n# Generated on {}\n#\n# client = \"memory\" runs against a built-in demo directory.\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join(CONFIG_DIR_NAME))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join(CONFIG_DIR_FILE_NAME))
    }
}
