//! Layered configuration for habitual.
//!
//! Values are resolved file → environment → CLI:
//! - `config.toml` in the config directory
//! - `HABITUAL_API_URL` (a `.env` file in the working directory is honoured)
//! - `--api-url` on the command line
//!
//! # Configuration File Format
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000/api"
//! timeout_secs = 10
//!
//! [display]
//! week_start = "monday"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_DIR_ENV: &str = "HABITUAL_CONFIG_DIR";
pub const API_URL_ENV: &str = "HABITUAL_API_URL";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// First day of the week in calendar views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl std::fmt::Display for WeekStart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeekStart::Monday => write!(f, "monday"),
            WeekStart::Sunday => write!(f, "sunday"),
        }
    }
}

/// `[api]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    /// Base URL every endpoint path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// `[display]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplaySection {
    #[serde(default)]
    pub week_start: WeekStart,
}

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub display: DisplaySection,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Problems worth telling the user about. An empty list means valid.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            warnings.push(format!(
                "api.base_url '{}' should start with http:// or https://",
                self.api.base_url
            ));
        }
        if self.api.timeout_secs == 0 {
            warnings.push("api.timeout_secs is 0; requests would time out immediately".to_string());
        }
        warnings
    }
}

/// Resolve the config directory from an explicit override, falling back to
/// the platform config dir.
pub fn resolve_config_dir(override_dir: Option<&str>) -> Result<PathBuf> {
    if let Some(dir) = override_dir.filter(|d| !d.trim().is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::config_dir()
        .map(|d| d.join("habitual"))
        .ok_or_else(|| anyhow::anyhow!("Could not determine a config directory; set {}", CONFIG_DIR_ENV))
}

/// Effective runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    pub session_file: PathBuf,
    pub api_url: String,
    pub timeout: Duration,
    pub week_start: WeekStart,
    pub verbose: bool,
}

impl Config {
    /// Build the runtime config from the process environment.
    pub fn new(api_url_flag: Option<String>, verbose: bool) -> Result<Self> {
        Self::from_env_fn(api_url_flag, verbose, |key| std::env::var(key).ok())
    }

    /// Same as [`Config::new`] with an injectable environment lookup.
    pub fn from_env_fn(
        api_url_flag: Option<String>,
        verbose: bool,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let config_dir = resolve_config_dir(env(CONFIG_DIR_ENV).as_deref())?;
        let config_file = config_dir.join(CONFIG_FILE_NAME);
        let file = ConfigFile::load_or_default(&config_file)?;

        let api_url = api_url_flag
            .or_else(|| env(API_URL_ENV).filter(|v| !v.trim().is_empty()))
            .unwrap_or(file.api.base_url);

        Ok(Self {
            session_file: config_dir.join("session.json"),
            config_dir,
            config_file,
            api_url: api_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(file.api.timeout_secs),
            week_start: file.display.week_start,
            verbose,
        })
    }
}
