use crate::domain::error::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{instrument, trace};

pub const ENV_BASE_URL: &str = "BMCLIENT_BASE_URL";
pub const ENV_TIMEOUT: &str = "BMCLIENT_TIMEOUT";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DisplayOpts {
    /// Bookmark fields shown by `list`, in order (default: id, title, url)
    #[serde(default = "default_fields")]
    pub fields: Vec<String>,

    /// Colored terminal output (default: true)
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_fields() -> Vec<String> {
    vec!["id".to_string(), "title".to_string(), "url".to_string()]
}

fn default_color() -> bool {
    true
}

impl Default for DisplayOpts {
    fn default() -> Self {
        Self {
            fields: default_fields(),
            color: default_color(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    /// Base URL of the bookmark service; `api/bookmarks` is resolved against it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds; unset means no timeout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Output options for listing bookmarks
    #[serde(default)]
    pub display: DisplayOpts,
}

fn default_base_url() -> String {
    "http://localhost:8080/".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            display: DisplayOpts::default(),
        }
    }
}

impl Settings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Default location of the config file: `~/.config/bmclient/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config/bmclient/config.toml"))
}

fn read_config_file(path: &Path) -> DomainResult<Settings> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        DomainError::Other(format!("Cannot read config file {}: {}", path.display(), e))
    })?;
    toml::from_str::<Settings>(&text).map_err(|e| {
        DomainError::Other(format!("Invalid config file {}: {}", path.display(), e))
    })
}

/// Load settings from the config file and environment variables.
///
/// An explicitly given config file must exist and parse; the default one is
/// optional and skipped when unreadable. Environment variables win over both.
#[instrument(level = "debug")]
pub fn load_settings(config_file: Option<&Path>) -> DomainResult<Settings> {
    trace!("Loading settings");

    let mut settings = match config_file {
        Some(path) => {
            let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
            trace!("Loading config from: {}", expanded);
            read_config_file(Path::new(&expanded))?
        }
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => {
                trace!("Loading config from: {:?}", path);
                read_config_file(&path).unwrap_or_else(|e| {
                    trace!("Ignoring default config: {}", e);
                    Settings::default()
                })
            }
            None => Settings::default(),
        },
    };

    // Override with environment variables
    if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
        trace!("Using {} from environment: {}", ENV_BASE_URL, base_url);
        settings.base_url = base_url;
    }

    if let Ok(timeout) = std::env::var(ENV_TIMEOUT) {
        trace!("Using {} from environment: {}", ENV_TIMEOUT, timeout);
        let secs = timeout.trim().parse::<u64>().map_err(|e| {
            DomainError::Other(format!("{} must be whole seconds: {}", ENV_TIMEOUT, e))
        })?;
        settings.timeout_secs = Some(secs);
    }

    trace!("Settings loaded: {:?}", settings);
    Ok(settings)
}

pub fn generate_default_config() -> String {
    let default_settings = Settings::default();
    toml::to_string_pretty(&default_settings)
        .unwrap_or_else(|_| "# Error generating default configuration".to_string())
}
