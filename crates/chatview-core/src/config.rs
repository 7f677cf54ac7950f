//! Configuration management for chatview.
//!
//! Loads configuration from ${CHATVIEW_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Engine.IO query appended to derived push URLs.
const PUSH_QUERY: &str = "EIO=4&transport=websocket";

/// Returns the default config template with comments.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for chatview configuration and data directories.
    //!
    //! CHATVIEW_HOME resolution order:
    //! 1. CHATVIEW_HOME environment variable (if set)
    //! 2. ~/.config/chatview (default)
    //! 3. ./.chatview when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the chatview home directory.
    pub fn chatview_home() -> PathBuf {
        if let Ok(home) = std::env::var("CHATVIEW_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".chatview"),
            |h| h.join(".config").join("chatview"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        chatview_home().join("config.toml")
    }

    /// Returns the default log directory.
    pub fn logs_dir() -> PathBuf {
        chatview_home().join("logs")
    }
}

/// Authorization token lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Environment variable holding the token.
    pub token_env: String,
    /// File holding the token (fallback).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_file: Option<PathBuf>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_env: "CHATVIEW_TOKEN".to_string(),
            token_file: None,
        }
    }
}

/// Terminal-to-pixel mapping for the layout policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Pixel width of one terminal column.
    pub cell_width_px: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { cell_width_px: 8 }
    }
}

/// Push channel settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PushConfig {
    pub reconnect_delay_secs: u64,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            reconnect_delay_secs: 2,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level filter (RUST_LOG wins when set).
    pub level: String,
    /// Directory for log files in interactive mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chat server base URL.
    pub server_url: String,

    /// Explicit push channel URL (derived from `server_url` when unset).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_url: Option<String>,

    /// Timeout for each transcript fetch in seconds.
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub push: PushConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: Self::DEFAULT_SERVER_URL.to_string(),
            push_url: None,
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
            auth: AuthConfig::default(),
            layout: LayoutConfig::default(),
            push: PushConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    const DEFAULT_SERVER_URL: &str = "http://localhost:5000";
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.push.reconnect_delay_secs.max(1))
    }

    /// Directory for log files.
    pub fn log_dir(&self) -> PathBuf {
        self.logging.dir.clone().unwrap_or_else(paths::logs_dir)
    }

    /// Returns the push channel URL, deriving it from `server_url` when unset.
    ///
    /// `http` becomes `ws`, `https` becomes `wss`, and the path is replaced
    /// by the Socket.IO endpoint.
    ///
    /// # Errors
    /// Returns an error if either URL is invalid.
    pub fn effective_push_url(&self) -> Result<Url> {
        if let Some(explicit) = &self.push_url {
            return Url::parse(explicit).with_context(|| format!("Invalid push URL: {explicit}"));
        }

        let mut url = Url::parse(&self.server_url)
            .with_context(|| format!("Invalid server URL: {}", self.server_url))?;
        let scheme = match url.scheme() {
            "https" | "wss" => "wss",
            _ => "ws",
        };
        url.set_scheme(scheme)
            .map_err(|()| anyhow::anyhow!("Cannot derive push URL from {}", self.server_url))?;
        url.set_path("/socket.io/");
        url.set_query(Some(PUSH_QUERY));
        Ok(url)
    }
}
