use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Console configuration loaded from `~/.loan-console/config.toml`.
///
/// Holds no credentials. The bearer token lives in the session store named
/// by [`SessionConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub notices: NoticeConfig,
}

impl ConsoleConfig {
    /// Load from the default location, falling back to defaults when the
    /// file does not exist.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(path)
        } else {
            let cfg = ConsoleConfig::default();
            cfg.validate()?;
            Ok(cfg)
        }
    }

    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let text = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: ConsoleConfig =
            toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        self.validate()?;
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        self.notices.validate()?;
        Ok(())
    }

    /// Directory holding the config file and the CLI token file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".loan-console")
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Token file used by the CLI session.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn token_path(&self) -> PathBuf {
        self.session
            .token_file
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| Self::config_dir().join("token"))
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(String),
    #[error("parse: {0}")]
    Parse(String),
    #[error("validation: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Section structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout. `None` lets a request hang indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".into()
}

impl ApiConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::Validation("api.base_url must not be empty".into()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "api.base_url must start with http:// or https:// (got {url:?})"
            )));
        }
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::Validation(
                "api.timeout_secs must be positive when set".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Browser storage key holding the bearer token.
    #[serde(default = "default_token_key")]
    pub token_key: String,
    /// Browser storage key holding the signed-in user as JSON.
    #[serde(default = "default_user_key")]
    pub user_key: String,
    #[serde(default)]
    pub token_file: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_key: default_token_key(),
            user_key: default_user_key(),
            token_file: None,
        }
    }
}

fn default_token_key() -> String {
    "token".into()
}
fn default_user_key() -> String {
    "user".into()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoticeConfig {
    #[serde(default = "default_notice_duration_ms")]
    pub duration_ms: u64,
    #[serde(default = "default_max_visible")]
    pub max_visible: usize,
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_notice_duration_ms(),
            max_visible: default_max_visible(),
        }
    }
}

fn default_notice_duration_ms() -> u64 {
    4000
}
fn default_max_visible() -> usize {
    5
}

impl NoticeConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.duration_ms == 0 {
            return Err(ConfigError::Validation(
                "notices.duration_ms must be greater than zero".into(),
            ));
        }
        if self.max_visible == 0 {
            return Err(ConfigError::Validation(
                "notices.max_visible must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
