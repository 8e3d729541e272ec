use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

pub const APP_NAME: &str = "wgraph";
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Proxy requests are routed through; direct when unset
    #[serde(default)]
    pub proxy: Option<Url>,
    /// WebID of the signed-in user
    #[serde(default)]
    pub web_id: Option<String>,
    /// Per-request timeout in seconds; none when unset
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            web_id: None,
            request_timeout_secs: None,
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the wgraph directory (~/.wgraph)
    pub dir: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the wgraph directory path (custom or default ~/.wgraph)
    pub fn dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new state directory
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let dir = Self::dir(custom_path)?;

        if dir.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&dir)?;

        let config = config.unwrap_or_default();
        let config_path = dir.join(CONFIG_FILE_NAME);
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        Ok(Self {
            dir,
            config_path,
            config,
        })
    }

    /// Load existing state from the wgraph directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let dir = Self::dir(custom_path)?;

        if !dir.exists() {
            return Err(StateError::NotInitialized);
        }

        let config_path = dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Err(StateError::MissingFile(CONFIG_FILE_NAME.to_string()));
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;

        Ok(Self {
            dir,
            config_path,
            config,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("wgraph directory not initialized. Run 'wgraph init' first")]
    NotInitialized,

    #[error("wgraph directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_then_load() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("wgraph");
        let config = AppConfig {
            proxy: Some(Url::parse("http://localhost:8800/").unwrap()),
            web_id: Some("https://alice.example/profile/card#me".to_string()),
            request_timeout_secs: Some(10),
            ..AppConfig::default()
        };

        let state = AppState::init(Some(dir.clone()), Some(config.clone())).unwrap();
        assert!(state.config_path.is_file());

        let loaded = AppState::load(Some(dir.clone())).unwrap();
        assert_eq!(loaded.config, config);

        assert!(matches!(
            AppState::init(Some(dir), None),
            Err(StateError::AlreadyInitialized)
        ));
    }

    #[test]
    fn test_load_uninitialized() {
        let temp = tempfile::tempdir().unwrap();
        assert!(matches!(
            AppState::load(Some(temp.path().join("missing"))),
            Err(StateError::NotInitialized)
        ));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = toml::from_str("web_id = \"https://a.example/card#me\"").unwrap();
        assert_eq!(config.log_level, "info");
        assert!(config.proxy.is_none());
    }
}
