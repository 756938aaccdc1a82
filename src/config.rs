use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable naming an optional YAML config file.
pub const CONFIG_PATH_ENV: &str = "TINYHTTP_CONFIG";

/// Server configuration.
///
/// Values come from an optional YAML file, then individual environment
/// variables override them:
///
/// - `LISTEN` - listening address
/// - `FILES_DIR` - directory backing the `/files/` routes
/// - `READ_TIMEOUT_SECS` - how long a connection may idle between requests
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    #[serde(default = "default_files_dir")]
    pub files_dir: PathBuf,
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
}

fn default_listen_addr() -> String {
    "0.0.0.0:4221".to_string()
}

fn default_files_dir() -> PathBuf {
    PathBuf::from("app/files")
}

fn default_read_timeout_secs() -> u64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            files_dir: default_files_dir(),
            read_timeout_secs: default_read_timeout_secs(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let mut cfg = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        cfg.apply_env()?;
        Ok(cfg)
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let raw = std::fs::read_to_string(&path)
            .map_err(|source| ConfigError::Read { path: path.clone(), source })?;
        Self::from_yaml_str(&raw)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(addr) = std::env::var("LISTEN") {
            self.listen_addr = addr;
        }
        if let Ok(dir) = std::env::var("FILES_DIR") {
            self.files_dir = PathBuf::from(dir);
        }
        if let Ok(secs) = std::env::var("READ_TIMEOUT_SECS") {
            self.read_timeout_secs = secs
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key: "READ_TIMEOUT_SECS", value: secs })?;
        }
        Ok(())
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}
