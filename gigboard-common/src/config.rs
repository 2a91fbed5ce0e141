//! Configuration loading
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (folded into the overrides by the CLI parser)
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
const APP_DIR: &str = "gigboard";
const DATABASE_FILE: &str = "gigboard.db";
const CONFIG_FILE: &str = "config.toml";

/// Resolved service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: PathBuf,
    pub host: String,
    pub port: u16,
    /// Populate empty tables with sample rows at startup
    pub seed: bool,
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub database: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub seed: Option<bool>,
    /// Explicit config file; must exist when given
    pub config_file: Option<PathBuf>,
}

/// Contents of the optional TOML config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub database: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub seed: Option<bool>,
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

impl Config {
    /// Resolve configuration from overrides, the config file, and defaults
    ///
    /// An explicitly named config file that is missing or malformed is an
    /// error. The default config file location is optional.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Config> {
        let file = match &overrides.config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                info!("Loading config file: {}", path.display());
                TomlConfig::load(path)?
            }
            None => match default_config_file() {
                Some(path) if path.exists() => {
                    info!("Loading config file: {}", path.display());
                    TomlConfig::load(&path)?
                }
                _ => {
                    debug!("No config file found, using defaults");
                    TomlConfig::default()
                }
            },
        };

        Ok(Self::merge(overrides, file))
    }

    /// Apply the priority order to already-loaded sources
    pub fn merge(overrides: ConfigOverrides, file: TomlConfig) -> Config {
        Config {
            database_path: overrides
                .database
                .or(file.database)
                .unwrap_or_else(default_database_path),
            host: overrides
                .host
                .or(file.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(file.port).unwrap_or(DEFAULT_PORT),
            seed: overrides.seed.or(file.seed).unwrap_or(true),
        }
    }

    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Per-user config file location (e.g. ~/.config/gigboard/config.toml)
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
}

/// OS-dependent default database location
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("./gigboard_data"))
        .join(DATABASE_FILE)
}
