use crate::error::{CleanerError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Open-data endpoint for the Montpellier metropolitan defibrillator registry.
pub const DEFAULT_SOURCE_URL: &str =
    "https://data.montpellier3m.fr/sites/default/files/ressources/MMM_MMM_DAE.csv";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Remote URL or local path of the raw registry table
    pub url: String,
    /// Directory the raw download is cached under
    pub data_dir: PathBuf,
    /// Where the cleaned table is written
    pub output: PathBuf,
    /// Re-download even when a cached copy exists
    pub force_refresh: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            data_dir: PathBuf::from("data"),
            output: PathBuf::from("data/cleaned.csv"),
            force_refresh: false,
        }
    }
}

impl Config {
    /// Loads `config.toml` from the working directory. The file is optional
    /// and may set any subset of the fields; the rest keep their defaults.
    pub fn load() -> Result<Self> {
        let config_path = "config.toml";
        if !Path::new(config_path).exists() {
            return Ok(Config::default());
        }
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            CleanerError::Config(format!("Failed to read config file '{}': {}", config_path, e))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }
}
