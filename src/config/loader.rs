//! Configuration File Loading
//!
//! Finds and parses configuration files from the platform config
//! directory and the working directory, with TOML and JSON support and a
//! default fallback when nothing is found.

use std::fs;
use std::path::{Path, PathBuf};

use super::ShellConfig;
use crate::error::{Error, Result};

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    /// Determine the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Some(ConfigFormat::Toml),
            Some("json") => Some(ConfigFormat::Json),
            _ => None,
        }
    }
}

/// Configuration file loader
pub struct ConfigLoader {
    /// Search paths for configuration files, in priority order
    search_paths: Vec<PathBuf>,
    /// Path of the file that was loaded, if any
    current_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader with the default search paths.
    pub fn new() -> Self {
        Self {
            search_paths: Self::default_search_paths(),
            current_path: None,
        }
    }

    /// Load configuration from the first file found in the search paths,
    /// falling back to defaults when none exists.
    pub fn load() -> Result<ShellConfig> {
        let mut loader = Self::new();
        match loader.find_config_file() {
            Some(path) => {
                let config = Self::load_from_file(&path)?;
                loader.current_path = Some(path.clone());
                info!("configuration loaded from {}", path.display());
                Ok(config)
            }
            None => {
                debug!("no configuration file found, using defaults");
                Ok(ShellConfig::default())
            }
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<ShellConfig> {
        if !path.exists() {
            return Err(Error::ConfigNotFound);
        }
        let content = fs::read_to_string(path).map_err(|e| Error::ConfigLoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let format = ConfigFormat::from_path(path).ok_or_else(|| Error::ConfigLoadFailed {
            path: path.to_path_buf(),
            reason: "unsupported file extension".to_string(),
        })?;
        let config = Self::parse(&content, format)?;
        config.validate()?;
        Ok(config)
    }

    /// Save a configuration to a file, format chosen by extension.
    pub fn save_to_file(config: &ShellConfig, path: &Path) -> Result<()> {
        let format = ConfigFormat::from_path(path).ok_or_else(|| Error::ConfigSaveFailed {
            path: path.to_path_buf(),
            reason: "unsupported file extension".to_string(),
        })?;
        let content = match format {
            ConfigFormat::Toml => {
                toml::to_string_pretty(config).map_err(|e| Error::ConfigSaveFailed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?
            }
            ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        };
        fs::write(path, content).map_err(|e| Error::ConfigSaveFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// The path of the configuration file that was loaded, if any.
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    fn parse(content: &str, format: ConfigFormat) -> Result<ShellConfig> {
        match format {
            ConfigFormat::Toml => {
                toml::from_str(content).map_err(|e| Error::ConfigParseFailed {
                    format: "TOML".to_string(),
                    reason: e.to_string(),
                })
            }
            ConfigFormat::Json => {
                serde_json::from_str(content).map_err(|e| Error::ConfigParseFailed {
                    format: "JSON".to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    fn find_config_file(&self) -> Option<PathBuf> {
        self.search_paths.iter().find(|p| p.exists()).cloned()
    }

    fn default_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("skillshell").join("config.toml"));
            paths.push(config_dir.join("skillshell").join("config.json"));
        }
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".skillshell.toml"));
        }
        paths.push(PathBuf::from("skillshell.toml"));

        paths
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
