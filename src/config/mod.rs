//! Configuration management for Hexlens

use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;
use crate::models::QualityTier;

/// File names searched for, in order, in each directory
pub const CONFIG_FILE_NAMES: [&str; 2] = [".hexlens.toml", "hexlens.toml"];

/// Configuration provider trait
pub trait ConfigProvider {
    /// Load configuration for inputs located under `base_dir`
    fn load_config(&self, base_dir: &Path) -> Result<HexlensConfig, ConfigError>;
}

/// General configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Fail when the overall tier is below this one
    pub min_tier: Option<QualityTier>,

    /// Hide monorepo orchestrator packages in the hexagon panel
    pub skip_orchestrators: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            min_tier: None,
            skip_orchestrators: true,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Decorate output with emoji
    pub use_emoji: bool,

    /// Show raw metric values next to the labels
    pub show_values: bool,

    /// Max issues to list per file in the debug panel
    pub max_issues_per_file: usize,

    /// List every analyzed file in the debug panel
    pub show_analyzed_files: bool,

    /// Prefix grid labels with the repository name
    pub show_repository_name: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_emoji: true,
            show_values: false,
            max_issues_per_file: usize::MAX,
            show_analyzed_files: false,
            show_repository_name: true,
        }
    }
}

/// Radar chart geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    /// Width and height of the square view box
    pub view_box_size: f64,

    /// Outer hexagon radius relative to the view box
    pub radius_ratio: f64,

    /// Label padding relative to the view box
    pub padding_ratio: f64,

    /// Draw metric labels around the hexagon
    pub show_labels: bool,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            view_box_size: 300.0,
            radius_ratio: 0.28,
            padding_ratio: 0.1,
            show_labels: true,
        }
    }
}

/// Main configuration for Hexlens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HexlensConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub radar: RadarConfig,
}

/// TOML configuration provider
#[derive(Debug, Default)]
pub struct TomlConfigProvider {
    /// Explicit configuration file, skips discovery
    config_file: Option<PathBuf>,
}

impl TomlConfigProvider {
    /// Create a new TOML configuration provider
    pub fn new() -> Self {
        Self { config_file: None }
    }

    /// Always load the given file instead of searching for one
    pub fn with_config_file(mut self, path: PathBuf) -> Self {
        self.config_file = Some(path);
        self
    }

    /// Find a project config by walking up from `base_dir`
    pub fn find_config(base_dir: &Path) -> Option<PathBuf> {
        let mut current_dir = Some(base_dir);

        while let Some(dir) = current_dir {
            for name in CONFIG_FILE_NAMES {
                let config_path = dir.join(name);
                if config_path.is_file() {
                    return Some(config_path);
                }
            }
            current_dir = dir.parent();
        }

        None
    }

    /// Read configuration from a file
    fn read_config_file(path: &Path) -> Result<HexlensConfig, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::LoadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let config: HexlensConfig = toml::from_str(&content)?;
        validate(&config)?;
        Ok(config)
    }
}

/// Reject geometry that cannot produce a chart
fn validate(config: &HexlensConfig) -> Result<(), ConfigError> {
    let radar = &config.radar;
    if !(radar.view_box_size.is_finite() && radar.view_box_size > 0.0) {
        return Err(ConfigError::ParseError(format!(
            "radar.view_box_size must be positive, got {}",
            radar.view_box_size
        )));
    }
    if !(radar.radius_ratio > 0.0 && radar.radius_ratio <= 0.5) {
        return Err(ConfigError::ParseError(format!(
            "radar.radius_ratio must be in (0, 0.5], got {}",
            radar.radius_ratio
        )));
    }
    if !(radar.padding_ratio.is_finite() && radar.padding_ratio >= 0.0) {
        return Err(ConfigError::ParseError(format!(
            "radar.padding_ratio must not be negative, got {}",
            radar.padding_ratio
        )));
    }
    Ok(())
}

impl ConfigProvider for TomlConfigProvider {
    fn load_config(&self, base_dir: &Path) -> Result<HexlensConfig, ConfigError> {
        let path = match &self.config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::LoadError {
                        path: path.clone(),
                        message: "File does not exist".to_string(),
                    });
                }
                Some(path.clone())
            }
            None => Self::find_config(base_dir),
        };

        match path {
            Some(path) => {
                debug!("Loading config from {:?}", path);
                Self::read_config_file(&path)
            }
            None => {
                debug!("No config found above {:?}, using defaults", base_dir);
                Ok(HexlensConfig::default())
            }
        }
    }
}
