use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::{MetricKey, QualityTier};

/// Main error type for Hexlens
#[derive(Debug, Error)]
pub enum HexlensError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input data errors
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Rendering errors
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Overall tier below the configured minimum
    #[error("Quality gate failed: overall tier {actual} is below the required {required}")]
    QualityGate {
        actual: QualityTier,
        required: QualityTier,
    },
}

/// Configuration related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Error loading configuration file
    #[error("Failed to load config from {path}: {message}")]
    LoadError { path: PathBuf, message: String },

    /// Error parsing configuration
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Errors in the quality data handed to Hexlens
#[derive(Debug, Error)]
pub enum InputError {
    /// Input file could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Input is not valid JSON of the expected shape
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A metric is not a finite percentage
    #[error("Metric '{metric}' of package '{package}' is {value}, expected a value between 0 and 100")]
    MetricOutOfRange {
        package: String,
        metric: MetricKey,
        value: f64,
    },

    /// The results file has no hexagon section
    #[error("No quality metrics found in {0}")]
    MissingQualityMetrics(PathBuf),

    /// Requested package does not exist in the input
    #[error("Package '{0}' not found")]
    UnknownPackage(String),

    /// The input lists no packages at all
    #[error("No packages found in {0}")]
    NoPackages(PathBuf),
}

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    /// Output could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
