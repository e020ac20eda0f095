//! Command-line interface for Hexlens

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::models::{MetricKey, QualityMetrics, QualityTier};

/// Verbosity level for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Default)]
pub enum Verbosity {
    /// Quiet mode - only show errors
    Quiet = 0,

    /// Normal mode
    #[default]
    Normal = 1,

    /// Verbose mode - explain how scores were derived
    Verbose = 2,

    /// Debug mode - show everything including debug info
    Debug = 3,
}

impl From<u8> for Verbosity {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Quiet,
            1 => Self::Normal,
            2 => Self::Verbose,
            _ => Self::Debug,
        }
    }
}

/// Output format for every command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal panels
    #[default]
    Pretty,

    /// Machine-readable JSON
    Json,
}

/// Hexlens - Hexagonal quality radar for multi-tool code quality results
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "⬡ Hexlens - Hexagonal quality radar for multi-tool code quality results",
    long_about = "Hexlens turns the results of a quality-lens run (tests, linting, formatting, types, dead code and documentation) into quality tiers, hexagonal radar charts, repository grids and a raw lens data viewer."
)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v=verbose, -vv=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output unless there are errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Custom configuration file
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable emoji in output
    #[arg(long, global = true)]
    pub no_emoji: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty, global = true)]
    pub format: OutputFormat,
}

/// Commands that Hexlens can execute
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show per-package quality hexagons
    #[command(visible_alias = "hex")]
    Hexagon(HexagonArgs),

    /// Show a grid of packages across repositories
    Grid(GridArgs),

    /// Inspect raw lens results for one package
    Debug(DebugArgs),

    /// Compute the tier of a single set of metrics
    Tier(TierArgs),

    /// Render a package hexagon as SVG
    Svg(SvgArgs),
}

/// Arguments for the hexagon command
#[derive(Args, Debug)]
pub struct HexagonArgs {
    /// Quality report or quality-lens results file
    #[arg(name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Project root, used to look for the quality-lens workflow when there is no data
    #[arg(long, default_value = ".")]
    pub project: PathBuf,

    /// Fail when the overall tier is below this one
    #[arg(long)]
    pub min_tier: Option<QualityTier>,

    /// Include monorepo orchestrator packages
    #[arg(long)]
    pub include_orchestrators: bool,
}

/// Arguments for the grid command
#[derive(Args, Debug)]
pub struct GridArgs {
    /// Repositories file (array or `{ "repositories": [...] }`)
    #[arg(name = "INPUT")]
    pub input: PathBuf,

    /// Show this metric's value instead of the tier
    #[arg(short, long)]
    pub metric: Option<MetricKey>,

    /// Fail when the overall tier is below this one
    #[arg(long)]
    pub min_tier: Option<QualityTier>,
}

/// Arguments for the debug command
#[derive(Args, Debug)]
pub struct DebugArgs {
    /// quality-lens results file
    #[arg(name = "INPUT")]
    pub input: PathBuf,

    /// Package to show (defaults to the first one)
    #[arg(short, long)]
    pub package: Option<String>,

    /// List every analyzed file
    #[arg(long)]
    pub files: bool,
}

/// Arguments for the tier command
#[derive(Args, Debug)]
pub struct TierArgs {
    #[arg(long, default_value_t = 0.0)]
    pub tests: f64,

    #[arg(long, default_value_t = 0.0)]
    pub linting: f64,

    #[arg(long, default_value_t = 0.0)]
    pub formatting: f64,

    #[arg(long, default_value_t = 0.0)]
    pub types: f64,

    #[arg(long, default_value_t = 0.0)]
    pub documentation: f64,

    /// Dead code percentage (lower is better)
    #[arg(long, default_value_t = 0.0)]
    pub dead_code: f64,

    /// Lens ids that ran, comma separated (all metrics count when omitted)
    #[arg(long, value_delimiter = ',')]
    pub lenses: Option<Vec<String>>,
}

impl TierArgs {
    pub fn metrics(&self) -> QualityMetrics {
        QualityMetrics {
            tests: self.tests,
            linting: self.linting,
            formatting: self.formatting,
            types: self.types,
            documentation: self.documentation,
            dead_code: self.dead_code,
        }
    }
}

/// Arguments for the svg command
#[derive(Args, Debug)]
pub struct SvgArgs {
    /// Quality report or quality-lens results file
    #[arg(name = "INPUT")]
    pub input: PathBuf,

    /// Package to render (defaults to the first one)
    #[arg(short, long)]
    pub package: Option<String>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Label vertices with raw values instead of metric names
    #[arg(long)]
    pub values: bool,

    /// Do not draw labels
    #[arg(long)]
    pub no_labels: bool,
}
