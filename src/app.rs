use log::{debug, info, warn};
use std::fs;
use std::path::Path;

use crate::cli::{DebugArgs, GridArgs, HexagonArgs, SvgArgs, TierArgs, Verbosity};
use crate::config::{ConfigProvider, HexlensConfig};
use crate::errors::{HexlensError, InputError, RenderError};
use crate::grouping::{self, GridSummary, UNKNOWN_PACKAGE};
use crate::input;
use crate::models::{PackageQuality, QualityTier};
use crate::output::OutputFormatter;
use crate::radar::svg::{render_svg, SvgOptions};
use crate::radar::{RadarChart, RadarGeometry};
use crate::scoring::{self, lenses};

/// Text produced by a command, plus the tiers needed for the quality gate
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutput {
    pub text: String,
    pub overall_tier: Option<QualityTier>,
    pub required_tier: Option<QualityTier>,
}

impl CommandOutput {
    fn text(text: String) -> Self {
        Self {
            text,
            overall_tier: None,
            required_tier: None,
        }
    }

    /// Fail when the overall tier is below the required one
    pub fn check_gate(&self) -> Result<(), HexlensError> {
        match (self.overall_tier, self.required_tier) {
            (Some(actual), Some(required)) if actual < required => {
                Err(HexlensError::QualityGate { actual, required })
            }
            (None, Some(required)) => {
                warn!("Minimum tier {} is set but nothing was scored", required);
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

/// Core application that turns quality data into panels, grids and charts
pub struct HexlensApp<C, O>
where
    C: ConfigProvider,
    O: OutputFormatter,
{
    config_provider: C,
    output_formatter: O,
    verbosity: Verbosity,
}

impl<C, O> HexlensApp<C, O>
where
    C: ConfigProvider,
    O: OutputFormatter,
{
    /// Create a new instance of HexlensApp
    pub fn new(config_provider: C, output_formatter: O) -> Self {
        Self {
            config_provider,
            output_formatter,
            verbosity: Verbosity::default(),
        }
    }

    /// Set the verbosity level
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Run the hexagon command
    pub fn hexagon(&self, args: HexagonArgs) -> Result<CommandOutput, HexlensError> {
        let base_dir = args
            .input
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(args.project.as_path());
        let config = self.load_config(base_dir)?;

        let packages = match &args.input {
            Some(path) => input::load_packages(path)?,
            None => Vec::new(),
        };
        let skip = config.general.skip_orchestrators && !args.include_orchestrators;
        let packages = grouping::visible_packages(packages, skip);
        let required_tier = args.min_tier.or(config.general.min_tier);

        if packages.is_empty() {
            let has_workflow = input::has_workflow(&args.project);
            debug!("No packages to show, workflow present: {}", has_workflow);
            return Ok(CommandOutput {
                text: self.output_formatter.format_empty_state(has_workflow),
                overall_tier: None,
                required_tier,
            });
        }

        self.explain_packages(&packages);

        Ok(CommandOutput {
            text: self.output_formatter.format_hexagon_panel(&packages, &config),
            overall_tier: Some(grouping::panel_overall_tier(&packages)),
            required_tier,
        })
    }

    /// Run the grid command
    pub fn grid(&self, args: GridArgs) -> Result<CommandOutput, HexlensError> {
        let config = self.load_config(parent_dir(&args.input))?;
        let repositories = input::load_repositories(&args.input)?;

        let items = grouping::flatten_repositories(&repositories);
        let summary = GridSummary::new(&repositories, &items);
        info!(
            "{} {} across {} {}",
            summary.package_count,
            summary.package_noun(),
            summary.repository_count,
            summary.repository_noun()
        );

        Ok(CommandOutput {
            text: self
                .output_formatter
                .format_grid(&repositories, args.metric, &config),
            overall_tier: (!items.is_empty()).then_some(summary.overall_tier),
            required_tier: args.min_tier.or(config.general.min_tier),
        })
    }

    /// Run the debug command
    pub fn debug(&self, args: DebugArgs) -> Result<CommandOutput, HexlensError> {
        let mut config = self.load_config(parent_dir(&args.input))?;
        if args.files {
            config.output.show_analyzed_files = true;
        }

        let results = input::load_results(&args.input)?;
        let groups = grouping::group_by_package_name(&results.results);

        let package = match &args.package {
            Some(name) if groups.contains_key(name.as_str()) => name.clone(),
            Some(name) => return Err(InputError::UnknownPackage(name.clone()).into()),
            None => groups
                .keys()
                .next()
                .map(|name| name.to_string())
                .unwrap_or_else(|| UNKNOWN_PACKAGE.to_string()),
        };
        debug!("Showing lens data for {}", package);

        Ok(CommandOutput::text(
            self.output_formatter
                .format_debug(&results, &package, &config),
        ))
    }

    /// Run the tier command
    pub fn tier(&self, args: TierArgs) -> Result<CommandOutput, HexlensError> {
        let metrics = args.metrics();
        input::validate_metrics("<args>", &metrics)?;

        let lenses_ran = args.lenses.as_deref();
        if self.verbosity >= Verbosity::Verbose {
            if let Some(ids) = lenses_ran {
                for id in lenses::unmapped_lenses(ids) {
                    eprintln!("Lens '{}' does not feed any metric", id);
                }
            }
        }

        Ok(CommandOutput {
            text: self.output_formatter.format_tier(&metrics, lenses_ran),
            overall_tier: Some(scoring::tier_for_lenses(&metrics, lenses_ran)),
            required_tier: None,
        })
    }

    /// Run the svg command, writing to `args.output` when given
    pub fn svg(&self, args: SvgArgs) -> Result<CommandOutput, HexlensError> {
        let config = self.load_config(parent_dir(&args.input))?;
        let packages = input::load_chart_packages(&args.input)?;
        let package = select_package(&packages, args.package.as_deref(), &args.input)?;

        let lenses_ran = package.lenses_ran.as_deref();
        let geometry = RadarGeometry::new(&config.radar);
        let chart = RadarChart::layout(&package.metrics, lenses_ran, geometry);
        let tier = scoring::tier_for_lenses(&package.metrics, lenses_ran);
        let options = SvgOptions {
            show_labels: config.radar.show_labels && !args.no_labels,
            show_values: config.output.show_values || args.values,
        };
        let svg = render_svg(&chart, &package.metrics, tier, options);

        match &args.output {
            Some(path) => {
                fs::write(path, &svg).map_err(|source| RenderError::Write {
                    path: path.clone(),
                    source,
                })?;
                info!("Wrote {} hexagon to {:?}", package.name, path);
                Ok(CommandOutput::text(String::new()))
            }
            None => Ok(CommandOutput::text(svg)),
        }
    }

    // Helper methods

    /// Load configuration for inputs under `base_dir`
    fn load_config(&self, base_dir: &Path) -> Result<HexlensConfig, HexlensError> {
        Ok(self.config_provider.load_config(base_dir)?)
    }

    /// Explain the scores of each package in verbose mode
    fn explain_packages(&self, packages: &[PackageQuality]) {
        if self.verbosity < Verbosity::Verbose {
            return;
        }
        for pkg in packages {
            let configured = scoring::configured_metrics(pkg.lenses_ran.as_deref());
            eprintln!(
                "{}: average {:.2} over {:?}",
                pkg.name,
                scoring::average_score(&pkg.metrics, Some(&configured)),
                configured
            );
            if let Some(ids) = &pkg.lenses_ran {
                for id in lenses::unmapped_lenses(ids) {
                    eprintln!("  lens '{}' does not feed any metric", id);
                }
            }
        }
    }
}

fn parent_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new("."))
}

/// Pick a package by name, or the first one
fn select_package<'a>(
    packages: &'a [PackageQuality],
    name: Option<&str>,
    source: &Path,
) -> Result<&'a PackageQuality, InputError> {
    match name {
        Some(name) => packages
            .iter()
            .find(|pkg| pkg.name == name)
            .ok_or_else(|| InputError::UnknownPackage(name.to_string())),
        None => packages
            .first()
            .ok_or_else(|| InputError::NoPackages(source.to_path_buf())),
    }
}
