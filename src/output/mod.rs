//! Output formatting for Hexlens

pub mod terminal;

use chrono::DateTime;
use colored::Colorize;
use enum_iterator::all;
use indexmap::IndexMap;
use serde::Serialize;

use crate::config::HexlensConfig;
use crate::grouping::{self, GridSummary, MetricDisplay, PackageSummary};
use crate::input::WORKFLOW_FILE_PATH;
use crate::models::{
    split_scoped_name, AnalyzedFile, Coverage, FileMetric, FlatGridItem, FormattedResults, Issue,
    IssueSeverity, LensResult, MetricKey, PackageQuality, QualityMetrics, QualityTier, RepositoryQualityItem,
    VertexInfo, DISPLAY_ORDER,
};
use crate::scoring::{self, ValueBand};
use terminal::{
    band_badge, band_colored, divider, metric_label, percent, section_header, severity_colored,
    tier_colored, value_bar,
};

/// Trait for formatting output
pub trait OutputFormatter {
    /// Per-package hexagons with the overall tier
    fn format_hexagon_panel(&self, packages: &[PackageQuality], config: &HexlensConfig) -> String;

    /// Grid of packages across repositories
    fn format_grid(
        &self,
        repositories: &[RepositoryQualityItem],
        selected: Option<MetricKey>,
        config: &HexlensConfig,
    ) -> String;

    /// Raw lens data for one package
    fn format_debug(&self, results: &FormattedResults, package: &str, config: &HexlensConfig)
        -> String;

    /// Score breakdown for a single metrics snapshot
    fn format_tier(&self, metrics: &QualityMetrics, lenses_ran: Option<&[String]>) -> String;

    /// Guidance shown when there is no quality data yet
    fn format_empty_state(&self, has_workflow: bool) -> String;
}

/// Scored view of one package
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageView {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub tier: QualityTier,
    pub score: i64,
    pub average: f64,
    pub configured: Vec<MetricKey>,
    pub metrics: QualityMetrics,
    pub rows: Vec<MetricRowView>,
}

impl PackageView {
    pub fn new(pkg: &PackageQuality) -> Self {
        let configured = scoring::configured_metrics(pkg.lenses_ran.as_deref());
        Self {
            name: pkg.name.clone(),
            version: pkg.version.clone(),
            path: pkg.path.clone(),
            tier: scoring::calculate_quality_tier(&pkg.metrics, Some(&configured)),
            score: scoring::display_score(&pkg.metrics, Some(&configured)),
            average: scoring::average_score(&pkg.metrics, Some(&configured)),
            configured,
            metrics: pkg.metrics,
            rows: MetricRowView::rows(&pkg.metrics, pkg.lenses_ran.as_deref()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct HexagonPanelView {
    overall_tier: QualityTier,
    packages: Vec<PackageView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GridRowView<'a> {
    label: String,
    #[serde(flatten)]
    item: &'a FlatGridItem,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected: Option<MetricDisplay>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GridView<'a> {
    summary: GridSummary,
    items: Vec<GridRowView<'a>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct LensView<'a> {
    key: String,
    id: &'a str,
    command: &'a str,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<f64>,
    issues_by_file: IndexMap<&'a str, Vec<&'a Issue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    coverage: Option<&'a Coverage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_metrics: Option<&'a [FileMetric]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    analyzed_files: Option<&'a [AnalyzedFile]>,
}

impl<'a> LensView<'a> {
    fn new(result: &'a LensResult) -> Self {
        Self {
            key: result.lens_key(),
            id: &result.lens.id,
            command: &result.lens.command,
            success: result.execution.success,
            exit_code: result.execution.exit_code,
            duration: result.execution.duration,
            issues_by_file: grouping::group_issues_by_file(&result.issues),
            coverage: result.coverage.as_ref(),
            file_metrics: result.file_metrics.as_deref(),
            analyzed_files: result.analyzed_files.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct DebugView<'a> {
    package: &'a str,
    package_names: Vec<&'a str>,
    summary: PackageSummary,
    lenses: Vec<LensView<'a>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct TierView {
    average: f64,
    score: i64,
    tier: QualityTier,
    configured: Vec<MetricKey>,
    vertices: Vec<VertexInfo>,
    rows: Vec<MetricRowView>,
}

/// One metric row with its band styling, `band` is absent when unconfigured
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRowView {
    pub key: MetricKey,
    pub label: &'static str,
    pub description: &'static str,
    pub value: f64,
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<ValueBand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<&'static str>,
}

impl MetricRowView {
    /// Rows in display order
    pub fn rows(metrics: &QualityMetrics, lenses_ran: Option<&[String]>) -> Vec<Self> {
        DISPLAY_ORDER
            .iter()
            .map(|&key| {
                let value = metrics.get(key);
                let configured = scoring::is_metric_configured(key, lenses_ran);
                let band = configured.then(|| ValueBand::of(value, key));
                Self {
                    key,
                    label: key.long_label(),
                    description: key.description(),
                    value,
                    configured,
                    band,
                    color: band.map(|b| b.color()),
                    background: band.map(|b| b.background()),
                }
            })
            .collect()
    }
}

/// Grid items sorted by package name
fn sorted_grid_items(repositories: &[RepositoryQualityItem]) -> Vec<FlatGridItem> {
    let mut items = grouping::flatten_repositories(repositories);
    grouping::sort_by_package_name(&mut items);
    items
}

/// Default implementation that uses pretty formatting with colors
#[derive(Clone)]
pub struct PrettyFormatter {
    /// Whether to use emojis
    use_emoji: bool,
}

impl Default for PrettyFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl PrettyFormatter {
    /// Create a new PrettyFormatter
    pub fn new() -> Self {
        Self { use_emoji: true }
    }

    /// Create a PrettyFormatter with emoji turned on or off
    pub fn with_emoji(use_emoji: bool) -> Self {
        Self { use_emoji }
    }

    fn emoji(&self, symbol: &'static str) -> &'static str {
        if self.use_emoji {
            symbol
        } else {
            ""
        }
    }

    fn emoji_enabled(&self, config: &HexlensConfig) -> bool {
        self.use_emoji && config.output.use_emoji
    }

    /// Metric rows for one package
    fn metric_rows(
        &self,
        metrics: &QualityMetrics,
        lenses_ran: Option<&[String]>,
        use_emoji: bool,
    ) -> String {
        let mut output = String::new();
        for key in DISPLAY_ORDER {
            let label = metric_label(key, use_emoji);
            if !scoring::is_metric_configured(key, lenses_ran) {
                output.push_str(&format!(
                    "    {:<18} {}  {:>6}  {}\n",
                    label,
                    value_bar(0.0, 20).dimmed(),
                    "N/A".dimmed(),
                    key.description().dimmed()
                ));
                continue;
            }

            let value = metrics.get(key);
            let band = ValueBand::of(value, key);
            let bar = value_bar(scoring::effective_value(metrics, key), 20);
            output.push_str(&format!(
                "    {:<18} {}  {}  {}\n",
                label,
                band_colored(&bar, band),
                band_badge(&format!("{:>6}", percent(value)), band),
                key.description().dimmed()
            ));
        }
        output
    }

    fn package_header(&self, view: &PackageView, use_emoji: bool) -> String {
        let (scope, name) = split_scoped_name(&view.name);
        let scope = scope.map(|s| format!("{}/", s).dimmed().to_string()).unwrap_or_default();
        let version = view
            .version
            .as_ref()
            .map(|v| format!(" v{}", v).dimmed().to_string())
            .unwrap_or_default();
        let tier_emoji = if use_emoji { view.tier.emoji() } else { "" };

        format!(
            "  {}{}{}   {} {}   avg {}\n",
            scope,
            name.bold(),
            version,
            tier_emoji,
            tier_colored(view.tier),
            view.score
        )
    }
}

impl OutputFormatter for PrettyFormatter {
    fn format_hexagon_panel(&self, packages: &[PackageQuality], config: &HexlensConfig) -> String {
        let use_emoji = self.emoji_enabled(config);
        let overall = grouping::panel_overall_tier(packages);
        let mut output = section_header("Quality Hexagon");

        let noun = if packages.len() == 1 { "package" } else { "packages" };
        output.push_str(&format!(
            "  {} Overall: {}  ({} {})\n",
            if use_emoji { overall.emoji() } else { "" },
            tier_colored(overall),
            packages.len(),
            noun
        ));

        for pkg in packages {
            let view = PackageView::new(pkg);
            output.push_str(&format!("\n{}\n", divider(60)));
            output.push_str(&self.package_header(&view, use_emoji));
            if let Some(path) = &pkg.path {
                output.push_str(&format!("  {}\n", path.dimmed()));
            }
            output.push('\n');
            output.push_str(&self.metric_rows(&pkg.metrics, pkg.lenses_ran.as_deref(), use_emoji));
        }

        output.push_str(&format!("\n{}\n", divider(60)));
        output
    }

    fn format_grid(
        &self,
        repositories: &[RepositoryQualityItem],
        selected: Option<MetricKey>,
        config: &HexlensConfig,
    ) -> String {
        let use_emoji = self.emoji_enabled(config);
        let items = sorted_grid_items(repositories);

        if items.is_empty() {
            return "No repositories to display\n".to_string();
        }

        let summary = GridSummary::new(repositories, &items);
        let mut output = section_header("Repository Quality");
        output.push_str(&format!(
            "  {} {} • {} {}   {} {}\n",
            summary.package_count,
            summary.package_noun(),
            summary.repository_count,
            summary.repository_noun(),
            if use_emoji { summary.overall_tier.emoji() } else { "" },
            tier_colored(summary.overall_tier)
        ));
        output.push_str(&format!("{}\n", divider(60)));

        for item in &items {
            let label = grouping::grid_label(item, config.output.show_repository_name);
            let detail = match selected {
                Some(key) => {
                    let display = grouping::metric_display(item, key);
                    format!(
                        "{}: {}",
                        display.label,
                        band_colored(&percent(display.value), display.band)
                    )
                }
                None => format!(
                    "{} {}  avg {}",
                    if use_emoji { item.tier.emoji() } else { "" },
                    tier_colored(item.tier),
                    scoring::display_score(&item.metrics, None)
                ),
            };
            output.push_str(&format!("  {:<40} {}\n", label, detail));
        }

        output
    }

    fn format_debug(
        &self,
        results: &FormattedResults,
        package: &str,
        config: &HexlensConfig,
    ) -> String {
        let use_emoji = self.emoji_enabled(config);
        let groups = grouping::group_by_package_name(&results.results);
        let runs: &[&LensResult] = groups.get(package).map(Vec::as_slice).unwrap_or(&[]);
        let summary = grouping::package_summary(runs.iter().copied());

        let mut output = section_header(&format!("Lens Data: {}", package));

        let names: Vec<String> = groups
            .keys()
            .map(|name| {
                if *name == package {
                    name.bold().to_string()
                } else {
                    name.dimmed().to_string()
                }
            })
            .collect();
        output.push_str(&format!("  Packages: {}\n", names.join(", ")));
        output.push_str(&format!(
            "  {} lenses · {} passed · {} failed · {} errors · {} warnings\n",
            summary.lens_count,
            summary.pass_count.to_string().green(),
            summary.fail_count.to_string().red(),
            summary.total_errors.to_string().red(),
            summary.total_warnings.to_string().yellow()
        ));

        for run in runs {
            output.push_str(&format!("\n{}\n", divider(60)));
            let status = if run.execution.success {
                "✓".green()
            } else {
                "✗".red()
            };
            let mut header = format!("  {} {}  {}", status, run.lens.id.bold(), run.lens.command.dimmed());
            if let Some(code) = run.execution.exit_code {
                header.push_str(&format!("  exit {}", code));
            }
            if let Some(duration) = run.execution.duration {
                header.push_str(&format!("  {:.0}ms", duration));
            }
            if let Some(ran_at) = DateTime::from_timestamp_millis(run.execution.timestamp)
                .filter(|_| run.execution.timestamp > 0)
            {
                header.push_str(&format!(
                    "  {}",
                    ran_at.format("%Y-%m-%d %H:%M:%S UTC").to_string().dimmed()
                ));
            }
            output.push_str(&header);
            output.push('\n');

            let counts = &run.metrics.issues_by_severity;
            let breakdown: Vec<String> = all::<IssueSeverity>()
                .map(|severity| format!("{} {}", counts.get(severity), severity))
                .collect();
            output.push_str(&format!(
                "    Files analyzed: {} · Issues: {} ({})\n",
                run.metrics.files_analyzed,
                run.metrics.total_issues,
                breakdown.join(", ")
            ));

            if let Some(custom) = &run.metrics.custom {
                for (key, value) in custom {
                    output.push_str(&format!("    {}: {}\n", key.dimmed(), value));
                }
            }

            for (file, issues) in grouping::group_issues_by_file(&run.issues) {
                output.push_str(&format!("    {} ({})\n", file.underline(), issues.len()));
                for issue in issues.iter().take(config.output.max_issues_per_file) {
                    let position = match issue.column {
                        Some(column) => format!("{}:{}", issue.line, column),
                        None => issue.line.to_string(),
                    };
                    let rule = issue
                        .rule
                        .as_ref()
                        .map(|r| format!(" [{}]", r).dimmed().to_string())
                        .unwrap_or_default();
                    let icon = if use_emoji {
                        issue.severity.emoji().to_string()
                    } else {
                        severity_colored(&issue.severity.to_string(), issue.severity).to_string()
                    };
                    output.push_str(&format!(
                        "      {} {:<8} {}{}\n",
                        icon, position, issue.message, rule
                    ));
                }
                if issues.len() > config.output.max_issues_per_file {
                    output.push_str(&format!(
                        "      … {} more\n",
                        issues.len() - config.output.max_issues_per_file
                    ));
                }
            }

            if let Some(coverage) = &run.coverage {
                let mut parts = vec![format!("line {}", percent(coverage.line))];
                if let Some(branch) = coverage.branch {
                    parts.push(format!("branch {}", percent(branch)));
                }
                if let Some(function) = coverage.function {
                    parts.push(format!("function {}", percent(function)));
                }
                if let Some(statement) = coverage.statement {
                    parts.push(format!("statement {}", percent(statement)));
                }
                output.push_str(&format!("    {}Coverage: {}\n", self.emoji("📈 "), parts.join(" · ")));
                for file in coverage.files.iter().flatten() {
                    output.push_str(&format!("      {:<40} {}\n", file.file, percent(file.lines)));
                }
            }

            if let Some(file_metrics) = &run.file_metrics {
                output.push_str("    File scores:\n");
                for metric in file_metrics {
                    output.push_str(&format!(
                        "      {:<40} {:>5.1}  ({} issues, {} errors, {} warnings)\n",
                        metric.file,
                        metric.score,
                        metric.issue_count,
                        metric.error_count,
                        metric.warning_count
                    ));
                }
            }

            if let Some(files) = &run.analyzed_files {
                let with_issues = files.iter().filter(|f| f.has_issues).count();
                output.push_str(&format!(
                    "    Analyzed files: {} ({} with issues)\n",
                    files.len(),
                    with_issues
                ));
                if config.output.show_analyzed_files {
                    for file in files {
                        let marker = if file.has_issues { "●".red() } else { "○".green() };
                        output.push_str(&format!("      {} {}\n", marker, file.path));
                    }
                }
            }
        }

        output
    }

    fn format_tier(&self, metrics: &QualityMetrics, lenses_ran: Option<&[String]>) -> String {
        let configured = scoring::configured_metrics(lenses_ran);
        let tier = scoring::calculate_quality_tier(metrics, Some(&configured));
        let average = scoring::average_score(metrics, Some(&configured));

        let mut output = section_header("Quality Tier");
        output.push_str(&format!(
            "  {}{}  average {:.2} ({} of 6 metrics)\n\n",
            self.emoji(tier.emoji()),
            tier_colored(tier),
            average,
            configured.len()
        ));
        output.push_str(&self.metric_rows(metrics, lenses_ran, self.use_emoji));
        output
    }

    fn format_empty_state(&self, has_workflow: bool) -> String {
        let mut output = section_header("No Quality Data");
        if has_workflow {
            output.push_str(&format!(
                "  {}The {} workflow is set up but has not produced results yet.\n",
                self.emoji("⏳ "),
                WORKFLOW_FILE_PATH.bold()
            ));
            output.push_str("  Push a commit or trigger the workflow, then load its results file.\n");
        } else {
            output.push_str(&format!(
                "  {}Collect quality data by adding {} to your repository:\n\n",
                self.emoji("🚀 "),
                WORKFLOW_FILE_PATH.bold()
            ));
            output.push_str("    npx @principal-ai/quality-lens-cli init\n");
            output.push_str("    npx @principal-ai/quality-lens-cli run --output quality-results.json\n");
        }
        output
    }
}

/// JSON formatter for machine-readable output
#[derive(Clone, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

impl OutputFormatter for JsonFormatter {
    fn format_hexagon_panel(&self, packages: &[PackageQuality], _config: &HexlensConfig) -> String {
        to_json(&HexagonPanelView {
            overall_tier: grouping::panel_overall_tier(packages),
            packages: packages.iter().map(PackageView::new).collect(),
        })
    }

    fn format_grid(
        &self,
        repositories: &[RepositoryQualityItem],
        selected: Option<MetricKey>,
        config: &HexlensConfig,
    ) -> String {
        let items = sorted_grid_items(repositories);
        let summary = GridSummary::new(repositories, &items);
        let rows = items
            .iter()
            .map(|item| GridRowView {
                label: grouping::grid_label(item, config.output.show_repository_name),
                item,
                selected: selected.map(|key| grouping::metric_display(item, key)),
            })
            .collect();

        to_json(&GridView {
            summary,
            items: rows,
        })
    }

    fn format_debug(
        &self,
        results: &FormattedResults,
        package: &str,
        _config: &HexlensConfig,
    ) -> String {
        let groups = grouping::group_by_package_name(&results.results);
        let runs: &[&LensResult] = groups.get(package).map(Vec::as_slice).unwrap_or(&[]);

        to_json(&DebugView {
            package,
            package_names: groups.keys().copied().collect(),
            summary: grouping::package_summary(runs.iter().copied()),
            lenses: runs.iter().map(|run| LensView::new(run)).collect(),
        })
    }

    fn format_tier(&self, metrics: &QualityMetrics, lenses_ran: Option<&[String]>) -> String {
        let configured = scoring::configured_metrics(lenses_ran);
        to_json(&TierView {
            average: scoring::average_score(metrics, Some(&configured)),
            score: scoring::display_score(metrics, Some(&configured)),
            tier: scoring::calculate_quality_tier(metrics, Some(&configured)),
            configured,
            vertices: all::<MetricKey>()
                .map(|key| VertexInfo::new(metrics, key))
                .collect(),
            rows: MetricRowView::rows(metrics, lenses_ran),
        })
    }

    fn format_empty_state(&self, has_workflow: bool) -> String {
        to_json(&serde_json::json!({
            "hasData": false,
            "hasWorkflow": has_workflow,
            "workflowPath": WORKFLOW_FILE_PATH,
        }))
    }
}
