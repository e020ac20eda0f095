//! Grouping and flattening of lens results and repository data

use indexmap::IndexMap;
use log::{debug, warn};
use serde::Serialize;
use std::cmp::Ordering;

use crate::models::{
    FlatGridItem, FormattedResults, Issue, LensResult, MetricKey, PackageQuality, QualityTier,
    RepositoryQualityItem,
};
use crate::scoring::{self, lenses, ValueBand};

/// Group key for results without a package name
pub const UNKNOWN_PACKAGE: &str = "unknown";

/// Group results by package name, keeping first-seen order.
///
/// Missing or empty names are grouped under [`UNKNOWN_PACKAGE`].
pub fn group_by_package_name<'a, I>(results: I) -> IndexMap<&'a str, Vec<&'a LensResult>>
where
    I: IntoIterator<Item = &'a LensResult>,
{
    let mut groups: IndexMap<&str, Vec<&LensResult>> = IndexMap::new();
    for result in results {
        let name = result
            .package
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_PACKAGE);
        groups.entry(name).or_default().push(result);
    }
    debug!("Grouped results into {} packages", groups.len());
    groups
}

/// Group issues by file path, keeping first-seen order.
///
/// Issues without a file are left out entirely.
pub fn group_issues_by_file<'a, I>(issues: I) -> IndexMap<&'a str, Vec<&'a Issue>>
where
    I: IntoIterator<Item = &'a Issue>,
{
    let mut files: IndexMap<&str, Vec<&Issue>> = IndexMap::new();
    for issue in issues {
        match issue.file.as_deref() {
            Some(file) if !file.is_empty() => files.entry(file).or_default().push(issue),
            _ => continue,
        }
    }
    files
}

/// One grid item per (repository, package), in input order
pub fn flatten_repositories(repositories: &[RepositoryQualityItem]) -> Vec<FlatGridItem> {
    repositories
        .iter()
        .flat_map(|repo| {
            repo.packages.iter().map(move |pkg| FlatGridItem {
                key: format!("{}:{}", repo.id, pkg.name),
                repository_id: repo.id.clone(),
                repository_name: repo.name.clone(),
                repository_path: repo.path.clone(),
                package_name: pkg.name.clone(),
                version: pkg.version.clone(),
                metrics: pkg.metrics,
                tier: scoring::calculate_quality_tier(&pkg.metrics, None),
            })
        })
        .collect()
}

/// Case-insensitive compare, falling back to the exact names
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Stable sort of grid items by package name
pub fn sort_by_package_name(items: &mut [FlatGridItem]) {
    items.sort_by(|a, b| compare_names(&a.package_name, &b.package_name));
}

/// Display label for a grid item: `repo / package`, or just the package
pub fn grid_label(item: &FlatGridItem, show_repository_name: bool) -> String {
    if !show_repository_name || item.package_name == item.repository_name {
        item.package_name.clone()
    } else {
        format!("{} / {}", item.repository_name, item.package_name)
    }
}

/// Value of one metric on a grid item, as shown when a metric is selected
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricDisplay {
    pub label: &'static str,
    pub value: f64,
    pub band: ValueBand,
}

pub fn metric_display(item: &FlatGridItem, key: MetricKey) -> MetricDisplay {
    let value = item.metrics.get(key);
    MetricDisplay {
        label: key.label(),
        value,
        band: ValueBand::of(value, key),
    }
}

/// Header line data for the repository grid
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSummary {
    pub package_count: usize,
    pub repository_count: usize,
    pub overall_tier: QualityTier,
}

impl GridSummary {
    pub fn new(repositories: &[RepositoryQualityItem], items: &[FlatGridItem]) -> Self {
        Self {
            package_count: items.len(),
            repository_count: repositories.len(),
            overall_tier: scoring::calculate_overall_tier(items.iter().map(|i| &i.metrics), None),
        }
    }

    pub fn package_noun(&self) -> &'static str {
        if self.package_count == 1 {
            "package"
        } else {
            "packages"
        }
    }

    pub fn repository_noun(&self) -> &'static str {
        if self.repository_count == 1 {
            "repository"
        } else {
            "repositories"
        }
    }
}

/// Totals across the lens runs of one package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSummary {
    pub total_errors: usize,
    pub total_warnings: usize,
    pub pass_count: usize,
    pub fail_count: usize,
    pub lens_count: usize,
}

pub fn package_summary<'a, I>(results: I) -> PackageSummary
where
    I: IntoIterator<Item = &'a LensResult>,
{
    results
        .into_iter()
        .fold(PackageSummary::default(), |mut summary, result| {
            summary.total_errors += result.metrics.issues_by_severity.error;
            summary.total_warnings += result.metrics.issues_by_severity.warning;
            if result.execution.success {
                summary.pass_count += 1;
            } else {
                summary.fail_count += 1;
            }
            summary.lens_count += 1;
            summary
        })
}

/// Hexagon panel packages built from a results file.
///
/// Each package gets the ids of the lenses that ran against it; packages
/// with no runs leave `lenses_ran` unset so all metrics count as configured.
pub fn package_qualities(results: &FormattedResults) -> Vec<PackageQuality> {
    let groups = group_by_package_name(&results.results);

    let Some(section) = &results.quality_metrics else {
        return Vec::new();
    };

    section
        .packages
        .iter()
        .map(|pkg| {
            let lenses_ran = groups.get(pkg.name.as_str()).map(|runs| {
                let mut ids: Vec<String> = Vec::new();
                for run in runs {
                    if !ids.contains(&run.lens.id) {
                        ids.push(run.lens.id.clone());
                    }
                }
                ids
            });

            PackageQuality {
                name: pkg.name.clone(),
                path: pkg.path.clone(),
                version: None,
                metrics: pkg.hexagon,
                lenses_ran,
                is_orchestrator: false,
            }
        })
        .collect()
}

/// Packages to show, dropping orchestrators when asked to
pub fn visible_packages(packages: Vec<PackageQuality>, skip_orchestrators: bool) -> Vec<PackageQuality> {
    if !skip_orchestrators {
        return packages;
    }
    packages
        .into_iter()
        .filter(|pkg| {
            if pkg.is_orchestrator {
                warn!("Skipping orchestrator package {}", pkg.name);
            }
            !pkg.is_orchestrator
        })
        .collect()
}

/// Overall tier for the hexagon panel, honouring every package's lenses
pub fn panel_overall_tier(packages: &[PackageQuality]) -> QualityTier {
    let lenses_ran = lenses::merge_lenses(packages.iter().map(|p| p.lenses_ran.as_deref()));
    scoring::calculate_overall_tier(packages.iter().map(|p| &p.metrics), lenses_ran.as_deref())
}
