//! Loading and validation of quality data files

use enum_iterator::all;
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::errors::InputError;
use crate::grouping;
use crate::models::{
    FormattedResults, MetricKey, PackageQuality, QualityMetrics, RepositoriesQuality,
    RepositoryQualityItem,
};

/// Workflow that produces the quality data
pub const WORKFLOW_FILE_PATH: &str = ".github/workflows/quality-lens.yml";

/// Reject metrics that are not finite percentages
pub fn validate_metrics(package: &str, metrics: &QualityMetrics) -> Result<(), InputError> {
    for metric in all::<MetricKey>() {
        let value = metrics.get(metric);
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(InputError::MetricOutOfRange {
                package: package.to_string(),
                metric,
                value,
            });
        }
    }
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, InputError> {
    debug!("Reading {:?}", path);
    let content = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| InputError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn from_value<T: DeserializeOwned>(path: &Path, value: Value) -> Result<T, InputError> {
    serde_json::from_value(value).map_err(|source| InputError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a quality-lens results file
pub fn load_results(path: &Path) -> Result<FormattedResults, InputError> {
    let results: FormattedResults = read_json(path)?;
    if let Some(section) = &results.quality_metrics {
        for pkg in &section.packages {
            validate_metrics(&pkg.name, &pkg.hexagon)?;
        }
    }
    info!(
        "Loaded {} lens results from {:?}",
        results.results.len(),
        path
    );
    Ok(results)
}

/// Load repositories from either a bare array or `{ "repositories": [...] }`
pub fn load_repositories(path: &Path) -> Result<Vec<RepositoryQualityItem>, InputError> {
    let value: Value = read_json(path)?;
    let repositories = if value.is_array() {
        from_value::<Vec<RepositoryQualityItem>>(path, value)?
    } else {
        from_value::<RepositoriesQuality>(path, value)?.repositories
    };

    for repo in &repositories {
        for pkg in &repo.packages {
            validate_metrics(&pkg.name, &pkg.metrics)?;
        }
    }
    info!("Loaded {} repositories from {:?}", repositories.len(), path);
    Ok(repositories)
}

#[derive(Deserialize)]
struct PackagesReport {
    packages: Vec<PackageQuality>,
}

/// Packages of a quality report, or of a results file with its hexagon
/// section. `None` when a results file carries no quality metrics.
fn read_packages(path: &Path) -> Result<Option<Vec<PackageQuality>>, InputError> {
    let value: Value = read_json(path)?;
    let packages = if value.get("packages").is_some() {
        Some(from_value::<PackagesReport>(path, value)?.packages)
    } else {
        let results: FormattedResults = from_value(path, value)?;
        results
            .quality_metrics
            .is_some()
            .then(|| grouping::package_qualities(&results))
    };

    for pkg in packages.iter().flatten() {
        validate_metrics(&pkg.name, &pkg.metrics)?;
    }
    Ok(packages)
}

/// Load hexagon panel packages from a quality report or a results file.
///
/// A results file without quality metrics yields no packages.
pub fn load_packages(path: &Path) -> Result<Vec<PackageQuality>, InputError> {
    match read_packages(path)? {
        Some(packages) => Ok(packages),
        None => {
            info!("No quality metrics in {:?}", path);
            Ok(Vec::new())
        }
    }
}

/// Like [`load_packages`], but a results file must carry quality metrics
pub fn load_chart_packages(path: &Path) -> Result<Vec<PackageQuality>, InputError> {
    read_packages(path)?.ok_or_else(|| InputError::MissingQualityMetrics(path.to_path_buf()))
}

/// Whether `target` is among `files`, ignoring case and a leading `/`
pub fn file_exists_in_tree<S: AsRef<str>>(files: &[S], target: &str) -> bool {
    let target = target.trim_start_matches('/').to_lowercase();
    files.iter().any(|file| {
        let file = file.as_ref().to_lowercase();
        file == target || file.ends_with(&target)
    })
}

/// Whether the project at `root` has the quality-lens workflow set up
pub fn has_workflow(root: &Path) -> bool {
    let github_dir = root.join(".github");
    if !github_dir.is_dir() {
        return false;
    }

    let files: Vec<String> = WalkDir::new(&github_dir)
        .max_depth(3)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .ok()
                .map(|p| p.to_string_lossy().replace('\\', "/"))
        })
        .collect();

    file_exists_in_tree(&files, WORKFLOW_FILE_PATH)
}
