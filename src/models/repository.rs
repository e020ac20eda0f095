use serde::{Deserialize, Serialize};

use super::metrics::{QualityMetrics, QualityTier};

/// A repository with one or more packages (monorepos have several)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryQualityItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub packages: Vec<PackageQualityItem>,
}

/// A single package within a repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageQualityItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub metrics: QualityMetrics,
}

/// Wrapper used by the repositories input file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RepositoriesQuality {
    #[serde(default)]
    pub repositories: Vec<RepositoryQualityItem>,
}

/// One grid row per (repository, package) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatGridItem {
    /// `"{repository id}:{package name}"`
    pub key: String,
    pub repository_id: String,
    pub repository_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_path: Option<String>,
    pub package_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub metrics: QualityMetrics,
    pub tier: QualityTier,
}

/// Package data shown by the hexagon panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageQuality {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub metrics: QualityMetrics,

    /// Lens ids that actually ran for this package
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lenses_ran: Option<Vec<String>>,

    /// Monorepo orchestrator packages are config-only, with no source
    #[serde(default)]
    pub is_orchestrator: bool,
}

/// Splits `@scope/name` into its scope and bare name
pub fn split_scoped_name(name: &str) -> (Option<&str>, &str) {
    if name.starts_with('@') {
        if let Some((scope, rest)) = name.split_once('/') {
            return (Some(scope), rest);
        }
    }
    (None, name)
}
