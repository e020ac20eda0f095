use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::{Display, EnumString};

use super::metrics::QualityMetrics;

/// Full output of one quality-lens run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedResults {
    pub metadata: ResultsMetadata,

    #[serde(default)]
    pub results: Vec<LensResult>,

    /// Per-package hexagon scores, absent when the run did not compute them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_metrics: Option<QualityMetricsSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsMetadata {
    pub timestamp: String,
    pub version: String,
    #[serde(default)]
    pub total_packages: usize,
    #[serde(default)]
    pub total_lenses: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git: Option<GitInfo>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GitInfo {
    pub commit: Option<String>,
    pub branch: Option<String>,
    pub repository: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QualityMetricsSection {
    #[serde(default)]
    pub packages: Vec<PackageHexagon>,
}

/// Hexagon scores computed by the tool for one package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageHexagon {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub hexagon: QualityMetrics,
}

/// One execution of one lens (analysis tool) against one package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LensResult {
    #[serde(default)]
    pub package: PackageRef,
    pub lens: LensRef,
    pub execution: Execution,
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub metrics: LensMetrics,

    /// Per-file score breakdown, `None` when the lens does not score files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_metrics: Option<Vec<FileMetric>>,

    /// Coverage percentages; an explicit `null` also means "not measured"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage: Option<Coverage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzed_files: Option<Vec<AnalyzedFile>>,
}

impl LensResult {
    /// Key identifying this run inside a package (`lens id` + command)
    pub fn lens_key(&self) -> String {
        format!("{}:{}", self.lens.id, self.lens.command)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PackageRef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LensRef {
    pub id: String,
    #[serde(default)]
    pub command: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,

    /// Wall time in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    /// Unix epoch milliseconds
    #[serde(default)]
    pub timestamp: i64,
}

/// Aggregate counters reported by a lens
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LensMetrics {
    #[serde(default)]
    pub files_analyzed: usize,
    #[serde(default)]
    pub total_issues: usize,
    #[serde(default)]
    pub issues_by_severity: SeverityCounts,
    #[serde(default)]
    pub execution_time: f64,

    /// Tool specific extras, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeverityCounts {
    #[serde(default)]
    pub error: usize,
    #[serde(default)]
    pub warning: usize,
    #[serde(default)]
    pub info: usize,
    #[serde(default)]
    pub hint: usize,
}

impl SeverityCounts {
    pub fn get(&self, severity: IssueSeverity) -> usize {
        match severity {
            IssueSeverity::Error => self.error,
            IssueSeverity::Warning => self.warning,
            IssueSeverity::Info => self.info,
            IssueSeverity::Hint => self.hint,
        }
    }
}

/// A diagnostic reported by a lens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Path of the offending file; may be missing for project-level findings
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub line: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    pub severity: IssueSeverity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Severity levels for issues
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Sequence,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IssueSeverity {
    /// Errors that must be fixed
    Error,

    /// Warnings that should be fixed
    Warning,

    /// Informational messages
    Info,

    /// Hints and suggestions
    Hint,
}

impl IssueSeverity {
    /// Get the emoji representation of this severity
    pub fn emoji(&self) -> &'static str {
        match self {
            IssueSeverity::Error => "❌",
            IssueSeverity::Warning => "⚠️",
            IssueSeverity::Info => "ℹ️",
            IssueSeverity::Hint => "💡",
        }
    }

    /// Badge color
    pub fn color(&self) -> &'static str {
        match self {
            IssueSeverity::Error => "#ef4444",
            IssueSeverity::Warning => "#f59e0b",
            IssueSeverity::Info => "#3b82f6",
            IssueSeverity::Hint => "#6b7280",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetric {
    pub file: String,
    pub score: f64,
    #[serde(default)]
    pub issue_count: usize,
    #[serde(default)]
    pub error_count: usize,
    #[serde(default)]
    pub warning_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    pub line: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileCoverage>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileCoverage {
    pub file: String,
    pub lines: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branches: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functions: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statements: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedFile {
    pub path: String,
    #[serde(default)]
    pub has_issues: bool,
}
