use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// The six quality metrics shown on the hexagon
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Sequence,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum MetricKey {
    /// Formatting consistency
    Formatting,

    /// Linting compliance
    Linting,

    /// Type safety
    Types,

    /// Test coverage and passing rate
    Tests,

    /// Unused code detected (lower is better)
    DeadCode,

    /// Documentation coverage
    Documentation,
}

/// Chart order, clockwise from the upper-left vertex
pub const DISPLAY_ORDER: [MetricKey; 6] = [
    MetricKey::Formatting,
    MetricKey::Linting,
    MetricKey::Types,
    MetricKey::Tests,
    MetricKey::DeadCode,
    MetricKey::Documentation,
];

impl MetricKey {
    /// Short label used on the chart and in grids
    pub fn label(&self) -> &'static str {
        match self {
            MetricKey::Formatting => "Format",
            MetricKey::Linting => "Linting",
            MetricKey::Types => "Types",
            MetricKey::Tests => "Tests",
            MetricKey::DeadCode => "Dead Code",
            MetricKey::Documentation => "Docs",
        }
    }

    /// Label used in list views
    pub fn long_label(&self) -> &'static str {
        match self {
            MetricKey::Formatting => "Formatting",
            MetricKey::Documentation => "Documentation",
            other => other.label(),
        }
    }

    /// One-line description for list views
    pub fn description(&self) -> &'static str {
        match self {
            MetricKey::Types => "Type safety score",
            MetricKey::Documentation => "Documentation coverage",
            MetricKey::Tests => "Test coverage and passing rate",
            MetricKey::DeadCode => "Unused code detected",
            MetricKey::Formatting => "Code formatting consistency",
            MetricKey::Linting => "Linting compliance",
        }
    }

    /// Vertex angle in degrees (screen coordinates, y grows downwards)
    pub fn angle(&self) -> f64 {
        match self {
            MetricKey::Formatting => -120.0,
            MetricKey::Linting => -60.0,
            MetricKey::Types => 0.0,
            MetricKey::Tests => 60.0,
            MetricKey::DeadCode => 120.0,
            MetricKey::Documentation => 180.0,
        }
    }

    /// Vertex color
    pub fn color(&self) -> &'static str {
        match self {
            MetricKey::Formatting => "#8b5cf6",
            MetricKey::Linting => "#6366f1",
            MetricKey::Types => "#f59e0b",
            MetricKey::Tests => "#10b981",
            MetricKey::DeadCode => "#ef4444",
            MetricKey::Documentation => "#3b82f6",
        }
    }

    /// Whether a lower raw value is better
    pub fn is_inverted(&self) -> bool {
        matches!(self, MetricKey::DeadCode)
    }

    /// Get the emoji representation of this metric
    pub fn emoji(&self) -> &'static str {
        match self {
            MetricKey::Formatting => "💅",
            MetricKey::Linting => "🔍",
            MetricKey::Types => "🔷",
            MetricKey::Tests => "✅",
            MetricKey::DeadCode => "🗑️",
            MetricKey::Documentation => "📝",
        }
    }
}

/// Six metric percentages for one package, each nominally in `0..=100`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetrics {
    pub tests: f64,
    pub linting: f64,
    pub formatting: f64,
    pub types: f64,
    pub documentation: f64,
    pub dead_code: f64,
}

impl QualityMetrics {
    /// Raw value of a metric, without polarity normalization
    pub fn get(&self, key: MetricKey) -> f64 {
        match key {
            MetricKey::Tests => self.tests,
            MetricKey::Linting => self.linting,
            MetricKey::Formatting => self.formatting,
            MetricKey::Types => self.types,
            MetricKey::Documentation => self.documentation,
            MetricKey::DeadCode => self.dead_code,
        }
    }

    /// Copy with one metric replaced
    pub fn with(mut self, key: MetricKey, value: f64) -> Self {
        match key {
            MetricKey::Tests => self.tests = value,
            MetricKey::Linting => self.linting = value,
            MetricKey::Formatting => self.formatting = value,
            MetricKey::Types => self.types = value,
            MetricKey::Documentation => self.documentation = value,
            MetricKey::DeadCode => self.dead_code = value,
        }
        self
    }

    /// Field-wise mean of a set of snapshots, `None` when empty
    pub fn mean<'a, I>(items: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a QualityMetrics>,
    {
        let items: Vec<&QualityMetrics> = items.into_iter().collect();
        if items.is_empty() {
            return None;
        }
        let count = items.len() as f64;
        let mut mean = QualityMetrics::default();
        for key in enum_iterator::all::<MetricKey>() {
            let value = items.iter().map(|m| m.get(key) / count).sum();
            mean = mean.with(key, value);
        }
        Some(mean)
    }
}

/// Ordered quality tiers, lowest first
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Sequence,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum QualityTier {
    #[default]
    None,
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl QualityTier {
    /// Human readable tier name
    pub fn label(&self) -> &'static str {
        match self {
            QualityTier::None => "No Data",
            QualityTier::Bronze => "Bronze",
            QualityTier::Silver => "Silver",
            QualityTier::Gold => "Gold",
            QualityTier::Platinum => "Platinum",
        }
    }

    /// Fill/stroke color for the tier
    pub fn color(&self) -> &'static str {
        match self {
            QualityTier::None => "#808080",
            QualityTier::Bronze => "#CD7F32",
            QualityTier::Silver => "#C0C0C0",
            QualityTier::Gold => "#FFD700",
            QualityTier::Platinum => "#E5E4E2",
        }
    }

    /// Get the emoji representation of this tier
    pub fn emoji(&self) -> &'static str {
        match self {
            QualityTier::None => "⚪",
            QualityTier::Bronze => "🥉",
            QualityTier::Silver => "🥈",
            QualityTier::Gold => "🥇",
            QualityTier::Platinum => "💎",
        }
    }
}

/// Snapshot of one hexagon vertex for inspection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VertexInfo {
    pub key: MetricKey,
    pub label: &'static str,

    /// Raw value, not inverted
    pub value: f64,
    pub color: &'static str,
}

impl VertexInfo {
    pub fn new(metrics: &QualityMetrics, key: MetricKey) -> Self {
        Self {
            key,
            label: key.label(),
            value: metrics.get(key),
            color: key.color(),
        }
    }
}
