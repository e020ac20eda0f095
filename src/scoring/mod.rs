//! Metric aggregation and quality tier classification
//!
//! Every function here is pure and total. Values outside `0..=100` are not
//! clamped; they flow through the arithmetic unchanged. Range checks belong
//! to the input layer (see [`crate::input::validate_metrics`]).

pub mod lenses;

use enum_iterator::all;
use serde::Serialize;

use crate::models::{MetricKey, QualityMetrics, QualityTier};

pub use lenses::{configured_metrics, is_metric_configured, metric_for_lens};

/// Lower bounds (inclusive) for each tier, highest first
const TIER_THRESHOLDS: [(f64, QualityTier); 4] = [
    (90.0, QualityTier::Platinum),
    (75.0, QualityTier::Gold),
    (60.0, QualityTier::Silver),
    (40.0, QualityTier::Bronze),
];

/// Value with polarity normalized so that higher is always better
pub fn effective_value(metrics: &QualityMetrics, key: MetricKey) -> f64 {
    let value = metrics.get(key);
    if key.is_inverted() {
        100.0 - value
    } else {
        value
    }
}

/// Unrounded mean of the effective values of `configured` (all six when `None`).
///
/// An empty key set averages to 0.
pub fn average_score(metrics: &QualityMetrics, configured: Option<&[MetricKey]>) -> f64 {
    let keys: Vec<MetricKey> = match configured {
        Some(keys) => keys.to_vec(),
        None => all::<MetricKey>().collect(),
    };

    if keys.is_empty() {
        return 0.0;
    }

    let total: f64 = keys.iter().map(|key| effective_value(metrics, *key)).sum();
    total / keys.len() as f64
}

/// Average rounded for the centre label, halves rounding up
pub fn display_score(metrics: &QualityMetrics, configured: Option<&[MetricKey]>) -> i64 {
    (average_score(metrics, configured) + 0.5).floor() as i64
}

/// Tier for an already computed average
pub fn tier_for_average(average: f64) -> QualityTier {
    TIER_THRESHOLDS
        .iter()
        .find(|(threshold, _)| average >= *threshold)
        .map(|(_, tier)| *tier)
        .unwrap_or(QualityTier::None)
}

/// Classify a snapshot, averaging only over `configured` (all six when `None`)
pub fn calculate_quality_tier(
    metrics: &QualityMetrics,
    configured: Option<&[MetricKey]>,
) -> QualityTier {
    if matches!(configured, Some([])) {
        return QualityTier::None;
    }
    tier_for_average(average_score(metrics, configured))
}

/// Classify a snapshot using the lenses that ran to pick the configured metrics
pub fn tier_for_lenses(metrics: &QualityMetrics, lenses_ran: Option<&[String]>) -> QualityTier {
    let configured = configured_metrics(lenses_ran);
    calculate_quality_tier(metrics, Some(&configured))
}

/// Tier of the field-wise mean of several snapshots
pub fn calculate_overall_tier<'a, I>(metrics: I, lenses_ran: Option<&[String]>) -> QualityTier
where
    I: IntoIterator<Item = &'a QualityMetrics>,
{
    match QualityMetrics::mean(metrics) {
        Some(mean) => tier_for_lenses(&mean, lenses_ran),
        None => QualityTier::None,
    }
}

/// Good/medium/poor banding of a single metric value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueBand {
    Good,
    Medium,
    Poor,
}

impl ValueBand {
    /// Band of a raw value for `key`, inverting dead code
    pub fn of(value: f64, key: MetricKey) -> Self {
        let effective = if key.is_inverted() {
            100.0 - value
        } else {
            value
        };

        if effective >= 80.0 {
            ValueBand::Good
        } else if effective >= 60.0 {
            ValueBand::Medium
        } else {
            ValueBand::Poor
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ValueBand::Good => "#2E7D32",
            ValueBand::Medium => "#E6A700",
            ValueBand::Poor => "#C62828",
        }
    }

    /// Translucent background behind a value badge
    pub fn background(&self) -> &'static str {
        match self {
            ValueBand::Good => "rgba(46, 125, 50, 0.1)",
            ValueBand::Medium => "rgba(230, 167, 0, 0.1)",
            ValueBand::Poor => "rgba(198, 40, 40, 0.1)",
        }
    }
}
