//! Mapping from lens (tool) ids to the metric they feed

use once_cell::sync::Lazy;
use std::collections::{BTreeSet, HashMap};

use crate::models::{MetricKey, DISPLAY_ORDER};

/// Known lens ids and the hexagon metric each one measures
pub const LENS_METRICS: &[(&str, MetricKey)] = &[
    // Linting
    ("eslint", MetricKey::Linting),
    ("biome", MetricKey::Linting),
    ("biome-lint", MetricKey::Linting),
    ("oxlint", MetricKey::Linting),
    // Type checking
    ("typescript", MetricKey::Types),
    ("flow", MetricKey::Types),
    // Testing
    ("test", MetricKey::Tests),
    ("jest", MetricKey::Tests),
    ("vitest", MetricKey::Tests),
    ("bun-test", MetricKey::Tests),
    ("mocha", MetricKey::Tests),
    ("playwright", MetricKey::Tests),
    ("cypress", MetricKey::Tests),
    // Formatting
    ("prettier", MetricKey::Formatting),
    ("biome-format", MetricKey::Formatting),
    // Dead code
    ("knip", MetricKey::DeadCode),
    ("depcheck", MetricKey::DeadCode),
    // Documentation
    ("typedoc", MetricKey::Documentation),
    ("jsdoc", MetricKey::Documentation),
    ("alexandria", MetricKey::Documentation),
];

static LENS_INDEX: Lazy<HashMap<&'static str, MetricKey>> =
    Lazy::new(|| LENS_METRICS.iter().copied().collect());

/// Metric measured by a lens, `None` for unknown lens ids
pub fn metric_for_lens(lens_id: &str) -> Option<MetricKey> {
    LENS_INDEX.get(lens_id).copied()
}

/// Whether some lens that ran measures `key`.
///
/// Without lens information (`None` or an empty list) every metric counts as
/// configured, so older result files keep rendering a full hexagon.
pub fn is_metric_configured(key: MetricKey, lenses_ran: Option<&[String]>) -> bool {
    match lenses_ran {
        None => true,
        Some([]) => true,
        Some(lenses) => lenses
            .iter()
            .any(|lens| metric_for_lens(lens) == Some(key)),
    }
}

/// Configured metrics in chart display order
pub fn configured_metrics(lenses_ran: Option<&[String]>) -> Vec<MetricKey> {
    DISPLAY_ORDER
        .iter()
        .copied()
        .filter(|key| is_metric_configured(*key, lenses_ran))
        .collect()
}

/// Lens ids from the list that map to no metric
pub fn unmapped_lenses(lenses_ran: &[String]) -> Vec<&str> {
    lenses_ran
        .iter()
        .map(String::as_str)
        .filter(|lens| metric_for_lens(lens).is_none())
        .collect()
}

/// Union of several lens lists, sorted; `None` when no list contributed any id
pub fn merge_lenses<'a, I>(lists: I) -> Option<Vec<String>>
where
    I: IntoIterator<Item = Option<&'a [String]>>,
{
    let merged: BTreeSet<&str> = lists
        .into_iter()
        .flatten()
        .flat_map(|list| list.iter().map(String::as_str))
        .collect();

    if merged.is_empty() {
        None
    } else {
        Some(merged.into_iter().map(str::to_string).collect())
    }
}
