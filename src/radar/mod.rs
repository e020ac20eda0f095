//! Hexagonal radar chart geometry
//!
//! Angles are in degrees and follow screen coordinates (y grows downwards),
//! so `-120°` is the upper-left vertex and the metrics run clockwise.

pub mod svg;

use serde::Serialize;

use crate::config::RadarConfig;
use crate::models::{MetricKey, QualityMetrics, VertexInfo, DISPLAY_ORDER};
use crate::scoring::{self, effective_value, is_metric_configured};

/// Background ring sizes as fractions of the radius
pub const RING_FRACTIONS: [f64; 5] = [0.2, 0.4, 0.6, 0.8, 1.0];

/// A point in chart coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Polar to Cartesian conversion around `center`
fn polar(center: Point, radius: f64, angle_deg: f64) -> Point {
    let radians = angle_deg.to_radians();
    Point::new(
        center.x + radius * radians.cos(),
        center.y + radius * radians.sin(),
    )
}

/// Hexagon outline at `fraction` of `radius`, one point per metric in display order
pub fn ring_points(center: Point, radius: f64, fraction: f64) -> Vec<Point> {
    let r = radius * fraction;
    DISPLAY_ORDER
        .iter()
        .map(|key| polar(center, r, key.angle()))
        .collect()
}

/// Position of a 0-100 value along the axis at `angle_deg`
pub fn metric_point(center: Point, radius: f64, angle_deg: f64, value: f64) -> Point {
    polar(center, radius * value / 100.0, angle_deg)
}

/// Data polygon; unconfigured metrics collapse to the centre
pub fn data_polygon(
    metrics: &QualityMetrics,
    center: Point,
    radius: f64,
    lenses_ran: Option<&[String]>,
) -> Vec<Point> {
    DISPLAY_ORDER
        .iter()
        .map(|key| {
            let value = plotted_value(metrics, *key, lenses_ran);
            metric_point(center, radius, key.angle(), value)
        })
        .collect()
}

/// Value drawn for a metric: effective value, or 0 when unconfigured
fn plotted_value(metrics: &QualityMetrics, key: MetricKey, lenses_ran: Option<&[String]>) -> f64 {
    if is_metric_configured(key, lenses_ran) {
        effective_value(metrics, key)
    } else {
        0.0
    }
}

/// Drawing parameters derived from a view box size
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadarGeometry {
    pub view_box: f64,
    pub center: Point,
    pub radius: f64,
    pub padding: f64,
    pub font_size: f64,
    pub stroke_width: f64,
    pub dot_size: f64,
}

impl RadarGeometry {
    pub fn new(config: &RadarConfig) -> Self {
        let size = config.view_box_size;
        Self {
            view_box: size,
            center: Point::new(size / 2.0, size / 2.0),
            radius: size * config.radius_ratio,
            padding: size * config.padding_ratio,
            font_size: size * 0.04,
            stroke_width: size * 0.008,
            dot_size: size * 0.015,
        }
    }

    /// Distance of metric labels from the centre
    pub fn label_radius(&self) -> f64 {
        self.radius + self.padding * 1.2
    }
}

impl Default for RadarGeometry {
    fn default() -> Self {
        Self::new(&RadarConfig::default())
    }
}

/// One vertex of the chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VertexMarker {
    pub info: VertexInfo,

    /// Full-scale point on the outer hexagon
    pub outer: Point,

    /// Point at the plotted value
    pub data: Point,

    pub label_position: Point,
    pub configured: bool,
}

/// Everything needed to draw one hexagon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarChart {
    pub geometry: RadarGeometry,
    pub rings: Vec<Vec<Point>>,
    pub axes: Vec<(Point, Point)>,
    pub outline: Vec<Point>,
    pub polygon: Vec<Point>,
    pub vertices: Vec<VertexMarker>,

    /// Rounded average over the configured metrics
    pub score: i64,
}

impl RadarChart {
    pub fn layout(
        metrics: &QualityMetrics,
        lenses_ran: Option<&[String]>,
        geometry: RadarGeometry,
    ) -> Self {
        let RadarGeometry { center, radius, .. } = geometry;

        let rings = RING_FRACTIONS
            .iter()
            .map(|fraction| ring_points(center, radius, *fraction))
            .collect();

        let axes = DISPLAY_ORDER
            .iter()
            .map(|key| (center, metric_point(center, radius, key.angle(), 100.0)))
            .collect();

        let vertices = DISPLAY_ORDER
            .iter()
            .map(|key| VertexMarker {
                info: VertexInfo::new(metrics, *key),
                outer: metric_point(center, radius, key.angle(), 100.0),
                data: metric_point(
                    center,
                    radius,
                    key.angle(),
                    plotted_value(metrics, *key, lenses_ran),
                ),
                label_position: metric_point(center, geometry.label_radius(), key.angle(), 100.0),
                configured: is_metric_configured(*key, lenses_ran),
            })
            .collect();

        let configured = scoring::configured_metrics(lenses_ran);

        Self {
            geometry,
            rings,
            axes,
            outline: ring_points(center, radius, 1.0),
            polygon: data_polygon(metrics, center, radius, lenses_ran),
            vertices,
            score: scoring::display_score(metrics, Some(&configured)),
        }
    }
}
