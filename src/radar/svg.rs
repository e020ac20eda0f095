//! SVG rendering of a [`RadarChart`]

use crate::models::{QualityMetrics, QualityTier};
use crate::scoring::ValueBand;

use super::{Point, RadarChart};

const GRID_COLOR: &str = "#d1d5db";
const AXIS_COLOR: &str = "#9ca3af";
const TEXT_COLOR: &str = "#1f2937";

/// What to draw around the hexagon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvgOptions {
    pub show_labels: bool,

    /// Show raw percentages instead of metric names (needs `show_labels`)
    pub show_values: bool,
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render the chart as a standalone SVG document
pub fn render_svg(
    chart: &RadarChart,
    metrics: &QualityMetrics,
    tier: QualityTier,
    options: SvgOptions,
) -> String {
    let g = &chart.geometry;
    let tier_color = tier.color();
    let mut out = String::new();

    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {size} {size}\" preserveAspectRatio=\"xMidYMid meet\">\n",
        size = g.view_box
    ));

    // Grid rings
    out.push_str("  <g opacity=\"0.2\">\n");
    for ring in &chart.rings {
        out.push_str(&format!(
            "    <polygon points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"0.5\" opacity=\"0.4\"/>\n",
            points_attr(ring),
            GRID_COLOR
        ));
    }
    out.push_str("  </g>\n");

    for (start, end) in &chart.axes {
        out.push_str(&format!(
            "  <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"0.5\" opacity=\"0.5\"/>\n",
            start.x, start.y, end.x, end.y, AXIS_COLOR
        ));
    }

    out.push_str(&format!(
        "  <polygon points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{:.2}\" opacity=\"0.3\"/>\n",
        points_attr(&chart.outline),
        tier_color,
        g.stroke_width
    ));

    out.push_str(&format!(
        "  <polygon points=\"{}\" fill=\"{c}\" fill-opacity=\"0.3\" stroke=\"{c}\" stroke-width=\"{:.2}\"/>\n",
        points_attr(&chart.polygon),
        g.stroke_width,
        c = tier_color
    ));

    for vertex in &chart.vertices {
        let (fill, stroke, dash, opacity) = if vertex.configured {
            ("white", tier_color, "none", "1")
        } else {
            (GRID_COLOR, GRID_COLOR, "2,2", "0.4")
        };

        out.push_str(&format!(
            "  <g data-metric=\"{}\" opacity=\"{}\">\n",
            vertex.info.key, opacity
        ));
        out.push_str(&format!(
            "    <title>{}: {}%</title>\n",
            escape(vertex.info.label),
            vertex.info.value
        ));
        out.push_str(&format!(
            "    <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.5\" stroke-dasharray=\"{}\"/>\n",
            vertex.outer.x, vertex.outer.y, g.dot_size, fill, stroke, dash
        ));
        if vertex.configured {
            out.push_str(&format!(
                "    <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{c}\" stroke=\"{c}\" stroke-width=\"1\" opacity=\"0.9\"/>\n",
                vertex.data.x,
                vertex.data.y,
                g.dot_size * 0.7,
                c = tier_color
            ));
        }
        out.push_str("  </g>\n");
    }

    out.push_str(&format!(
        "  <text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"middle\" fill=\"{}\" font-size=\"{:.2}\" font-weight=\"600\">{}</text>\n",
        g.center.x,
        g.center.y,
        TEXT_COLOR,
        g.font_size * 1.5,
        chart.score
    ));
    out.push_str(&format!(
        "  <text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"middle\" fill=\"{}\" font-size=\"{:.2}\" opacity=\"0.6\">avg</text>\n",
        g.center.x,
        g.center.y + g.font_size,
        TEXT_COLOR,
        g.font_size * 0.8
    ));

    if options.show_labels {
        for vertex in &chart.vertices {
            let key = vertex.info.key;
            let (text, fill) = if options.show_values {
                let value = metrics.get(key);
                (format!("{}%", value), ValueBand::of(value, key).color())
            } else {
                (vertex.info.label.to_string(), TEXT_COLOR)
            };
            out.push_str(&format!(
                "  <text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"middle\" fill=\"{}\" font-size=\"{:.2}\">{}</text>\n",
                vertex.label_position.x,
                vertex.label_position.y,
                fill,
                g.font_size,
                escape(&text)
            ));
        }
    }

    out.push_str("</svg>\n");
    out
}
