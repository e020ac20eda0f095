use colored::{ColoredString, Colorize};
use console::Style;

use crate::models::{IssueSeverity, MetricKey, QualityTier};
use crate::scoring::ValueBand;

/// Terminal styles for Hexlens
pub struct LensColors;

impl LensColors {
    pub fn primary() -> Style {
        Style::new().cyan().bold()
    }

    pub fn subtle() -> Style {
        Style::new().dim()
    }
}

/// Styled section header
pub fn section_header(title: &str) -> String {
    format!(
        "\n{}\n",
        LensColors::primary().apply_to(format!("╸⟪ {} ⟫╺", title))
    )
}

/// Styled divider line
pub fn divider(width: usize) -> String {
    LensColors::subtle().apply_to("━".repeat(width)).to_string()
}

/// Colorize text with the color of a value band
pub fn band_colored(text: &str, band: ValueBand) -> ColoredString {
    match band {
        ValueBand::Good => text.green(),
        ValueBand::Medium => text.yellow(),
        ValueBand::Poor => text.red(),
    }
}

/// Value text on its band's translucent background
pub fn band_badge(text: &str, band: ValueBand) -> ColoredString {
    let badge = band_colored(text, band);
    match rgba_over_dark(band.background()) {
        Some((r, g, b)) => badge.on_truecolor(r, g, b),
        None => badge,
    }
}

/// Flatten an `rgba(r, g, b, a)` color over a black terminal background
pub fn rgba_over_dark(rgba: &str) -> Option<(u8, u8, u8)> {
    let inner = rgba.trim().strip_prefix("rgba(")?.strip_suffix(')')?;
    let parts: Vec<f64> = inner
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .ok()?;
    let [r, g, b, alpha] = parts[..] else {
        return None;
    };
    let alpha = alpha.clamp(0.0, 1.0);
    let blend = |channel: f64| (channel.clamp(0.0, 255.0) * alpha).round() as u8;
    Some((blend(r), blend(g), blend(b)))
}

/// Parse a `#rrggbb` color
pub fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    Some(((value >> 16) as u8, (value >> 8) as u8, value as u8))
}

fn hex_colored(text: &str, hex: &str) -> ColoredString {
    match hex_rgb(hex) {
        Some((r, g, b)) => text.truecolor(r, g, b),
        None => text.normal(),
    }
}

/// Colorize a tier label
pub fn tier_colored(tier: QualityTier) -> ColoredString {
    match tier {
        QualityTier::None => tier.label().dimmed(),
        _ => hex_colored(tier.label(), tier.color()).bold(),
    }
}

/// Colorize text with the badge color of a severity
pub fn severity_colored(text: &str, severity: IssueSeverity) -> ColoredString {
    hex_colored(text, severity.color())
}

/// Horizontal bar for a 0-100 value
pub fn value_bar(value: f64, width: usize) -> String {
    let filled = ((value.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Label for a metric row, with an arrow on inverted metrics
pub fn metric_label(key: MetricKey, use_emoji: bool) -> String {
    let arrow = if key.is_inverted() { " ↓" } else { "" };
    if use_emoji {
        format!("{} {}{}", key.emoji(), key.long_label(), arrow)
    } else {
        format!("{}{}", key.long_label(), arrow)
    }
}

/// Format a percentage without trailing zeros
pub fn percent(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}%", value)
    } else {
        format!("{:.1}%", value)
    }
}
