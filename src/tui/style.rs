//! Color constants and auto-scaling helpers for the TUI.

use ratatui::style::Color;

use crate::grid::LoadPrediction;

/// Power line color.
pub const POWER_COLOR: Color = Color::Cyan;
/// Active device badge.
pub const ACTIVE: Color = Color::Green;
/// Shed device badge and high-load status.
pub const SHED: Color = Color::Red;
/// Highlighted device border.
pub const SELECTED: Color = Color::Yellow;
/// Voltage gauge color.
pub const VOLTAGE_COLOR: Color = Color::Blue;
/// Amperage gauge color.
pub const AMPERAGE_COLOR: Color = Color::Magenta;
/// Missing asset warning.
pub const WARNING: Color = Color::Yellow;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;

/// Returns the status color for a load label.
pub fn status_color(prediction: &LoadPrediction) -> Color {
    if prediction.is_high() { SHED } else { ACTIVE }
}

/// Fraction of a sensor range covered by `value`, clamped to `[0, 1]`.
pub fn gauge_ratio(value: f32, min: f32, max: f32) -> f64 {
    if max <= min {
        return 0.0;
    }
    f64::from((value - min) / (max - min)).clamp(0.0, 1.0)
}

/// Computes Y-axis bounds from chart data points with 10% padding.
pub fn auto_bounds_y(points: &[(f64, f64)]) -> [f64; 2] {
    let ys = points.iter().map(|&(_, y)| y);
    let min = ys.clone().fold(f64::INFINITY, f64::min);
    let max = ys.fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    let range = (max - min).max(1.0);
    let pad = range * 0.1;
    [(min - pad).max(0.0), max + pad]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_chart_has_unit_bounds() {
        assert_eq!(auto_bounds_y(&[]), [0.0, 1.0]);
    }

    #[test]
    fn bounds_pad_around_data() {
        let [lo, hi] = auto_bounds_y(&[(0.0, 1000.0), (1.0, 2000.0)]);
        assert!(lo < 1000.0 && lo >= 0.0);
        assert!(hi > 2000.0);
    }

    #[test]
    fn flat_series_still_has_height() {
        let [lo, hi] = auto_bounds_y(&[(0.0, 1150.0), (1.0, 1150.0)]);
        assert!(hi > lo);
    }

    #[test]
    fn gauge_ratio_clamps() {
        assert_eq!(gauge_ratio(230.0, 200.0, 260.0), 0.5);
        assert_eq!(gauge_ratio(300.0, 200.0, 260.0), 1.0);
        assert_eq!(gauge_ratio(1.0, 5.0, 5.0), 0.0);
    }

    #[test]
    fn high_status_is_red() {
        assert_eq!(status_color(&LoadPrediction::high()), SHED);
        assert_eq!(status_color(&LoadPrediction::new("Low")), ACTIVE);
    }
}
