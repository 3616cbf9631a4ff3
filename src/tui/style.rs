//! Color constants and auto-scaling helpers for the TUI.

use ratatui::style::Color;

/// Optimized load line color.
pub const OPTIMIZED_COLOR: Color = Color::Green;
/// Baseline load line color.
pub const BASELINE_COLOR: Color = Color::DarkGray;
/// Price gauge color when near the peak (>= 75%).
pub const PRICE_HIGH: Color = Color::Red;
/// Price gauge color in the mid band (>= 40%).
pub const PRICE_MID: Color = Color::Yellow;
/// Price gauge color when cheap (< 40%).
pub const PRICE_LOW: Color = Color::Green;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Active response (shed/defer) indicator color.
pub const RESPONSE_ACTIVE: Color = Color::Magenta;

/// Returns a color based on how close the price is to the horizon peak.
pub fn price_color(price: f64, peak: f64) -> Color {
    if peak <= 0.0 {
        return PRICE_LOW;
    }
    let ratio = price / peak;
    if ratio >= 0.75 {
        PRICE_HIGH
    } else if ratio >= 0.4 {
        PRICE_MID
    } else {
        PRICE_LOW
    }
}

/// Computes Y-axis bounds from chart data points with 10% padding.
pub fn auto_bounds_y(optimized: &[(f64, f64)], baseline: &[(f64, f64)]) -> [f64; 2] {
    let all = optimized.iter().chain(baseline.iter()).map(|&(_, y)| y);
    let min = all.clone().fold(f64::INFINITY, f64::min);
    let max = all.fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return [-1.0, 1.0];
    }
    let range = (max - min).max(0.1);
    let pad = range * 0.1;
    [min - pad, max + pad]
}
