//! Format - Display Formatting Utilities

/// Whole-percent fuel level, e.g. `"50%"`
pub fn format_percent(level: f64) -> String {
    format!("{}%", level.round() as i64)
}

/// Remaining over capacity, e.g. `"150.0 / 300 gal"`
pub fn format_gallons(remaining: f64, capacity: f64) -> String {
    format!("{remaining:.1} / {capacity} gal")
}

/// Efficiency with one decimal, e.g. `"7.3 mpg"`
pub fn format_mpg(mpg: f64) -> String {
    format!("{mpg:.1} mpg")
}

/// Signed difference with one decimal, e.g. `"+0.4"`, `"-1.1"`
pub fn format_signed(delta: f64) -> String {
    let delta = if delta.abs() < 0.05 { 0.0 } else { delta };
    format!("{delta:+.1}")
}

pub fn format_range(miles: i64) -> String {
    format!("{miles} mi")
}

/// Text bar for a 0-100 level, `width` cells wide
pub fn level_bar(level: f64, width: usize) -> String {
    let filled = ((level.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(width - filled))
}

/// Truncate a string to max chars with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    }
}
