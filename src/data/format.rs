/// Format a metric value for performance data.
///
/// Keeps up to two decimals and at least one, so `80.0` renders as `"80.0"`
/// and `45.67` as `"45.67"`.
pub fn format_value(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{}0", trimmed)
    } else {
        trimmed.to_string()
    }
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
