//! Hour values as shown in the export: one decimal place.

/// Round to one decimal place.
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Convert a duration in seconds to hours; `None` for missing or non-positive values.
pub fn hours_from_seconds(seconds: f64) -> Option<f64> {
    if seconds.is_finite() && seconds > 0.0 {
        Some(round_tenth(seconds / 3600.0))
    } else {
        None
    }
}

/// `12.5h`, or `-` when missing.
pub fn format_hours(hours: Option<f64>) -> String {
    match hours {
        Some(h) => format!("{h:.1}h"),
        None => "-".to_string(),
    }
}
