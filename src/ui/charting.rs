use clackr::time_series::{peak_wpm, TimeSeriesPoint};

/// Compute X (seconds) and Y (WPM) bounds for the results chart
pub fn compute_chart_params(series: &[TimeSeriesPoint], elapsed_secs: f64) -> (f64, f64) {
    let overall_duration = series.last().map_or(elapsed_secs, |p| p.t).max(1.0);
    (overall_duration, peak_wpm(series).round().max(1.0))
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}
