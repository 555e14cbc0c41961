use std::time::Duration;

use crate::time_series::TimeSeriesPoint;

pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

pub fn std_dev(data: &[f64]) -> Option<f64> {
    let avg = mean(data)?;
    let variance = data.iter().map(|v| (avg - v).powi(2)).sum::<f64>() / data.len() as f64;
    Some(variance.sqrt())
}

/// Spread of the per-second speed samples; lower is steadier typing.
pub fn consistency(series: &[TimeSeriesPoint]) -> f64 {
    let samples: Vec<f64> = series.iter().map(|p| p.wpm).collect();
    std_dev(&samples).unwrap_or(0.0)
}

/// Stopwatch rendering, `mm:ss.t`.
pub fn format_clock(elapsed: Duration) -> String {
    let tenths = elapsed.as_millis() / 100;
    let minutes = tenths / 600;
    let seconds = (tenths / 10) % 60;
    format!("{:02}:{:02}.{}", minutes, seconds, tenths % 10)
}
