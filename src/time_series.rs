/// One sample of live speed, taken on each whole second of running time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSeriesPoint {
    pub t: f64,
    pub wpm: f64,
}

impl TimeSeriesPoint {
    pub fn new(t: f64, wpm: f64) -> Self {
        Self { t, wpm }
    }
}

impl From<TimeSeriesPoint> for (f64, f64) {
    fn from(p: TimeSeriesPoint) -> Self {
        (p.t, p.wpm)
    }
}

/// Highest sampled speed, 0 for an empty series.
pub fn peak_wpm(series: &[TimeSeriesPoint]) -> f64 {
    series.iter().map(|p| p.wpm).fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_of_empty_series_is_zero() {
        assert_eq!(peak_wpm(&[]), 0.0);
    }

    #[test]
    fn peak_picks_highest_sample() {
        let series = [
            TimeSeriesPoint::new(1.0, 30.0),
            TimeSeriesPoint::new(2.0, 48.0),
            TimeSeriesPoint::new(3.0, 41.0),
        ];
        assert_eq!(peak_wpm(&series), 48.0);
        let tuple: (f64, f64) = series[1].into();
        assert_eq!(tuple, (2.0, 48.0));
    }
}
