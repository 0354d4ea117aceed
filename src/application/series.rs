// Chart series for a single metric
use crate::domain::telemetry::{Metric, SeriesPoint, TelemetryRecord};

/// Build the chronological series for `metric`.
///
/// Records without any telemetry, or without a reading for `metric`, are left
/// out. Ties on the sort instant keep batch order. Values are passed through
/// untouched; display precision is the caller's concern.
pub fn build_series(batch: &[TelemetryRecord], metric: Metric) -> Vec<SeriesPoint> {
    let mut readings: Vec<(i64, String, f64)> = batch
        .iter()
        .filter(|record| record.has_telemetry())
        .filter_map(|record| {
            let value = metric.value(record)?;
            let time = record.chart_time();
            Some((time.instant, time.display, value))
        })
        .collect();

    readings.sort_by_key(|(instant, _, _)| *instant);

    readings
        .into_iter()
        .map(|(_, time, value)| SeriesPoint::new(time, value))
        .collect()
}
