// Table projection of a telemetry batch
use crate::application::metrics::available_metrics;
use crate::domain::telemetry::{Metric, TableRow, TelemetryRecord};
use crate::domain::timestamp::ResolvedTime;
use serde::Deserialize;
use std::cmp::Reverse;

/// Cell text for a reading that is not shown.
pub const MISSING_VALUE: &str = "N/A";

/// Which readings render as [`MISSING_VALUE`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingValuePolicy {
    /// Absent, zero and NaN readings all render as missing.
    #[default]
    Falsy,
    /// Only absent readings render as missing; zero is shown.
    NullOnly,
}

impl MissingValuePolicy {
    pub fn format(self, value: Option<f64>) -> String {
        match value {
            Some(v) if self == MissingValuePolicy::Falsy && (v == 0.0 || v.is_nan()) => {
                MISSING_VALUE.to_string()
            }
            Some(v) => v.to_string(),
            None => MISSING_VALUE.to_string(),
        }
    }
}

/// One row per record, newest first. The light intensity column is present on
/// every row when any record in the batch has a reading, and on none otherwise.
pub fn build_table_rows(batch: &[TelemetryRecord], policy: MissingValuePolicy) -> Vec<TableRow> {
    let light_active = available_metrics(batch).contains(&Metric::LightIntensity);

    // Resolve each timestamp once; the instant doubles as the sort key
    let mut records: Vec<(ResolvedTime, &TelemetryRecord)> = batch
        .iter()
        .map(|record| (record.table_time(), record))
        .collect();
    records.sort_by_key(|(time, _)| Reverse(time.instant));

    records
        .into_iter()
        .map(|(time, record)| TableRow {
            display_time: time.display,
            temperature: policy.format(record.temperature),
            humidity: policy.format(record.humidity),
            pressure: policy.format(record.pressure),
            light_intensity: light_active.then(|| policy.format(record.percentage_light_intensity)),
        })
        .collect()
}
