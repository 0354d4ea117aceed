// Metric availability for a telemetry batch
use crate::domain::telemetry::{Metric, TelemetryRecord};
use std::collections::BTreeSet;

/// Fixed metrics are always present; an optional metric joins the set once any
/// record in the batch carries a value for it.
pub fn available_metrics(batch: &[TelemetryRecord]) -> BTreeSet<Metric> {
    let mut metrics: BTreeSet<Metric> = Metric::FIXED.into_iter().collect();
    for metric in Metric::OPTIONAL {
        if batch.iter().any(|record| metric.value(record).is_some()) {
            metrics.insert(metric);
        }
    }
    metrics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_batch_has_fixed_metrics() {
        let metrics = available_metrics(&[]);
        assert_eq!(
            metrics.into_iter().collect::<Vec<_>>(),
            vec![Metric::Temperature, Metric::Humidity, Metric::Pressure]
        );
    }

    #[test]
    fn test_light_intensity_needs_one_reading() {
        let mut batch = vec![
            TelemetryRecord {
                temperature: Some(20.0),
                ..Default::default()
            };
            3
        ];
        assert!(!available_metrics(&batch).contains(&Metric::LightIntensity));

        batch[1].percentage_light_intensity = Some(0.0);
        let metrics = available_metrics(&batch);
        assert!(metrics.contains(&Metric::LightIntensity));
        assert_eq!(metrics.len(), 4);
    }

    #[test]
    fn test_non_finite_light_reading_does_not_count() {
        let batch: Vec<TelemetryRecord> = serde_json::from_value(serde_json::json!([
            {"timestamp": "2024-01-01T00:00:00Z", "temperature": "NaN",
             "percentage_light_intensity": "inf"}
        ]))
        .unwrap();

        assert!(!available_metrics(&batch).contains(&Metric::LightIntensity));
        assert!(crate::application::series::build_series(&batch, Metric::Temperature).is_empty());
    }
}
