// Telemetry data domain models
use super::timestamp::{ResolvedTime, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One reading as delivered by the backend. Metric fields tolerate numbers,
/// numeric strings and nulls; anything else, including "NaN" and "inf", reads
/// as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TelemetryRecord {
    #[serde(default)]
    pub timestamp: Timestamp,
    #[serde(default, deserialize_with = "metric_value")]
    pub temperature: Option<f64>,
    #[serde(default, deserialize_with = "metric_value")]
    pub humidity: Option<f64>,
    #[serde(default, deserialize_with = "metric_value")]
    pub pressure: Option<f64>,
    #[serde(default, deserialize_with = "metric_value")]
    pub percentage_light_intensity: Option<f64>,
}

impl TelemetryRecord {
    /// True when at least one metric carries a value.
    pub fn has_telemetry(&self) -> bool {
        Metric::ALL.iter().any(|metric| metric.value(self).is_some())
    }

    pub fn chart_time(&self) -> ResolvedTime {
        self.timestamp.resolve_for_chart()
    }

    pub fn table_time(&self) -> ResolvedTime {
        self.timestamp.resolve_for_table()
    }
}

fn metric_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let reading = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(reading.filter(|v| v.is_finite()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Temperature,
    Humidity,
    Pressure,
    #[serde(rename = "percentage_light_intensity")]
    LightIntensity,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Temperature,
        Metric::Humidity,
        Metric::Pressure,
        Metric::LightIntensity,
    ];

    /// Charted for every batch, with or without readings.
    pub const FIXED: [Metric; 3] = [Metric::Temperature, Metric::Humidity, Metric::Pressure];

    /// Charted only when some record in the batch carries a reading.
    pub const OPTIONAL: [Metric; 1] = [Metric::LightIntensity];

    pub fn key(self) -> &'static str {
        match self {
            Metric::Temperature => "temperature",
            Metric::Humidity => "humidity",
            Metric::Pressure => "pressure",
            Metric::LightIntensity => "percentage_light_intensity",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Metric::Temperature => "Temperature",
            Metric::Humidity => "Humidity",
            Metric::Pressure => "Pressure",
            Metric::LightIntensity => "Light Intensity",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Metric::Temperature => "°C",
            Metric::Humidity => "%",
            Metric::Pressure => "hPa",
            Metric::LightIntensity => "%",
        }
    }

    pub fn value(self, record: &TelemetryRecord) -> Option<f64> {
        match self {
            Metric::Temperature => record.temperature,
            Metric::Humidity => record.humidity,
            Metric::Pressure => record.pressure,
            Metric::LightIntensity => record.percentage_light_intensity,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown metric key: {0}")]
pub struct UnknownMetric(pub String);

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|metric| metric.key() == key)
            .ok_or_else(|| UnknownMetric(key.to_string()))
    }
}

/// A single chart sample: display time and the raw reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub time: String,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(time: String, value: f64) -> Self {
        Self { time, value }
    }
}

/// A table line with every cell already rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub display_time: String,
    pub temperature: String,
    pub humidity: String,
    pub pressure: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light_intensity: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::timestamp::DateField;
    use serde_json::json;

    #[test]
    fn test_decode_heterogeneous_record() {
        let record: TelemetryRecord = serde_json::from_value(json!({
            "timestamp": {"$date": "2024-01-02T00:00:00Z"},
            "temperature": "21.5",
            "humidity": null,
            "pressure": "",
            "percentage_light_intensity": 40,
            "deviceId": "abc"
        }))
        .unwrap();

        assert_eq!(
            record.timestamp,
            Timestamp::Wrapped(DateField::Text("2024-01-02T00:00:00Z".to_string()))
        );
        assert_eq!(record.temperature, Some(21.5));
        assert_eq!(record.humidity, None);
        assert_eq!(record.pressure, None);
        assert_eq!(record.percentage_light_intensity, Some(40.0));
    }

    #[test]
    fn test_non_finite_strings_are_absent() {
        let record: TelemetryRecord = serde_json::from_value(json!({
            "timestamp": "2024-01-01T00:00:00Z",
            "temperature": "NaN",
            "humidity": "inf",
            "pressure": "-infinity",
            "percentage_light_intensity": "inf"
        }))
        .unwrap();

        assert_eq!(record.temperature, None);
        assert_eq!(record.humidity, None);
        assert_eq!(record.pressure, None);
        assert_eq!(record.percentage_light_intensity, None);
        assert!(!record.has_telemetry());
    }

    #[test]
    fn test_decode_sparse_record() {
        let record: TelemetryRecord = serde_json::from_value(json!({})).unwrap();
        assert_eq!(record, TelemetryRecord::default());
        assert!(!record.has_telemetry());
    }

    #[test]
    fn test_has_telemetry_counts_light_intensity() {
        let record = TelemetryRecord {
            percentage_light_intensity: Some(0.0),
            ..Default::default()
        };
        assert!(record.has_telemetry());
    }

    #[test]
    fn test_metric_keys() {
        for metric in Metric::ALL {
            assert_eq!(metric.key().parse::<Metric>(), Ok(metric));
            assert_eq!(
                serde_json::to_value(metric).unwrap(),
                json!(metric.key())
            );
        }
        assert!("light".parse::<Metric>().is_err());
    }

    #[test]
    fn test_table_row_omits_inactive_light_column() {
        let row = TableRow {
            display_time: "2024-01-01 00:00:00".to_string(),
            temperature: "20".to_string(),
            humidity: "N/A".to_string(),
            pressure: "N/A".to_string(),
            light_intensity: None,
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["displayTime"], "2024-01-01 00:00:00");
        assert!(value.get("lightIntensity").is_none());
    }
}
