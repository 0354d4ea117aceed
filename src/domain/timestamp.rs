// Timestamp representations and their resolution to a sortable instant
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Display marker for an unresolvable timestamp on charts.
pub const CHART_SENTINEL: &str = "Invalid";

/// Display marker for an unresolvable timestamp in table rows.
pub const TABLE_SENTINEL: &str = "Invalid or Missing Date";

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Keys under which a wrapper object carries its date.
const WRAPPER_KEYS: &[&str] = &["$date", "date"];

/// Layouts with an explicit offset that are not strict RFC 3339.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Zone-less layouts, read as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// The date carried inside a wrapper object such as `{"$date": ...}`.
#[derive(Debug, Clone, PartialEq)]
pub enum DateField {
    Text(String),
    Epoch(f64),
}

/// A record's timestamp, classified once when the record is decoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Timestamp {
    Wrapped(DateField),
    Text(String),
    Epoch(f64),
    #[default]
    Missing,
}

/// A timestamp reduced to a sort key (epoch milliseconds) and a display string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTime {
    pub instant: i64,
    pub display: String,
}

impl DateField {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(DateField::Text(text.clone())),
            Value::Number(number) => number.as_f64().map(DateField::Epoch),
            // Extended JSON: {"$numberLong": "1704067200000"}
            Value::Object(map) => map
                .get("$numberLong")
                .and_then(Value::as_str)
                .and_then(|digits| digits.trim().parse::<i64>().ok())
                .map(|millis| DateField::Epoch(millis as f64)),
            _ => None,
        }
    }
}

impl Timestamp {
    /// Classify a raw JSON timestamp. Shapes that carry no usable date become `Missing`.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(map) => WRAPPER_KEYS
                .iter()
                .find_map(|key| map.get(*key))
                .and_then(DateField::from_json)
                .map(Timestamp::Wrapped)
                .unwrap_or(Timestamp::Missing),
            Value::String(text) => Timestamp::Text(text.clone()),
            Value::Number(number) => number
                .as_f64()
                .map(Timestamp::Epoch)
                .unwrap_or(Timestamp::Missing),
            _ => Timestamp::Missing,
        }
    }

    /// The instant this timestamp denotes, if it can be read at all.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::Wrapped(DateField::Text(text)) | Timestamp::Text(text) => {
                parse_date_text(text)
            }
            Timestamp::Wrapped(DateField::Epoch(millis)) | Timestamp::Epoch(millis) => {
                from_epoch_millis(*millis)
            }
            Timestamp::Missing => None,
        }
    }

    pub fn resolve_for_chart(&self) -> ResolvedTime {
        self.resolve_with(CHART_SENTINEL)
    }

    pub fn resolve_for_table(&self) -> ResolvedTime {
        self.resolve_with(TABLE_SENTINEL)
    }

    fn resolve_with(&self, sentinel: &str) -> ResolvedTime {
        match self.to_datetime() {
            Some(datetime) => ResolvedTime {
                instant: datetime.timestamp_millis(),
                display: datetime.format(DISPLAY_FORMAT).to_string(),
            },
            None => ResolvedTime {
                instant: 0,
                display: sentinel.to_string(),
            },
        }
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Timestamp::from_json(&value))
    }
}

fn from_epoch_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(millis.trunc() as i64)
}

fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.with_timezone(&Utc));
    }
    if let Ok(datetime) = DateTime::parse_from_rfc2822(text) {
        return Some(datetime.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(datetime) = DateTime::parse_from_str(text, format) {
            return Some(datetime.with_timezone(&Utc));
        }
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Some(datetime.and_utc());
        }
    }
    DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(text, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|datetime| datetime.and_utc())
    })
}
