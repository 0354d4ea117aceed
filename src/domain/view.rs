// View model handed to the presentation layer
use super::location::SelectedLocation;
use super::telemetry::{Metric, SeriesPoint, TableRow};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub metric: Metric,
    pub title: String,
    pub unit: String,
    pub points: Vec<SeriesPoint>,
}

impl ChartView {
    pub fn new(metric: Metric, points: Vec<SeriesPoint>) -> Self {
        Self {
            metric,
            title: metric.title().to_string(),
            unit: metric.unit().to_string(),
            points,
        }
    }
}

/// Everything needed to draw charts and the table for the current selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TelemetryView {
    pub selected: Option<SelectedLocation>,
    pub metrics: Vec<Metric>,
    pub charts: Vec<ChartView>,
    pub rows: Vec<TableRow>,
}

impl TelemetryView {
    pub fn empty() -> Self {
        Self::default()
    }
}
