// View service - Use case for selecting a location and deriving its view
use crate::application::metrics::available_metrics;
use crate::application::selection_store::{
    SelectionError, SelectionOutcome, SelectionStore, Snapshot,
};
use crate::application::series::build_series;
use crate::application::table::{MissingValuePolicy, build_table_rows};
use crate::domain::telemetry::{Metric, SeriesPoint};
use crate::domain::view::{ChartView, TelemetryView};
use std::sync::Arc;

#[derive(Clone)]
pub struct ViewService {
    store: Arc<SelectionStore>,
    policy: MissingValuePolicy,
}

impl ViewService {
    pub fn new(store: Arc<SelectionStore>, policy: MissingValuePolicy) -> Self {
        Self { store, policy }
    }

    /// Select a location and return the view that is current afterwards. A
    /// stale selection yields whatever newer selection superseded it.
    pub async fn select(
        &self,
        location_id: &str,
        display_name: &str,
    ) -> Result<TelemetryView, SelectionError> {
        match self.store.select(location_id, display_name).await? {
            SelectionOutcome::Applied(snapshot) => Ok(build_view(&snapshot, self.policy)),
            SelectionOutcome::Stale {
                generation,
                committed,
            } => {
                tracing::debug!(
                    location_id,
                    generation,
                    committed,
                    "selection superseded, returning newer view"
                );
                Ok(self.current_view().await)
            }
        }
    }

    pub async fn current_view(&self) -> TelemetryView {
        match self.store.current().await {
            Some(snapshot) => build_view(&snapshot, self.policy),
            None => TelemetryView::empty(),
        }
    }

    /// The chart series for one metric of the current batch; empty before the
    /// first selection.
    pub async fn current_series(&self, metric: Metric) -> Vec<SeriesPoint> {
        match self.store.current().await {
            Some(snapshot) => build_series(&snapshot.batch, metric),
            None => Vec::new(),
        }
    }
}

fn build_view(snapshot: &Snapshot, policy: MissingValuePolicy) -> TelemetryView {
    let metrics = available_metrics(&snapshot.batch);

    let charts = metrics
        .iter()
        .map(|&metric| ChartView::new(metric, build_series(&snapshot.batch, metric)))
        .collect();

    TelemetryView {
        selected: Some(snapshot.selected.clone()),
        metrics: metrics.into_iter().collect(),
        charts,
        rows: build_table_rows(&snapshot.batch, policy),
    }
}
