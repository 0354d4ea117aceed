// Selection store - Latest telemetry batch for the selected location
use crate::application::telemetry_source::{SourceError, TelemetrySource};
use crate::domain::location::SelectedLocation;
use crate::domain::telemetry::TelemetryRecord;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::RwLock;

/// An immutable view of one completed selection.
#[derive(Debug)]
pub struct Snapshot {
    pub generation: u64,
    pub selected: SelectedLocation,
    pub batch: Vec<TelemetryRecord>,
}

#[derive(Debug)]
pub enum SelectionOutcome {
    /// The fetched batch is now the current snapshot.
    Applied(Arc<Snapshot>),
    /// A newer selection was committed while this one was in flight.
    Stale { generation: u64, committed: u64 },
}

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("failed to fetch telemetry for location {location_id}")]
    Fetch {
        location_id: String,
        #[source]
        source: SourceError,
    },
}

pub struct SelectionStore {
    source: Arc<dyn TelemetrySource>,
    next_generation: AtomicU64,
    current: RwLock<Option<Arc<Snapshot>>>,
}

impl SelectionStore {
    pub fn new(source: Arc<dyn TelemetrySource>) -> Self {
        Self {
            source,
            next_generation: AtomicU64::new(0),
            current: RwLock::new(None),
        }
    }

    /// The latest committed snapshot; `None` before the first successful selection.
    pub async fn current(&self) -> Option<Arc<Snapshot>> {
        self.current.read().await.clone()
    }

    /// Fetch the batch for `location_id` and publish it, unless a selection
    /// issued later has already been committed. A failed fetch leaves the
    /// current snapshot untouched.
    pub async fn select(
        &self,
        location_id: &str,
        display_name: &str,
    ) -> Result<SelectionOutcome, SelectionError> {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(location_id, generation, "fetching telemetry for selection");

        let batch = match self.source.fetch_telemetry(location_id).await {
            Ok(batch) => batch,
            Err(source) => {
                tracing::error!(
                    location_id,
                    generation,
                    error = %source,
                    "telemetry fetch failed, keeping previous selection"
                );
                return Err(SelectionError::Fetch {
                    location_id: location_id.to_string(),
                    source,
                });
            }
        };

        let mut current = self.current.write().await;
        let committed = current.as_ref().map(|s| s.generation).unwrap_or(0);
        if committed > generation {
            tracing::info!(
                location_id,
                generation,
                committed,
                "discarding stale telemetry fetch"
            );
            return Ok(SelectionOutcome::Stale {
                generation,
                committed,
            });
        }

        tracing::info!(
            location_id,
            generation,
            records = batch.len(),
            "selection applied"
        );
        let snapshot = Arc::new(Snapshot {
            generation,
            selected: SelectedLocation::new(location_id, display_name),
            batch,
        });
        *current = Some(snapshot.clone());
        Ok(SelectionOutcome::Applied(snapshot))
    }
}
