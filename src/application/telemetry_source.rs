// Source trait for the telemetry backend
use crate::domain::location::Location;
use crate::domain::telemetry::TelemetryRecord;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to telemetry backend failed")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("telemetry backend responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode telemetry backend response")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// List every location the backend knows about, placeable or not
    async fn list_locations(&self) -> Result<Vec<Location>, SourceError>;

    /// Fetch the full telemetry batch for one location, in backend order
    async fn fetch_telemetry(
        &self,
        location_id: &str,
    ) -> Result<Vec<TelemetryRecord>, SourceError>;
}

/// Decode each element of a backend list on its own, dropping the ones that
/// do not fit `T`.
pub fn decode_each<T: DeserializeOwned>(values: Vec<Value>, kind: &str) -> Vec<T> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::debug!("Skipping malformed {} at index {}: {}", kind, index, e);
                None
            }
        })
        .collect()
}
