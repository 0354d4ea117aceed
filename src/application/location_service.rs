// Location service - Use case for listing map-placeable locations
use crate::application::telemetry_source::{SourceError, TelemetrySource};
use crate::domain::location::PlaceableLocation;
use std::sync::Arc;

#[derive(Clone)]
pub struct LocationService {
    source: Arc<dyn TelemetrySource>,
}

impl LocationService {
    pub fn new(source: Arc<dyn TelemetrySource>) -> Self {
        Self { source }
    }

    /// Locations without a `[lat, lon]` pair are skipped silently.
    pub async fn list_locations(&self) -> Result<Vec<PlaceableLocation>, SourceError> {
        let locations = self.source.list_locations().await?;
        let total = locations.len();

        let placeable: Vec<PlaceableLocation> =
            locations.iter().filter_map(|location| location.placeable()).collect();

        tracing::debug!(
            total,
            placeable = placeable.len(),
            "skipped locations without coordinates"
        );
        Ok(placeable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::telemetry_source::fake::FakeSource;
    use serde_json::json;

    #[tokio::test]
    async fn test_unplaceable_locations_are_skipped() {
        let locations = serde_json::from_value(json!([
            {"id": "Green_House_", "latestCoords": [48.1, 11.5]},
            {"id": 7, "profileName": "Shed"},
            {"id": 8, "name": "Garage", "latestCoords": [1.0]},
            {"id": 9, "name": "Cellar", "latestCoords": [47.0, 8.0]}
        ]))
        .unwrap();
        let source = FakeSource {
            locations,
            ..Default::default()
        };

        let placeable = LocationService::new(Arc::new(source))
            .list_locations()
            .await
            .unwrap();
        let names: Vec<&str> = placeable.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Green House", "Cellar"]);
    }

    #[tokio::test]
    async fn test_malformed_location_does_not_hide_the_rest() {
        let source = FakeSource::default().with_raw_locations(json!([
            {"id": "roof", "name": "Roof", "latestCoords": [1, 2]},
            {"name": "no id", "latestCoords": [3, 4]},
            null,
            {"id": "yard", "latestCoords": [5, 6]}
        ]));

        let placeable = LocationService::new(Arc::new(source))
            .list_locations()
            .await
            .unwrap();
        let ids: Vec<&str> = placeable.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["roof", "yard"]);
    }

    #[tokio::test]
    async fn test_backend_failure_is_returned() {
        let source = FakeSource {
            locations_unavailable: true,
            ..Default::default()
        };
        let result = LocationService::new(Arc::new(source)).list_locations().await;
        assert!(matches!(result, Err(SourceError::Status { status: 503, .. })));
    }
}
