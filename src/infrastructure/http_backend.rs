// HTTP telemetry backend implementation
use crate::application::telemetry_source::{SourceError, TelemetrySource, decode_each};
use crate::domain::location::Location;
use crate::domain::telemetry::TelemetryRecord;
use crate::infrastructure::config::{BackendSettings, prepare_path};
use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpTelemetrySource {
    client: reqwest::Client,
    base_url: String,
    locations_path: String,
    telemetry_path: String,
}

impl HttpTelemetrySource {
    pub fn new(settings: &BackendSettings) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build HTTP client for telemetry backend")?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            locations_path: settings.locations_path.clone(),
            telemetry_path: settings.telemetry_path.clone(),
        })
    }

    fn locations_url(&self) -> String {
        format!("{}{}", self.base_url, self.locations_path)
    }

    fn telemetry_url(&self, location_id: &str) -> String {
        let mut vars = HashMap::new();
        vars.insert("id".to_string(), location_id.to_string());
        format!("{}{}", self.base_url, prepare_path(&self.telemetry_path, &vars))
    }

    /// GET a JSON array. Elements that do not decode as `T` are skipped; only a
    /// body that is not an array at all fails the request.
    async fn get_list<T: DeserializeOwned>(
        &self,
        url: &str,
        kind: &str,
    ) -> Result<Vec<T>, SourceError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| SourceError::Transport(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Transport(Box::new(e)))?;
        let values: Vec<Value> = serde_json::from_str(&body)?;
        Ok(decode_each(values, kind))
    }
}

#[async_trait]
impl TelemetrySource for HttpTelemetrySource {
    async fn list_locations(&self) -> Result<Vec<Location>, SourceError> {
        let locations: Vec<Location> = self.get_list(&self.locations_url(), "location").await?;
        tracing::debug!("Backend listed {} locations", locations.len());
        Ok(locations)
    }

    async fn fetch_telemetry(
        &self,
        location_id: &str,
    ) -> Result<Vec<TelemetryRecord>, SourceError> {
        let url = self.telemetry_url(location_id);
        let records: Vec<TelemetryRecord> = self.get_list(&url, "telemetry record").await?;
        tracing::debug!(
            "Fetched {} telemetry records for location {}",
            records.len(),
            location_id
        );
        Ok(records)
    }
}
