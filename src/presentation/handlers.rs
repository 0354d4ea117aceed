// HTTP request handlers
use crate::domain::telemetry::Metric;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct SelectQuery {
    pub name: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List locations that can be placed on the map
pub async fn list_locations(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let compress = accepts_brotli(&headers);

    let locations = match state.location_service.list_locations().await {
        Ok(locations) => locations,
        Err(e) => {
            // Return empty list on error
            tracing::error!("Error fetching locations: {}", describe(&e));
            Vec::new()
        }
    };

    respond(&locations, StatusCode::OK, compress).await
}

/// Select a location and return its telemetry view
pub async fn select_location(
    Path(id): Path<String>,
    Query(query): Query<SelectQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let compress = accepts_brotli(&headers);
    let display_name = query
        .name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| id.clone());

    match state.view_service.select(&id, &display_name).await {
        Ok(view) => respond(&view, StatusCode::OK, compress).await,
        Err(e) => {
            let body = ErrorBody { error: describe(&e) };
            respond(&body, StatusCode::BAD_GATEWAY, compress).await
        }
    }
}

/// Current telemetry view; empty before the first selection
pub async fn current_view(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let compress = accepts_brotli(&headers);
    let view = state.view_service.current_view().await;
    respond(&view, StatusCode::OK, compress).await
}

/// Chart series for one metric of the current selection
pub async fn metric_series(
    Path(metric): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let compress = accepts_brotli(&headers);

    let metric: Metric = match metric.parse() {
        Ok(metric) => metric,
        Err(e) => {
            let body = ErrorBody { error: e.to_string() };
            return respond(&body, StatusCode::NOT_FOUND, compress).await;
        }
    };

    let points = state.view_service.current_series(metric).await;
    respond(&points, StatusCode::OK, compress).await
}

async fn respond<T: Serialize>(data: &T, status: StatusCode, compress: bool) -> Response {
    match json_response(data, status, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Render an error with its source chain, outermost first
fn describe(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
