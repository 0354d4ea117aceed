// Application layer - Use cases and the derivations behind the telemetry view
pub mod location_service;
pub mod metrics;
pub mod selection_store;
pub mod series;
pub mod table;
pub mod telemetry_source;
pub mod view_service;
