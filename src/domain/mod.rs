// Domain layer - Telemetry records, locations and the derived view model
pub mod location;
pub mod telemetry;
pub mod timestamp;
pub mod view;
