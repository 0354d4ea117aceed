// Application state for HTTP handlers
use crate::application::location_service::LocationService;
use crate::application::view_service::ViewService;

#[derive(Clone)]
pub struct AppState {
    pub location_service: LocationService,
    pub view_service: ViewService,
}
