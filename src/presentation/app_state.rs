// Application state for HTTP handlers
use crate::application::chart_renderer::ChartFactory;
use crate::application::maintenance_api::MaintenanceApi;
use crate::presentation::routes::Routes;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn MaintenanceApi>,
    pub chart_factory: Arc<dyn ChartFactory>,
    pub routes: Routes,
    pub banner_ttl: Duration,
}
