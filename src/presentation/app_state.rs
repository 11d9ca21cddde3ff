// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::flight_repository::FlightRepository;
use crate::application::streaming_service::StreamingDashboardService;
use crate::infrastructure::config::CounterSettings;
use crate::presentation::page::PageRenderer;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub streaming_service: StreamingDashboardService,
    pub renderer: Arc<PageRenderer>,
}

impl AppState {
    pub fn new(
        repository: Option<Arc<dyn FlightRepository>>,
        counter: CounterSettings,
    ) -> Result<Self, tera::Error> {
        let renderer = Arc::new(PageRenderer::new()?);
        let dashboard_service = DashboardService::new(repository);
        let streaming_service =
            StreamingDashboardService::new(dashboard_service.clone(), counter, renderer.clone());

        Ok(Self {
            dashboard_service,
            streaming_service,
            renderer,
        })
    }
}
