// Dashboard service - One fetch per page view, settled into a FetchState
use crate::application::flight_repository::FlightRepository;
use crate::application::viewport::{ResponsiveAxis, Viewport};
use crate::domain::dashboard::{Dashboard, FetchState};
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    repository: Option<Arc<dyn FlightRepository>>,
}

impl DashboardService {
    /// `None` means no store is configured and every page renders empty.
    pub fn new(repository: Option<Arc<dyn FlightRepository>>) -> Self {
        Self { repository }
    }

    pub async fn load(&self) -> FetchState {
        let Some(repository) = &self.repository else {
            tracing::debug!("Key-value store not configured, skipping fetch");
            return FetchState::Loading.complete(None);
        };

        match repository.fetch_flight_data().await {
            Ok(data) => {
                if data.is_none() {
                    tracing::info!("Key-value store holds no flight data yet");
                }
                FetchState::Loading.complete(data)
            }
            Err(e) => {
                tracing::error!("Error fetching flight data: {}", e);
                FetchState::Loading.complete(None)
            }
        }
    }

    pub async fn get_dashboard(&self, viewport: impl Viewport) -> Dashboard {
        let axis = ResponsiveAxis::new(viewport).layout();
        Dashboard::new(self.load().await, axis)
    }
}
