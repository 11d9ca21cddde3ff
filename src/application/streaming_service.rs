// Streaming dashboard service - Progressive loading followed by counter frames
use crate::application::animation::animate;
use crate::application::dashboard_service::DashboardService;
use crate::application::view_renderer::DashboardRenderer;
use crate::application::viewport::{ResponsiveAxis, Viewport};
use crate::domain::counter::{AnimatedCounter, CounterFrame};
use crate::domain::dashboard::{Dashboard, FetchState};
use crate::infrastructure::config::CounterSettings;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;

const CHANNEL_CAPACITY: usize = 32;

/// A dashboard view together with the markup the page swaps in for it.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardUpdate {
    #[serde(flatten)]
    pub dashboard: Dashboard,
    pub html: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamMessage {
    Dashboard(DashboardUpdate),
    Counter(CounterFrame),
}

#[derive(Clone)]
pub struct StreamingDashboardService {
    dashboard_service: DashboardService,
    counter: CounterSettings,
    renderer: Arc<dyn DashboardRenderer>,
}

impl StreamingDashboardService {
    pub fn new(
        dashboard_service: DashboardService,
        counter: CounterSettings,
        renderer: Arc<dyn DashboardRenderer>,
    ) -> Self {
        Self {
            dashboard_service,
            counter,
            renderer,
        }
    }

    fn update(&self, dashboard: Dashboard) -> StreamMessage {
        let html = match self.renderer.render_body(&dashboard) {
            Ok(html) => html,
            Err(e) => {
                tracing::error!("Error rendering dashboard body: {}", e);
                String::new()
            }
        };
        StreamMessage::Dashboard(DashboardUpdate { dashboard, html })
    }

    /// Sends the loading view, then the settled view, then (when loaded)
    /// one counter frame per display frame until the count settles.
    /// The task stops as soon as the receiver is dropped.
    pub fn stream_dashboard<V>(&self, viewport: V) -> mpsc::Receiver<StreamMessage>
    where
        V: Viewport + 'static,
    {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let service = self.clone();

        tokio::spawn(async move {
            let axis = ResponsiveAxis::new(viewport).layout();

            let loading = service.update(Dashboard::new(FetchState::Loading, axis));
            if tx.send(loading).await.is_err() {
                return;
            }

            let state = service.dashboard_service.load().await;
            let target = state.snapshot().map(|s| s.count);
            if tx.send(service.update(Dashboard::new(state, axis))).await.is_err() {
                return;
            }

            let Some(end) = target else {
                return;
            };

            let counter = AnimatedCounter::new(end, service.counter.duration_ms);
            let frames = animate(counter, service.counter.frame_interval());
            tokio::pin!(frames);

            while let Some(frame) = frames.next().await {
                if tx.send(StreamMessage::Counter(frame)).await.is_err() {
                    tracing::debug!("Stream client disconnected, stopping counter");
                    break;
                }
            }
        });

        rx
    }
}
