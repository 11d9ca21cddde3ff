// HTTP request handlers
use crate::application::viewport::{FixedViewport, ResponsiveAxis};
use crate::domain::dashboard::{Dashboard, FetchState};
use crate::domain::layout::AxisLayout;
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::infrastructure::http_response::{accepts_brotli, html_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

const ICON_SVG: &str = include_str!("../../static/icon.svg");

/// Viewport width reported by the client, in logical pixels.
#[derive(Deserialize)]
pub struct ViewportQuery {
    pub width: Option<u32>,
}

impl ViewportQuery {
    fn viewport(&self) -> FixedViewport {
        self.width.map(FixedViewport).unwrap_or_default()
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn icon() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/svg+xml")], ICON_SVG)
}

/// Dashboard page in its loading view. The store is not read here; the
/// page script opens the stream, which does the one fetch.
pub async fn index(
    Query(query): Query<ViewportQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let compress = accepts_brotli(&headers);
    let axis = ResponsiveAxis::new(query.viewport()).layout();
    let dashboard = Dashboard::new(FetchState::Loading, axis);

    let html = match state.renderer.render(&dashboard) {
        Ok(html) => html,
        Err(e) => {
            tracing::error!("Error rendering dashboard page: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match html_response(html, compress).await {
        Ok(response) => response.into_response(),
        Err(status) => status.into_response(),
    }
}

/// Dashboard view model as JSON
pub async fn dashboard_json(
    Query(query): Query<ViewportQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<Dashboard> {
    Json(state.dashboard_service.get_dashboard(query.viewport()).await)
}

/// Axis layout for the reported width, requested again on every resize
pub async fn layout(Query(query): Query<ViewportQuery>) -> Json<AxisLayout> {
    Json(ResponsiveAxis::new(query.viewport()).layout())
}

/// Progressive dashboard: loading view, settled view, then counter frames
pub async fn stream_dashboard(
    Query(query): Query<ViewportQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let rx = state.streaming_service.stream_dashboard(query.viewport());
    stream_from_receiver(rx)
}
