// Presentation layer - HTTP routes and page rendering
pub mod app_state;
pub mod handlers;
pub mod page;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{dashboard_json, health_check, icon, index, layout, stream_dashboard};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/icon.svg", get(icon))
        .route("/healthz", get(health_check))
        .route("/api/layout", get(layout))
        .route("/api/dashboard", get(dashboard_json))
        .route("/api/dashboard/stream", get(stream_dashboard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::flight_repository::FlightRepository;
    use crate::infrastructure::config::CounterSettings;
    use crate::infrastructure::upstash_repository::tests::spawn_fake_store;
    use crate::infrastructure::upstash_repository::UpstashRepository;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::time::Duration;
    use tower::util::ServiceExt;

    const STORED: &str =
        r#"{"current":{"count":42,"date":"2024-01-01","updated_at":1700000000000},"history":[]}"#;

    fn create_test_app(repository: Option<Arc<dyn FlightRepository>>) -> Router {
        let counter = CounterSettings {
            duration_ms: 40,
            frame_interval_ms: 4,
        };
        build_router(Arc::new(AppState::new(repository, counter).unwrap()))
    }

    fn store_app(base_url: String) -> Router {
        let repository = UpstashRepository::new(
            base_url,
            Some("test-token".to_string()),
            "flight_data".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();
        create_test_app(Some(Arc::new(repository)))
    }

    async fn fake_store_app() -> Router {
        store_app(spawn_fake_store(StatusCode::OK, json!({ "result": STORED })).await)
    }

    /// A store address with nothing listening behind it.
    fn closed_store_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    fn ndjson(body: &str) -> Vec<Value> {
        body.lines().map(|line| serde_json::from_str(line).unwrap()).collect()
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get(create_test_app(None), "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_index_serves_loading_shell() {
        let (status, body) = get(fake_store_app().await, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Loading stats..."));
        assert!(!body.contains(">42<"));

        // The page script drives the counter from the stream and follows resizes.
        assert!(body.contains("fetch(\"/api/dashboard/stream?width=\""));
        assert!(body.contains("msg.type === \"counter\""));
        assert!(body.contains("window.addEventListener(\"resize\""));
        assert!(body.contains("fetch(\"/api/layout?width=\""));
    }

    #[tokio::test]
    async fn test_unreachable_store_streams_empty_view() {
        let app = store_app(closed_store_url());

        let (status, body) = get(app.clone(), "/api/dashboard/stream").await;
        assert_eq!(status, StatusCode::OK);

        let messages = ndjson(&body);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["state"], "loading");
        assert_eq!(messages[1]["state"], "empty");
        assert!(messages[1]["html"].as_str().unwrap().contains("No data found yet."));

        let (_, body) = get(app, "/api/dashboard").await;
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["state"], "empty");
    }

    #[tokio::test]
    async fn test_unconfigured_store_streams_empty_view() {
        let (status, body) = get(create_test_app(None), "/api/dashboard/stream").await;
        assert_eq!(status, StatusCode::OK);

        let messages = ndjson(&body);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1]["state"], "empty");
    }

    #[tokio::test]
    async fn test_icon() {
        let response = create_test_app(None)
            .oneshot(Request::builder().uri("/icon.svg").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "image/svg+xml");
    }

    #[tokio::test]
    async fn test_layout_follows_width() {
        let (status, body) = get(create_test_app(None), "/api/layout?width=600").await;
        assert_eq!(status, StatusCode::OK);
        let narrow: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(narrow["angle"], -90);
        assert_eq!(narrow["text_anchor"], "end");

        let (_, body) = get(create_test_app(None), "/api/layout?width=900").await;
        let wide: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(wide["angle"], 0);
        assert_eq!(wide["height"], 30);
    }

    #[tokio::test]
    async fn test_index_compressed() {
        let response = create_test_app(None)
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("accept-encoding", "gzip, br")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()["content-encoding"], "br");
    }

    #[tokio::test]
    async fn test_dashboard_json_narrow_viewport() {
        let (status, body) = get(fake_store_app().await, "/api/dashboard?width=500").await;
        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["state"], "loaded");
        assert_eq!(json["snapshot"]["date"], "2024-01-01");
        assert_eq!(json["chart"]["axis"]["angle"], -90);
        assert_eq!(json["chart"]["bars"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_stream_counter_converges() {
        let (status, body) = get(fake_store_app().await, "/api/dashboard/stream").await;
        assert_eq!(status, StatusCode::OK);

        let messages = ndjson(&body);
        assert_eq!(messages[0]["state"], "loading");
        assert!(messages[0]["html"].as_str().unwrap().contains("Loading stats..."));
        assert_eq!(messages[1]["state"], "loaded");

        let html = messages[1]["html"].as_str().unwrap();
        assert!(html.contains(">42<"));
        assert!(html.contains("2024-01-01"));

        let last = messages.last().unwrap();
        assert_eq!(last["type"], "counter");
        assert_eq!(last["value"], 42);
        assert_eq!(last["done"], true);
    }
}
