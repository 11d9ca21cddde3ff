// Application layer - Use cases and the ports they depend on
pub mod animation;
pub mod dashboard_service;
pub mod flight_repository;
pub mod streaming_service;
pub mod view_renderer;
pub mod viewport;
