// Flight cancellations dashboard: fetches the stored flight data once per
// page view and renders the animated count and the cancellation chart.
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
