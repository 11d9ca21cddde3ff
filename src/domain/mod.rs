// Domain layer - Flight cancellation models and view logic
pub mod cancellation;
pub mod chart;
pub mod counter;
pub mod dashboard;
pub mod flight;
pub mod layout;
