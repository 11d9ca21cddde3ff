// Repository trait for flight data access
use crate::domain::flight::FlightData;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to key-value store failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("key-value store returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("stored flight data is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("stored flight data has an unrecognised shape")]
    Document,
}

#[async_trait]
pub trait FlightRepository: Send + Sync {
    /// Read the flight data document. `Ok(None)` means the key holds nothing.
    async fn fetch_flight_data(&self) -> Result<Option<FlightData>, FetchError>;
}
