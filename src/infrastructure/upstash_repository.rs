// Upstash-style REST key-value store repository
use crate::application::flight_repository::{FetchError, FlightRepository};
use crate::domain::flight::FlightData;
use crate::infrastructure::config::StoreSettings;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct UpstashRepository {
    base_url: String,
    token: Option<String>,
    key: String,
    client: reqwest::Client,
}

/// `GET /get/<key>` response body.
#[derive(Debug, Deserialize)]
struct KvEnvelope {
    #[serde(default)]
    result: Value,
}

impl UpstashRepository {
    pub fn new(base_url: String, token: Option<String>, key: String, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            key,
            client,
        })
    }

    /// `None` when the store has no URL configured.
    pub fn from_settings(settings: &StoreSettings) -> Result<Option<Self>, FetchError> {
        let Some(base_url) = settings.base_url() else {
            return Ok(None);
        };
        Self::new(
            base_url.to_string(),
            settings.token.clone(),
            settings.key.clone(),
            settings.timeout(),
        )
        .map(Some)
    }

    fn build_get_url(&self) -> String {
        format!("{}/get/{}", self.base_url, urlencoding::encode(&self.key))
    }

    async fn execute_get(&self) -> Result<KvEnvelope, FetchError> {
        let url = self.build_get_url();
        tracing::debug!("Fetching {}", url);

        let mut request = self.client.get(&url).header("Accept", "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// The result is either the document itself or the document serialised as
/// a JSON string. Null, missing and blank results mean there is no data.
fn decode_result(result: Value) -> Result<Option<FlightData>, FetchError> {
    let document = match result {
        Value::Null => return Ok(None),
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::String(s) => serde_json::from_str::<Value>(&s)?,
        other => other,
    };

    FlightData::from_document(&document)
        .map(Some)
        .ok_or(FetchError::Document)
}

#[async_trait]
impl FlightRepository for UpstashRepository {
    async fn fetch_flight_data(&self) -> Result<Option<FlightData>, FetchError> {
        let envelope = self.execute_get().await?;
        decode_result(envelope.result)
    }
}
