// Flight snapshot domain model
use super::cancellation::{count_from_value, CancellationRecord};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Current cancellation count and when the scraper last wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightSnapshot {
    pub count: u64,
    pub date: String,
    /// Milliseconds since the Unix epoch.
    pub updated_at: Option<i64>,
}

impl FlightSnapshot {
    pub fn new(count: u64, date: impl Into<String>, updated_at: Option<i64>) -> Self {
        Self {
            count,
            date: date.into(),
            updated_at,
        }
    }

    /// "Last Update" time as HH:MM (UTC).
    pub fn updated_time(&self) -> Option<String> {
        let ms = self.updated_at?;
        DateTime::<Utc>::from_timestamp_millis(ms).map(|t| t.format("%H:%M").to_string())
    }

    fn from_value(value: &Value) -> Self {
        let date = match value.get("date") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };
        let updated_at = value.get("updated_at").and_then(|v| {
            v.as_i64()
                .or_else(|| v.as_f64().map(|f| f as i64))
                .or_else(|| v.as_str().and_then(parse_timestamp))
        });

        Self {
            count: value.get("count").map(count_from_value).unwrap_or(0),
            date,
            updated_at,
        }
    }
}

fn parse_timestamp(s: &str) -> Option<i64> {
    s.parse::<i64>().ok().or_else(|| {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|t| t.timestamp_millis())
    })
}

/// The document stored under the flight data key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightData {
    pub current: FlightSnapshot,
    pub history: Vec<CancellationRecord>,
}

impl FlightData {
    pub fn new(current: FlightSnapshot, history: Vec<CancellationRecord>) -> Self {
        Self { current, history }
    }

    /// Accepts the nested `{ current, history }` document, or the older flat
    /// `{ count, date, updated_at }` one which carries no history.
    /// Returns `None` when neither shape is recognisable.
    pub fn from_document(document: &Value) -> Option<Self> {
        let object = document.as_object()?;

        if let Some(current) = object.get("current").filter(|c| c.is_object()) {
            let history = match object.get("history") {
                Some(Value::Array(items)) => items
                    .iter()
                    .map(|item| serde_json::from_value(item.clone()).unwrap_or_default())
                    .collect(),
                _ => Vec::new(),
            };
            return Some(Self::new(FlightSnapshot::from_value(current), history));
        }

        if object.contains_key("count") {
            return Some(Self::new(FlightSnapshot::from_value(document), Vec::new()));
        }

        None
    }
}
