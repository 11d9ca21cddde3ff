// Cancellation record domain model
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// What a chart bar stands for. Decides its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Avg,
    Spacer,
    #[default]
    Recent,
}

impl RecordKind {
    /// Anything that is not `avg` or `spacer` counts as a recent bar.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "avg" => RecordKind::Avg,
            "spacer" => RecordKind::Spacer,
            _ => RecordKind::Recent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CancellationRecord {
    #[serde(default, deserialize_with = "lenient_label")]
    pub label: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub count: u64,
    #[serde(rename = "type", default, deserialize_with = "lenient_kind")]
    pub kind: RecordKind,
}

impl CancellationRecord {
    pub fn new(label: impl Into<String>, count: u64, kind: RecordKind) -> Self {
        Self {
            label: label.into(),
            count,
            kind,
        }
    }

    pub fn average(label: impl Into<String>, count: u64) -> Self {
        Self::new(label, count, RecordKind::Avg)
    }

    pub fn spacer() -> Self {
        Self::new("", 0, RecordKind::Spacer)
    }

    pub fn recent(label: impl Into<String>, count: u64) -> Self {
        Self::new(label, count, RecordKind::Recent)
    }
}

// Records written by the scraper are not validated; a malformed field
// becomes an unlabeled or zero-height bar instead of a decode error.

fn lenient_label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Ok(count_from_value(&Value::deserialize(deserializer)?))
}

fn lenient_kind<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RecordKind, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(tag) => RecordKind::from_tag(&tag),
        _ => RecordKind::Recent,
    })
}

/// Counts arrive as JSON numbers or numeric strings; negatives and
/// garbage collapse to zero, fractions are floored.
pub(crate) fn count_from_value(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f.floor() as u64))
            .unwrap_or(0),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| *f > 0.0)
            .map(|f| f.floor() as u64)
            .unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_well_formed_record() {
        let record: CancellationRecord =
            serde_json::from_str(r#"{"label":"Dec 3","count":150,"type":"recent"}"#).unwrap();
        assert_eq!(record, CancellationRecord::recent("Dec 3", 150));
    }

    #[test]
    fn test_decode_malformed_record_is_kept() {
        let record: CancellationRecord = serde_json::from_str(r#"{"type":"avg"}"#).unwrap();
        assert_eq!(record.label, "");
        assert_eq!(record.count, 0);
        assert_eq!(record.kind, RecordKind::Avg);

        let record: CancellationRecord =
            serde_json::from_str(r#"{"label":2022,"count":"17.8","type":42}"#).unwrap();
        assert_eq!(record.label, "2022");
        assert_eq!(record.count, 17);
        assert_eq!(record.kind, RecordKind::Recent);
    }

    #[test]
    fn test_unknown_type_is_recent() {
        assert_eq!(RecordKind::from_tag("today"), RecordKind::Recent);
        assert_eq!(RecordKind::from_tag("spacer"), RecordKind::Spacer);
    }

    #[test]
    fn test_negative_count_is_zero() {
        assert_eq!(count_from_value(&serde_json::json!(-4)), 0);
        assert_eq!(count_from_value(&serde_json::json!(3.9)), 3);
        assert_eq!(count_from_value(&Value::Null), 0);
    }
}
